//! SNBT value tree

use indexmap::IndexMap;

/// A parsed SNBT value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnbtValue {
    /// `{ key: value ... }` with key order preserved.
    Compound(IndexMap<String, SnbtValue>),
    /// `[ value ... ]`
    List(Vec<SnbtValue>),
    /// `[I; 1, 2]`, `[B; ...]`, `[L; ...]` typed numeric arrays.
    TypedArray {
        /// Array kind letter (`B`, `I` or `L`).
        kind: char,
        /// Raw element tokens.
        items: Vec<String>,
    },
    /// Quoted string, raw contents (escapes preserved, always double-quote form).
    String(String),
    /// Unquoted scalar token: numbers with optional suffix, `true`, `false`.
    Literal(String),
}

impl SnbtValue {
    /// Short name of the value kind, used in error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Compound(_) => "compound",
            Self::List(_) => "list",
            Self::TypedArray { .. } => "typed array",
            Self::String(_) => "string",
            Self::Literal(_) => "literal",
        }
    }

    /// Raw string contents, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_compound(&self) -> Option<&IndexMap<String, SnbtValue>> {
        match self {
            Self::Compound(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[SnbtValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a key when this value is a compound.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SnbtValue> {
        self.as_compound().and_then(|map| map.get(key))
    }

    /// Look up a string field of a compound.
    ///
    /// Bare literals are accepted too, since ids are occasionally written unquoted.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            Self::String(s) | Self::Literal(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a list field of a compound; a missing key yields an empty slice.
    #[must_use]
    pub fn get_list(&self, key: &str) -> &[SnbtValue] {
        self.get(key).and_then(SnbtValue::as_list).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let mut map = IndexMap::new();
        map.insert("id".to_string(), SnbtValue::String("0A1B".to_string()));
        map.insert(
            "tasks".to_string(),
            SnbtValue::List(vec![SnbtValue::Literal("1".to_string())]),
        );
        let value = SnbtValue::Compound(map);

        assert_eq!(value.get_str("id"), Some("0A1B"));
        assert_eq!(value.get_list("tasks").len(), 1);
        assert!(value.get_list("rewards").is_empty());
        assert_eq!(value.kind_name(), "compound");
    }
}

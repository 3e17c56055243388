//! Reconstructor, the inverse of the flattener
//!
//! Keys ending in digits are regrouped into lists ordered by that number:
//! `desc1`, `desc2`, `desc10` become `desc: [line1, line2, line10]`.

use indexmap::IndexMap;

use super::TRAILING_DIGITS;
use super::escape::escape;
use crate::error::{Error, Result};
use crate::formats::lang::{LangMap, LangValue};

/// Regroup numbered keys into lists and sort the result by key.
///
/// List values are passed through under their own key. When a bare key and
/// numbered keys share a prefix, the regrouped list replaces the bare value.
///
/// # Errors
/// Returns [`Error::NothingToReconstruct`] when `flat` is empty.
pub fn reconstruct(flat: &LangMap) -> Result<LangMap> {
    if flat.is_empty() {
        return Err(Error::NothingToReconstruct);
    }

    let mut numbered: IndexMap<&str, Vec<(u128, &str)>> = IndexMap::new();
    let mut result = LangMap::with_capacity(flat.len());

    for (key, value) in flat {
        if let LangValue::Text(text) = value
            && let Some(captures) = TRAILING_DIGITS.captures(key)
            && let (Some(prefix), Some(digits)) = (captures.get(1), captures.get(2))
        {
            let index = digits.as_str().parse().unwrap_or(u128::MAX);
            numbered
                .entry(prefix.as_str())
                .or_default()
                .push((index, text.as_str()));
        } else {
            result.insert(key.clone(), value.clone());
        }
    }

    let regrouped = numbered.len();
    for (prefix, mut lines) in numbered {
        lines.sort_by_key(|(index, _)| *index);
        let lines = lines.into_iter().map(|(_, text)| text.to_string()).collect();
        result.insert(prefix.to_string(), LangValue::Lines(lines));
    }

    result.sort_keys();
    tracing::debug!(
        "Reconstructed {} flat entries into {} entries ({regrouped} multi-line)",
        flat.len(),
        result.len()
    );
    Ok(result)
}

/// Escape every string so the map can be written as raw SNBT.
#[must_use]
pub fn escape_lang_map(map: &LangMap) -> LangMap {
    map.iter()
        .map(|(key, value)| {
            let escaped = match value {
                LangValue::Text(text) => LangValue::Text(escape(text)),
                LangValue::Lines(lines) => LangValue::Lines(lines.iter().map(|l| escape(l)).collect()),
            };
            (key.clone(), escaped)
        })
        .collect()
}

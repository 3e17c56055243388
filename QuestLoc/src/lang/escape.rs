//! String escaping between SNBT raw text and plain text
//!
//! Only two sequences are handled: `\"` and `\\`. Other backslash sequences
//! such as `\n` stay literal in both directions.

/// Turn raw SNBT string contents into plain text.
///
/// Replaces `\"` with `"`, then `\\` with `\`.
#[must_use]
pub fn unescape(raw: &str) -> String {
    raw.replace("\\\"", "\"").replace("\\\\", "\\")
}

/// Turn plain text into raw SNBT string contents.
///
/// Replaces `\` with `\\`, then `"` with `\"`.
#[must_use]
pub fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r#"say \"hi\""#), r#"say "hi""#);
        assert_eq!(unescape(r"a\\b"), r"a\b");
        assert_eq!(unescape(r"line\nbreak"), r"line\nbreak");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_unescape_inverts_escape() {
        let samples = [
            "",
            "plain",
            r#"""#,
            r"\",
            r#"\""#,
            r#"\\""#,
            r#""\"#,
            r"\n&6gold&r",
            r#"end with backslash \"#,
            "中文 \"引号\" \\ 混合",
            r#"\\\"\\"#,
        ];
        for s in samples {
            assert_eq!(unescape(&escape(s)), s, "round trip failed for {s:?}");
        }
    }
}

//! Straight-to-curly quote normalization

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

/// Rewrite `"x"` spans to `“x”`
///
/// Spans never cross a line break and must enclose at least one character.
pub fn normalize_quotes(text: &str) -> Cow<'_, str> {
    static QUOTE_RE: OnceLock<Regex> = OnceLock::new();
    let re = QUOTE_RE.get_or_init(|| Regex::new(r#""([^"\n]+)""#).unwrap());
    re.replace_all(text, "“${1}”")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_span() {
        assert_eq!(normalize_quotes(r#"He said "hello""#), "He said “hello”");
    }

    #[test]
    fn test_multiple_spans() {
        assert_eq!(
            normalize_quotes(r#"关于"放管服"和"最多跑一次"改革"#),
            "关于“放管服”和“最多跑一次”改革"
        );
    }

    #[test]
    fn test_unbalanced_quote_untouched() {
        assert_eq!(normalize_quotes(r#"a "b"#), r#"a "b"#);
    }

    #[test]
    fn test_empty_quotes_untouched() {
        assert_eq!(normalize_quotes(r#"x "" y"#), r#"x "" y"#);
    }

    #[test]
    fn test_span_across_newline_untouched() {
        assert_eq!(normalize_quotes("\"a\nb\""), "\"a\nb\"");
    }

    #[test]
    fn test_no_quotes_borrows() {
        assert!(matches!(normalize_quotes("plain"), Cow::Borrowed(_)));
    }
}

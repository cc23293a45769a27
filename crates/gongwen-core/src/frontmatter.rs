//! Controlled front-matter parser
//!
//! Supports exactly three shapes, without a YAML dependency:
//!
//! ```text
//! ---
//! signer: 某某单位
//! recipients:
//!   - 各区县
//!   - 各部门
//! attachments: [表一, "表二"]
//! ---
//! ```
//!
//! Anything else inside the header is dropped line by line; a malformed
//! header never fails the parse.

use gongwen_ast::{MetaValue, Metadata};
use tracing::debug;

/// Line that opens and closes the header
pub const DELIMITER: &str = "---";

const BOM: char = '\u{feff}';

/// Split `text` into front-matter metadata and the remaining body text
///
/// Text that does not start with a delimiter line (after an optional
/// byte-order mark) is returned unchanged with empty metadata. A header
/// that is never closed consumes the whole input.
pub fn parse_front_matter(text: &str) -> (Metadata, String) {
    let stripped = text.strip_prefix(BOM).unwrap_or(text);
    let lines: Vec<&str> = stripped.lines().collect();
    if lines.first().copied() != Some(DELIMITER) {
        return (Metadata::new(), text.to_string());
    }

    let mut meta = Metadata::new();
    let mut open_list: Option<String> = None;
    let mut rest_start = lines.len();

    for (idx, line) in lines.iter().enumerate().skip(1) {
        if line.trim() == DELIMITER {
            rest_start = idx + 1;
            break;
        }
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        if let Some(item) = list_item(line) {
            // Dash items outside an open list are tolerated and dropped.
            if let Some(key) = open_list.as_deref() {
                if !item.is_empty() {
                    meta.push_item(key, item);
                }
            }
            continue;
        }

        open_list = None;
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        let value = value.trim();
        if value.is_empty() {
            meta.insert(key, MetaValue::List(Vec::new()));
            open_list = Some(key.to_string());
        } else if value.starts_with('[') && value.ends_with(']') {
            meta.insert(key, MetaValue::List(inline_list(value)));
        } else {
            meta.insert(key, MetaValue::Scalar(strip_quotes(value).to_string()));
        }
    }

    debug!(keys = meta.len(), "front matter parsed");

    let rest = lines.get(rest_start..).unwrap_or_default().join("\n");
    (meta, rest)
}

fn list_item(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("  - "))
        .map(str::trim)
}

/// `[a, "b", 'c']` -> `["a", "b", "c"]`
fn inline_list(value: &str) -> Vec<String> {
    let inner = &value[1..value.len() - 1];
    inner
        .split(',')
        .map(|part| strip_quotes(part.trim()))
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove one layer of surrounding quote characters
fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(s: &str) -> MetaValue {
        MetaValue::Scalar(s.to_string())
    }

    fn list(items: &[&str]) -> MetaValue {
        MetaValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_no_front_matter_is_identity() {
        for text in ["", "# 标题\n正文", "--- not a delimiter\nx", " ---\na: b\n---"] {
            let (meta, rest) = parse_front_matter(text);
            assert!(meta.is_empty());
            assert_eq!(rest, text);
        }
    }

    #[test]
    fn test_bom_without_front_matter_returns_original() {
        let text = "\u{feff}正文";
        let (meta, rest) = parse_front_matter(text);
        assert!(meta.is_empty());
        assert_eq!(rest, text);
    }

    #[test]
    fn test_scalars_and_remaining_text() {
        let text = "---\nsigner: 某某局\ndate: \"2024年1月1日\"\n---\n# 标题\n正文";
        let (meta, rest) = parse_front_matter(text);
        assert_eq!(meta.get("signer"), Some(&scalar("某某局")));
        assert_eq!(meta.get("date"), Some(&scalar("2024年1月1日")));
        assert_eq!(rest, "# 标题\n正文");
    }

    #[test]
    fn test_bom_is_stripped() {
        let (meta, rest) = parse_front_matter("\u{feff}---\nsigner: A\n---\nbody");
        assert_eq!(meta.get("signer"), Some(&scalar("A")));
        assert_eq!(rest, "body");
    }

    #[test]
    fn test_dash_list() {
        let text = "---\nrecipients:\n  - 各区县\n- 各部门\n---\n";
        let (meta, _) = parse_front_matter(text);
        assert_eq!(meta.get("recipients"), Some(&list(&["各区县", "各部门"])));
    }

    #[test]
    fn test_inline_list_strips_one_quote_layer() {
        let text = "---\nattachments: [表一, \"表二\", '表三', \"\"x\"\"]\n---";
        let (meta, _) = parse_front_matter(text);
        assert_eq!(
            meta.get("attachments"),
            Some(&list(&["表一", "表二", "表三", "\"x\""]))
        );
    }

    #[test]
    fn test_empty_inline_list() {
        let (meta, _) = parse_front_matter("---\ntags: []\n---");
        assert_eq!(meta.get("tags"), Some(&list(&[])));
    }

    #[test]
    fn test_orphan_dash_items_are_dropped() {
        let text = "---\n- stray\nsigner: A\n- also stray\n---";
        let (meta, _) = parse_front_matter(text);
        assert_eq!(meta.len(), 1);
        assert_eq!(meta.get("signer"), Some(&scalar("A")));
    }

    #[test]
    fn test_new_key_closes_open_list() {
        let text = "---\na:\n  - 1\nb: x\n  - 2\n---";
        let (meta, _) = parse_front_matter(text);
        assert_eq!(meta.get("a"), Some(&list(&["1"])));
        assert_eq!(meta.get("b"), Some(&scalar("x")));
    }

    #[test]
    fn test_comments_blanks_and_garbage_are_skipped() {
        let text = "---\n# comment\n\nno colon here\n: no key\nsigner: A\n---\nrest";
        let (meta, rest) = parse_front_matter(text);
        assert_eq!(meta.len(), 1);
        assert_eq!(rest, "rest");
    }

    #[test]
    fn test_comment_does_not_close_list() {
        let text = "---\na:\n  # note\n  - 1\n---";
        let (meta, _) = parse_front_matter(text);
        assert_eq!(meta.get("a"), Some(&list(&["1"])));
    }

    #[test]
    fn test_value_split_at_first_colon() {
        let (meta, _) = parse_front_matter("---\ntime: 10:30\n---");
        assert_eq!(meta.get("time"), Some(&scalar("10:30")));
    }

    #[test]
    fn test_unterminated_front_matter_consumes_everything() {
        let (meta, rest) = parse_front_matter("---\nsigner: A\n# 标题\n正文");
        assert_eq!(meta.get("signer"), Some(&scalar("A")));
        assert_eq!(rest, "");
    }

    #[test]
    fn test_delimiter_only() {
        let (meta, rest) = parse_front_matter("---");
        assert!(meta.is_empty());
        assert_eq!(rest, "");
    }

    #[test]
    fn test_reserialized_metadata_reparses_identically() {
        let text = "---\nrecipients:\n  - 各区县\n  - 各部门\nattachments: [\"表一\", 表二]\n\
                    signer: '某某局'\ndate: 2024年1月1日\nnote: \"[not a list]\"\nempty: []\n\
                    padded: [\" 表一 \", 表二]\n---\n";
        let (meta, _) = parse_front_matter(text);
        let (again, rest) = parse_front_matter(&meta.to_front_matter());
        assert_eq!(meta, again);
        assert_eq!(rest, "");
    }

    #[test]
    fn test_padded_quoted_items_survive_reserialization() {
        let text = "---\nattachments: [\" 表一 \", 表二]\nrecipients:\n  - 甲, 乙\n  - 丙\n---\n";
        let (meta, _) = parse_front_matter(text);
        assert_eq!(meta.get("attachments"), Some(&list(&[" 表一 ", "表二"])));

        let (again, _) = parse_front_matter(&meta.to_front_matter());
        assert_eq!(meta, again);
    }
}

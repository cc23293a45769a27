//! End-to-end tests for the compiler pipeline
//!
//! Source text in, styled segments out: front matter, block parsing,
//! field merging and assembly together.

use gongwen_ast::{Alignment, Block, Font, Role, StyledSegment};
use gongwen_core::{
    compile, compile_json, compile_markdown, parse_markdown, BodyInput, FieldLayer, FlatRecord,
    Sources, TextList, Typography,
};

fn roles(segments: &[StyledSegment]) -> Vec<Role> {
    segments.iter().map(|s| s.role).collect()
}

fn find<'a>(segments: &'a [StyledSegment], text: &str) -> &'a StyledSegment {
    segments
        .iter()
        .find(|s| s.text() == text)
        .unwrap_or_else(|| panic!("no segment with text {text:?}"))
}

/// Input:
/// ```markdown
/// ---
/// recipients:
///   - 各区县
///   - 各部门
/// attachments: [表一, 表二]
/// signer: 某某局
/// date: 2024年1月1日
/// ---
/// # 关于开展检查的通知
///
/// ## 一、总体要求
/// ### （一）突出重点
/// 请于"3月1日"前报送。
/// ```
#[test]
fn test_markdown_full_document() {
    let input = r#"---
recipients:
  - 各区县
  - 各部门
attachments: [表一, 表二]
signer: 某某局
date: 2024年1月1日
---
# 关于开展检查的通知

## 一、总体要求
### （一）突出重点
请于"3月1日"前报送。
"#;
    let segments = compile_markdown(input, &Typography::default());

    assert_eq!(
        roles(&segments),
        vec![
            Role::Title,
            Role::Blank,
            Role::Recipient,
            Role::Heading2,
            Role::Heading3,
            Role::BodyParagraph,
            Role::Blank,
            Role::AttachmentItem,
            Role::AttachmentItem,
            Role::Blank,
            Role::Signer,
            Role::Date,
            Role::Footer,
        ]
    );

    assert_eq!(segments[0].text(), "关于开展检查的通知");
    assert_eq!(segments[2].text(), "各区县、各部门：");
    assert_eq!(segments[5].text(), "请于“3月1日”前报送。");
    assert_eq!(segments[7].text(), "附件：1. 表一");
    assert_eq!(segments[8].text(), "    2. 表二");
    assert_eq!(segments[10].text(), "某某局");
    assert_eq!(segments[11].text(), "2024年1月1日");
}

#[test]
fn test_markdown_without_front_matter() {
    let segments = compile_markdown("# 标题\n正文", &Typography::default());
    assert_eq!(
        roles(&segments),
        vec![Role::Title, Role::Blank, Role::BodyParagraph, Role::Footer]
    );
}

#[test]
fn test_markdown_six_hashes_is_paragraph() {
    let segments = compile_markdown("# T\n###### 不是标题", &Typography::default());
    let seg = find(&segments, "###### 不是标题");
    assert_eq!(seg.role, Role::BodyParagraph);
}

#[test]
fn test_markdown_without_h1_has_no_title() {
    let segments = compile_markdown("## 一、要求\n正文", &Typography::default());
    assert_eq!(segments[0].role, Role::Heading2);
    assert!(segments.iter().all(|s| s.role != Role::Title));
}

#[test]
fn test_flat_json_record() {
    let input = r#"{
        "title": "关于开展年度工作总结的通知",
        "recipients": ["各相关单位"],
        "body": "一、总体要求\n\n（一）突出重点。\n请按时报送。",
        "attachments": "年度工作总结模板",
        "signer": "办公室",
        "date": 20240101
    }"#;
    let segments = compile_json(input, &Typography::default()).unwrap();

    assert_eq!(segments[0].text(), "关于开展年度工作总结的通知");
    assert_eq!(find(&segments, "各相关单位：").role, Role::Recipient);

    let h2 = find(&segments, "一、总体要求");
    assert_eq!(h2.font, Font::Heiti);
    assert_eq!(h2.align, Alignment::Left);

    let h3 = find(&segments, "（一）突出重点。");
    assert_eq!(h3.font, Font::KaitiGb2312);
    assert!(h3.bold);

    assert_eq!(
        find(&segments, "附件：年度工作总结模板").role,
        Role::AttachmentSingle
    );
    assert_eq!(find(&segments, "20240101").role, Role::Date);
}

#[test]
fn test_flat_json_blocks_beat_body() {
    let input = r#"{
        "body": "忽略的正文",
        "blocks": [
            {"type": "h1", "text": "块标题"},
            {"type": "h2", "text": "一、要求"},
            {"type": "p", "text": "块正文"}
        ]
    }"#;
    let segments = compile_json(input, &Typography::default()).unwrap();
    assert_eq!(segments[0].text(), "块标题");
    assert_eq!(find(&segments, "一、要求").role, Role::Heading2);
    assert_eq!(find(&segments, "块正文").role, Role::BodyParagraph);
    assert!(segments.iter().all(|s| s.text() != "忽略的正文"));
}

#[test]
fn test_overrides_beat_markdown() {
    let sources = Sources {
        overrides: FieldLayer::new()
            .with_title("覆盖标题")
            .with_recipients(TextList::One("覆盖主送".into())),
        markdown: Some(parse_markdown(
            "---\nrecipients: 原主送\nsigner: 某某局\n---\n# 原标题\n正文",
        )),
        flat: None,
    };
    let segments = compile(&sources, &Typography::default());

    assert_eq!(segments[0].text(), "覆盖标题");
    assert_eq!(segments[2].text(), "覆盖主送：");
    assert!(segments.iter().all(|s| s.text() != "原标题"));
    assert_eq!(find(&segments, "某某局").role, Role::Signer);
}

#[test]
fn test_override_body_loses_to_markdown_blocks() {
    let sources = Sources {
        overrides: FieldLayer::new().with_body(BodyInput::Text("覆盖正文".into())),
        markdown: Some(parse_markdown("# 标题\n块正文")),
        flat: None,
    };
    let segments = compile(&sources, &Typography::default());
    assert!(segments.iter().any(|s| s.text() == "块正文"));
    assert!(segments.iter().all(|s| s.text() != "覆盖正文"));
}

#[test]
fn test_override_blocks_only() {
    let sources = Sources {
        overrides: FieldLayer::new().with_blocks(vec![Block::paragraph("仅正文")]),
        ..Default::default()
    };
    let segments = compile(&sources, &Typography::default());
    assert_eq!(
        roles(&segments),
        vec![Role::BodyParagraph, Role::Footer]
    );
}

#[test]
fn test_empty_json_object_is_not_default() {
    let sources = Sources {
        flat: Some(FlatRecord::from_json("{}").unwrap()),
        ..Default::default()
    };
    let segments = compile(&sources, &Typography::default());
    assert_eq!(roles(&segments), vec![Role::Footer]);
}

#[test]
fn test_configured_typography_flows_through() {
    let mut typography = Typography::default();
    typography.title.size_pt = 20.0;
    typography.footer.font = Font::FangsongGb2312;

    let segments = compile_markdown("# 标题", &typography);
    assert_eq!(segments[0].size_pt, 20.0);
    assert_eq!(segments.last().unwrap().font, Font::FangsongGb2312);
}

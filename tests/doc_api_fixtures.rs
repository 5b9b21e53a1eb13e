use notion_md::core::{ConvertConfig, ConvertError, convert, render};
use notion_md::doc::{BlockKind, BlockPayload, ContentBlock, MarkdownBlock, PageProperties};
use serde::Deserialize;

const BLOCKS: &str = include_str!("fixtures/page_blocks.json");
const PAGE: &str = include_str!("fixtures/page.json");

#[derive(Deserialize)]
struct Listing {
    results: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct Page {
    properties: PageProperties,
}

fn blocks() -> Vec<ContentBlock> {
    serde_json::from_str::<Listing>(BLOCKS).unwrap().results
}

fn properties() -> PageProperties {
    serde_json::from_str::<Page>(PAGE).unwrap().properties
}

#[test]
fn test_api_listing_decodes_every_block() {
    let blocks = blocks();
    assert_eq!(blocks.len(), 13);
    assert_eq!(blocks[5].kind, BlockKind::Other("table_of_contents".into()));
    assert!(matches!(blocks[6].payload, BlockPayload::Code(_)));
    assert!(matches!(blocks[10].payload, BlockPayload::Image(_)));
    assert!(blocks.iter().all(|block| block.payload != BlockPayload::Missing));
}

#[test]
fn test_api_listing_renders_full_document() {
    let md_blocks = convert(&blocks(), Some(&properties()), &ConvertConfig::default()).unwrap();
    let expected = concat!(
        "# Changelog\n\n",
        "# Release notes\n\n",
        "Version **2.0** is out.\n\n",
        "1. Back up\n",
        "2. Upgrade\n\n",
        "```go\nfmt.Println\n```\n\n",
        "> [*Read the guide*](https://example.com/guide)\n\n",
        "---\n\n",
        "[Bookmark](https://example.com/changelog)\n\n",
        "![Image](https://example.com/banner.png)\n\n",
        "- ~~old API~~\n",
        "- `new_api()`\n\n",
    );
    assert_eq!(render(&md_blocks), expected);
}

#[test]
fn test_api_listing_markdown_blocks_keep_ids_and_types() {
    let md_blocks = convert(&blocks(), Some(&properties()), &ConvertConfig::default()).unwrap();
    let ids: Vec<_> = md_blocks
        .iter()
        .map(|block| (block.block_id.as_str(), block.kind.as_str()))
        .collect();
    assert_eq!(
        ids,
        vec![
            ("0", "pageTitle"),
            ("b-heading", "heading_1"),
            ("b-intro", "paragraph"),
            ("b-step-1", "numbered_list_item"),
            ("b-step-2", "numbered_list_item"),
            ("b-code", "code"),
            ("b-quote", "quote"),
            ("b-divider", "divider"),
            ("b-bookmark", "bookmark"),
            ("b-image", "image"),
            ("b-bullet-1", "bulleted_list_item"),
            ("b-bullet-2", "bulleted_list_item"),
        ]
    );
}

#[test]
fn test_api_listing_fails_on_unsupported_in_strict_mode() {
    let err = convert(&blocks(), None, &ConvertConfig::strict()).unwrap_err();
    assert_eq!(
        err,
        ConvertError::UnsupportedBlockType {
            id: "b-toc".into(),
            kind: "table_of_contents".into(),
        }
    );
}

#[test]
fn test_null_runs_are_skipped() {
    let json = r#"{
        "id": "n",
        "type": "paragraph",
        "paragraph": {
            "rich_text": [
                { "plain_text": "before " },
                null,
                { "plain_text": "after", "annotations": { "bold": true } }
            ]
        }
    }"#;
    let block: ContentBlock = serde_json::from_str(json).unwrap();
    let md_blocks = convert(&[block], None, &ConvertConfig::default()).unwrap();
    assert_eq!(md_blocks, vec![MarkdownBlock::new("n", "paragraph", "before **after**")]);
}

#[test]
fn test_markdown_blocks_serialize_in_camel_case() {
    let md_blocks = convert(&blocks()[..1], None, &ConvertConfig::default()).unwrap();
    let json = serde_json::to_value(&md_blocks).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {
                "blockId": "b-heading",
                "type": "heading_1",
                "content": "# Release notes",
                "children": []
            }
        ])
    );
}

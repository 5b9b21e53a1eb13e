use notion_md::core::{ConvertConfig, ConvertError, TITLE_PROPERTY};
use notion_md::doc::{BlockKind, ContentBlock, PageProperties, PageProperty, RichTextRun};
use notion_md::source::{BlockSource, FetchError, JsonSource};
use notion_md::{Error, MarkdownConverter};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::tempdir;

/// In-memory source counting how often page properties are requested.
#[derive(Default)]
struct FakeSource {
    blocks: Vec<ContentBlock>,
    title: Option<String>,
    missing: bool,
    property_calls: AtomicUsize,
}

impl FakeSource {
    fn with_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            blocks,
            ..Self::default()
        }
    }

    fn titled(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

impl BlockSource for FakeSource {
    async fn fetch_children(&self, block_id: &str) -> Result<Vec<ContentBlock>, FetchError> {
        if self.missing {
            return Err(FetchError::NotFound(block_id.to_string()));
        }
        Ok(self.blocks.clone())
    }

    async fn fetch_page_properties(&self, _page_id: &str) -> Result<PageProperties, FetchError> {
        self.property_calls.fetch_add(1, Ordering::SeqCst);
        let mut properties = PageProperties::new();
        if let Some(title) = &self.title {
            properties.insert(
                TITLE_PROPERTY.to_string(),
                PageProperty::title([RichTextRun::plain(title.as_str())]),
            );
        }
        Ok(properties)
    }
}

fn sample_blocks() -> Vec<ContentBlock> {
    vec![
        ContentBlock::text("h", BlockKind::Heading2, [RichTextRun::plain("Intro")]),
        ContentBlock::paragraph("p", "Hello"),
    ]
}

#[tokio::test]
async fn test_page_to_markdown_includes_title() {
    let converter = MarkdownConverter::new(FakeSource::with_blocks(sample_blocks()).titled("Doc"));
    let markdown = converter.page_to_markdown("page-1").await.unwrap();
    assert_eq!(markdown, "# Doc\n\n## Intro\n\nHello\n\n");
}

#[tokio::test]
async fn test_title_disabled_skips_property_fetch() {
    let converter = MarkdownConverter::with_config(
        FakeSource::with_blocks(sample_blocks()).titled("Doc"),
        ConvertConfig::default().with_title(false),
    );
    let md_blocks = converter.page_to_markdown_blocks("page-1").await.unwrap();
    assert_eq!(md_blocks.len(), 2);
    assert_eq!(converter.source().property_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_untitled_page_has_no_title_block() {
    let converter = MarkdownConverter::new(FakeSource::with_blocks(sample_blocks()));
    let md_blocks = converter.page_to_markdown_blocks("page-1").await.unwrap();
    assert_eq!(md_blocks[0].block_id, "h");
    assert_eq!(converter.source().property_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_empty_page_id_is_invalid_argument() {
    let converter = MarkdownConverter::new(FakeSource::default());
    let err = converter.page_to_markdown(" ").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Convert(ConvertError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn test_fetch_errors_propagate() {
    let source = FakeSource {
        missing: true,
        ..FakeSource::default()
    };
    let err = MarkdownConverter::new(source)
        .page_to_markdown("gone")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fetch(FetchError::NotFound(ref id)) if id == "gone"));
    assert_eq!(err.to_string(), "not found: gone");
}

#[tokio::test]
async fn test_strict_config_rejects_unsupported_blocks() {
    let blocks = vec![ContentBlock::new(
        "t",
        BlockKind::Other("toggle".into()),
        notion_md::doc::BlockPayload::Raw(serde_json::json!({})),
    )];
    let converter = MarkdownConverter::with_config(
        FakeSource::with_blocks(blocks),
        ConvertConfig::strict(),
    );
    let err = converter.page_to_markdown("page-1").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Convert(ConvertError::UnsupportedBlockType { .. })
    ));
}

#[tokio::test]
async fn test_json_source_end_to_end() {
    let dir = tempdir().unwrap();
    let blocks = dir.path().join("blocks.json");
    let page = dir.path().join("page.json");
    fs::write(
        &blocks,
        r#"{
            "object": "list",
            "results": [
                { "id": "1", "type": "numbered_list_item",
                  "numbered_list_item": { "rich_text": [{ "plain_text": "first" }] } },
                { "id": "2", "type": "numbered_list_item",
                  "numbered_list_item": { "rich_text": [{ "plain_text": "second" }] } },
                { "id": "3", "type": "bookmark",
                  "bookmark": { "url": "https://example.com" } }
            ],
            "has_more": false
        }"#,
    )
    .unwrap();
    fs::write(
        &page,
        r#"{ "properties": { "title": { "type": "title", "title": [{ "plain_text": "List" }] } } }"#,
    )
    .unwrap();

    let converter = MarkdownConverter::new(JsonSource::new(&blocks).with_page(&page));
    let markdown = converter.page_to_markdown("local").await.unwrap();
    assert_eq!(
        markdown,
        "# List\n\n1. first\n2. second\n\n[Bookmark](https://example.com)\n\n"
    );
}

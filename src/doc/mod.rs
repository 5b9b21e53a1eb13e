//! Block document model: content blocks as received from Notion and the flat
//! Markdown records produced from them.
//!
//! Content blocks deserialize from the API wire shape
//! `{"id": .., "type": "<tag>", "<tag>": {..}}`. The payload is decoded
//! according to the tag; when it is absent or has the wrong shape the block
//! still deserializes, carrying [`BlockPayload::Missing`], and formatting it
//! later reports the mismatch.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub mod rich_text;

pub use rich_text::{Annotations, Link, RichText, RichTextRun, TextContent, rich_text};

pub type BlockId = String;

/// `type` of the synthetic block holding the page title.
pub const PAGE_TITLE_KIND: &str = "pageTitle";

/// Block id of the synthetic page-title block.
pub const PAGE_TITLE_ID: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Quote,
    BulletedListItem,
    NumberedListItem,
    Code,
    Bookmark,
    Divider,
    Image,
    /// Any block type without a Markdown rendering; keeps the wire tag.
    Other(String),
}

impl BlockKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "paragraph" => Self::Paragraph,
            "heading_1" => Self::Heading1,
            "heading_2" => Self::Heading2,
            "heading_3" => Self::Heading3,
            "quote" => Self::Quote,
            "bulleted_list_item" => Self::BulletedListItem,
            "numbered_list_item" => Self::NumberedListItem,
            "code" => Self::Code,
            "bookmark" => Self::Bookmark,
            "divider" => Self::Divider,
            "image" => Self::Image,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading1 => "heading_1",
            Self::Heading2 => "heading_2",
            Self::Heading3 => "heading_3",
            Self::Quote => "quote",
            Self::BulletedListItem => "bulleted_list_item",
            Self::NumberedListItem => "numbered_list_item",
            Self::Code => "code",
            Self::Bookmark => "bookmark",
            Self::Divider => "divider",
            Self::Image => "image",
            Self::Other(tag) => tag,
        }
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self, Self::BulletedListItem | Self::NumberedListItem)
    }

    fn carries_rich_text(&self) -> bool {
        matches!(
            self,
            Self::Paragraph
                | Self::Heading1
                | Self::Heading2
                | Self::Heading3
                | Self::Quote
                | Self::BulletedListItem
                | Self::NumberedListItem
        )
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextBody {
    #[serde(default)]
    pub rich_text: RichText,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBody {
    #[serde(default)]
    pub rich_text: RichText,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkBody {
    pub url: String,
    #[serde(default)]
    pub caption: RichText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUrl {
    pub url: String,
}

/// Image payload: either a Notion-hosted file or an external URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileObject {
    #[serde(default)]
    pub file: Option<FileUrl>,
    #[serde(default)]
    pub external: Option<FileUrl>,
    #[serde(default)]
    pub caption: RichText,
}

impl FileObject {
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            external: Some(FileUrl { url: url.into() }),
            ..Self::default()
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.file
            .as_ref()
            .or(self.external.as_ref())
            .map(|file| file.url.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockPayload {
    RichText(RichTextBody),
    Code(CodeBody),
    Bookmark(BookmarkBody),
    Image(FileObject),
    Divider,
    /// Payload of a block type that is not rendered, kept verbatim.
    Raw(Value),
    /// The payload named by the block's tag is absent or malformed.
    Missing,
}

impl BlockPayload {
    fn from_wire(kind: &BlockKind, value: Value) -> Self {
        let decoded = match kind {
            kind if kind.carries_rich_text() => {
                serde_json::from_value(value).map(BlockPayload::RichText)
            }
            BlockKind::Code => serde_json::from_value(value).map(BlockPayload::Code),
            BlockKind::Bookmark => serde_json::from_value(value).map(BlockPayload::Bookmark),
            BlockKind::Image => serde_json::from_value(value).map(BlockPayload::Image),
            BlockKind::Divider => Ok(BlockPayload::Divider),
            _ => Ok(BlockPayload::Raw(value)),
        };
        decoded.unwrap_or(BlockPayload::Missing)
    }
}

/// One unit of source content, immutable once received.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "WireBlock")]
pub struct ContentBlock {
    pub id: BlockId,
    pub kind: BlockKind,
    pub payload: BlockPayload,
}

#[derive(Deserialize)]
struct WireBlock {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl From<WireBlock> for ContentBlock {
    fn from(mut wire: WireBlock) -> Self {
        let kind = BlockKind::from_tag(&wire.kind);
        let payload = match wire.rest.remove(&wire.kind) {
            Some(value) => BlockPayload::from_wire(&kind, value),
            None => BlockPayload::Missing,
        };
        Self {
            id: wire.id,
            kind,
            payload,
        }
    }
}

impl ContentBlock {
    pub fn new(id: impl Into<BlockId>, kind: BlockKind, payload: BlockPayload) -> Self {
        Self {
            id: id.into(),
            kind,
            payload,
        }
    }

    /// A text-bearing block (paragraph, heading, quote, list item).
    pub fn text<I>(id: impl Into<BlockId>, kind: BlockKind, runs: I) -> Self
    where
        I: IntoIterator<Item = RichTextRun>,
    {
        Self::new(
            id,
            kind,
            BlockPayload::RichText(RichTextBody {
                rich_text: rich_text(runs),
            }),
        )
    }

    pub fn paragraph(id: impl Into<BlockId>, text: &str) -> Self {
        Self::text(id, BlockKind::Paragraph, [RichTextRun::plain(text)])
    }

    pub fn code<I>(id: impl Into<BlockId>, language: Option<&str>, runs: I) -> Self
    where
        I: IntoIterator<Item = RichTextRun>,
    {
        Self::new(
            id,
            BlockKind::Code,
            BlockPayload::Code(CodeBody {
                rich_text: rich_text(runs),
                language: language.map(str::to_string),
            }),
        )
    }

    pub fn bookmark(id: impl Into<BlockId>, url: impl Into<String>) -> Self {
        Self::new(
            id,
            BlockKind::Bookmark,
            BlockPayload::Bookmark(BookmarkBody {
                url: url.into(),
                caption: Vec::new(),
            }),
        )
    }

    pub fn image(id: impl Into<BlockId>, url: impl Into<String>) -> Self {
        Self::new(id, BlockKind::Image, BlockPayload::Image(FileObject::external(url)))
    }

    pub fn divider(id: impl Into<BlockId>) -> Self {
        Self::new(id, BlockKind::Divider, BlockPayload::Divider)
    }

    /// Rich text of text-bearing and code blocks.
    pub fn rich_text(&self) -> Option<&[Option<RichTextRun>]> {
        match &self.payload {
            BlockPayload::RichText(body) => Some(&body.rich_text),
            BlockPayload::Code(body) => Some(&body.rich_text),
            _ => None,
        }
    }
}

/// Flat Markdown record produced for one content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkdownBlock {
    pub block_id: BlockId,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    #[serde(default)]
    pub children: Vec<MarkdownBlock>,
}

impl MarkdownBlock {
    pub fn new(
        block_id: impl Into<BlockId>,
        kind: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            block_id: block_id.into(),
            kind: kind.into(),
            content: content.into(),
            children: Vec::new(),
        }
    }
}

/// One entry of a page's `properties` object. Only title properties carry
/// data this crate reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageProperty {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: Option<RichText>,
}

impl PageProperty {
    pub fn title<I>(runs: I) -> Self
    where
        I: IntoIterator<Item = RichTextRun>,
    {
        Self {
            id: "title".to_string(),
            kind: "title".to_string(),
            title: Some(rich_text(runs)),
        }
    }
}

pub type PageProperties = BTreeMap<String, PageProperty>;

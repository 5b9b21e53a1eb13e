//! Block-to-Markdown conversion pipeline.
//!
//! Blocks flow through four stages:
//!
//! 1. [`numbering::annotate`] assigns ordinals to numbered-list runs.
//! 2. [`behavior::format_block`] renders each block into a fragment, using
//!    [`rich_text`] for inline styling.
//! 3. Empty fragments are dropped; the rest become [`MarkdownBlock`]s,
//!    optionally preceded by the page title.
//! 4. [`assemble::assemble`] joins the blocks into one document.
//!
//! Every stage is a pure function of its input; nothing is cached between
//! calls.

use crate::doc::{BlockId, ContentBlock, MarkdownBlock, PageProperties};
use tracing::{debug, info, trace, warn};

pub mod assemble;
pub mod behavior;
pub mod numbering;
pub mod rich_text;

pub use assemble::{TITLE_PROPERTY, assemble, page_title_block};
pub use behavior::{Behavior, behavior_for, code_language, format_block};
pub use numbering::{AnnotatedBlock, annotate};
pub use rich_text::{render_rich_text, render_run, render_runs};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("no behavior found for block type {kind} (block {id})")]
    UnsupportedBlockType { id: BlockId, kind: String },
    #[error("block {id} is tagged {kind} but its payload does not match")]
    InvalidBlock { id: BlockId, kind: String },
    #[error("numbered list block {id} has no ordinal")]
    MissingOrdinal { id: BlockId },
}

/// What to do with blocks whose type has no Markdown rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnsupportedPolicy {
    /// Log a warning and leave the block out of the output.
    #[default]
    Skip,
    /// Abort the conversion with [`ConvertError::UnsupportedBlockType`].
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    pub unsupported: UnsupportedPolicy,
    pub include_title: bool,
}

impl ConvertConfig {
    pub fn lenient() -> Self {
        Self {
            unsupported: UnsupportedPolicy::Skip,
            include_title: true,
        }
    }

    pub fn strict() -> Self {
        Self {
            unsupported: UnsupportedPolicy::Fail,
            include_title: true,
        }
    }

    pub fn with_title(mut self, include: bool) -> Self {
        self.include_title = include;
        self
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::lenient()
    }
}

/// Converts content blocks into Markdown blocks, one per non-empty block,
/// preceded by the page title when `properties` supplies one.
pub fn convert(
    blocks: &[ContentBlock],
    properties: Option<&PageProperties>,
    config: &ConvertConfig,
) -> Result<Vec<MarkdownBlock>, ConvertError> {
    let mut md_blocks = Vec::with_capacity(blocks.len() + 1);

    if config.include_title {
        match properties.map(page_title_block) {
            Some(Some(title)) => {
                debug!(title = %title.content, "added page title");
                md_blocks.push(title);
            }
            Some(None) => warn!("no title found in page properties"),
            None => debug!("no page properties supplied"),
        }
    }

    for annotated in annotate(blocks)? {
        let block = annotated.block;
        let content = match format_block(&annotated) {
            Ok(content) => content,
            Err(ConvertError::UnsupportedBlockType { id, kind })
                if config.unsupported == UnsupportedPolicy::Skip =>
            {
                warn!(%id, %kind, "unsupported block type");
                continue;
            }
            Err(err) => return Err(err),
        };

        if content.is_empty() {
            debug!(id = %block.id, kind = %block.kind, "skipped empty block");
            continue;
        }
        trace!(id = %block.id, kind = %block.kind, "added block");
        md_blocks.push(MarkdownBlock::new(block.id.clone(), block.kind.tag(), content));
    }

    info!(
        "converted {} blocks to {} markdown blocks",
        blocks.len(),
        md_blocks.len()
    );
    Ok(md_blocks)
}

/// Renders Markdown blocks as a document string.
pub fn render(md_blocks: &[MarkdownBlock]) -> String {
    assemble(md_blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{BlockKind, BlockPayload, PageProperty, RichTextRun};

    fn titled(title: &str) -> PageProperties {
        let mut properties = PageProperties::new();
        properties.insert(
            TITLE_PROPERTY.into(),
            PageProperty::title([RichTextRun::plain(title)]),
        );
        properties
    }

    fn toggle(id: &str) -> ContentBlock {
        ContentBlock::new(
            id,
            BlockKind::Other("toggle".into()),
            BlockPayload::Raw(serde_json::json!({ "rich_text": [] })),
        )
    }

    #[test]
    fn test_title_comes_first() {
        let blocks = vec![ContentBlock::paragraph("p", "body")];
        let md = convert(&blocks, Some(&titled("Doc")), &ConvertConfig::default()).unwrap();
        assert_eq!(md.len(), 2);
        assert_eq!(md[0].kind, "pageTitle");
        assert_eq!(md[0].content, "# Doc");
        assert_eq!(md[1], MarkdownBlock::new("p", "paragraph", "body"));
    }

    #[test]
    fn test_title_can_be_disabled() {
        let blocks = vec![ContentBlock::paragraph("p", "body")];
        let config = ConvertConfig::default().with_title(false);
        let md = convert(&blocks, Some(&titled("Doc")), &config).unwrap();
        assert_eq!(md.len(), 1);
    }

    #[test]
    fn test_absent_or_untitled_properties_add_no_title() {
        let blocks = vec![ContentBlock::paragraph("p", "body")];
        let config = ConvertConfig::default();
        let without = convert(&blocks, None, &config).unwrap();
        let untitled = convert(&blocks, Some(&PageProperties::new()), &config).unwrap();
        assert_eq!(without, untitled);
        assert_eq!(without.len(), 1);
    }

    #[test]
    fn test_unsupported_skipped_leaves_no_entry() {
        let blocks = vec![
            ContentBlock::paragraph("a", "one"),
            toggle("t"),
            ContentBlock::paragraph("b", "two"),
        ];
        let md = convert(&blocks, None, &ConvertConfig::lenient()).unwrap();
        let ids: Vec<_> = md.iter().map(|block| block.block_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_unsupported_fails_in_strict_mode() {
        let blocks = vec![toggle("t")];
        let err = convert(&blocks, None, &ConvertConfig::strict()).unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnsupportedBlockType {
                id: "t".into(),
                kind: "toggle".into(),
            }
        );
    }

    #[test]
    fn test_empty_paragraph_is_dropped() {
        let blocks = vec![
            ContentBlock::text("e", BlockKind::Paragraph, Vec::<RichTextRun>::new()),
            ContentBlock::paragraph("p", "kept"),
        ];
        let md = convert(&blocks, None, &ConvertConfig::default()).unwrap();
        assert_eq!(md.len(), 1);
        assert_eq!(md[0].block_id, "p");
    }

    #[test]
    fn test_invalid_block_propagates_even_when_lenient() {
        let blocks = vec![ContentBlock::new("q", BlockKind::Quote, BlockPayload::Missing)];
        let err = convert(&blocks, None, &ConvertConfig::lenient()).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidBlock { .. }));
    }

    #[test]
    fn test_children_are_never_expanded() {
        let blocks = vec![ContentBlock::paragraph("p", "parent")];
        let md = convert(&blocks, None, &ConvertConfig::default()).unwrap();
        assert!(md.iter().all(|block| block.children.is_empty()));
    }
}

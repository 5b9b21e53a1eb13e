//! Ordinal assignment for numbered-list runs.
//!
//! A run is a maximal stretch of consecutive `numbered_list_item` blocks.
//! Each run counts from 1; any other block ends the run.

use super::ConvertError;
use crate::doc::{BlockKind, BlockPayload, ContentBlock};
use std::num::NonZeroU32;
use tracing::error;

/// A content block paired with its list position. The block itself is
/// borrowed unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotatedBlock<'a> {
    pub block: &'a ContentBlock,
    pub ordinal: Option<NonZeroU32>,
}

impl<'a> AnnotatedBlock<'a> {
    pub fn unnumbered(block: &'a ContentBlock) -> Self {
        Self {
            block,
            ordinal: None,
        }
    }

    pub fn numbered(block: &'a ContentBlock, ordinal: NonZeroU32) -> Self {
        Self {
            block,
            ordinal: Some(ordinal),
        }
    }
}

/// Single forward pass assigning ordinals to numbered-list blocks.
pub fn annotate(blocks: &[ContentBlock]) -> Result<Vec<AnnotatedBlock<'_>>, ConvertError> {
    let mut counter = NonZeroU32::MIN;
    let mut annotated = Vec::with_capacity(blocks.len());

    for block in blocks {
        if block.kind != BlockKind::NumberedListItem {
            counter = NonZeroU32::MIN;
            annotated.push(AnnotatedBlock::unnumbered(block));
            continue;
        }
        if !matches!(block.payload, BlockPayload::RichText(_)) {
            error!(id = %block.id, "numbered list block has no list item payload");
            return Err(ConvertError::InvalidBlock {
                id: block.id.clone(),
                kind: block.kind.tag().to_string(),
            });
        }
        annotated.push(AnnotatedBlock::numbered(block, counter));
        counter = counter.saturating_add(1);
    }

    Ok(annotated)
}

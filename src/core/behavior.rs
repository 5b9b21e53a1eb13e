//! Per-type formatting behaviors and the registry that selects them.

use super::ConvertError;
use super::numbering::AnnotatedBlock;
use super::rich_text::render_runs;
use crate::doc::{BlockKind, BlockPayload, ContentBlock};

/// Formats one annotated block into a Markdown fragment.
pub type Behavior = fn(&AnnotatedBlock<'_>) -> Result<String, ConvertError>;

/// Looks up the behavior for a block kind. The set of kinds is closed, so the
/// registry is a fixed table; `None` means the kind has no Markdown form.
pub fn behavior_for(kind: &BlockKind) -> Option<Behavior> {
    let behavior: Behavior = match kind {
        BlockKind::Paragraph => paragraph,
        BlockKind::Heading1 => heading_1,
        BlockKind::Heading2 => heading_2,
        BlockKind::Heading3 => heading_3,
        BlockKind::Quote => quote,
        BlockKind::BulletedListItem => bulleted_list_item,
        BlockKind::NumberedListItem => numbered_list_item,
        BlockKind::Code => code,
        BlockKind::Bookmark => bookmark,
        BlockKind::Divider => divider,
        BlockKind::Image => image,
        BlockKind::Other(_) => return None,
    };
    Some(behavior)
}

/// Resolves the block's behavior and applies it.
pub fn format_block(block: &AnnotatedBlock<'_>) -> Result<String, ConvertError> {
    let kind = &block.block.kind;
    let behavior = behavior_for(kind).ok_or_else(|| ConvertError::UnsupportedBlockType {
        id: block.block.id.clone(),
        kind: kind.tag().to_string(),
    })?;
    behavior(block)
}

/// Language tag of a code block, if it has one.
pub fn code_language(block: &ContentBlock) -> Option<&str> {
    match &block.payload {
        BlockPayload::Code(body) if block.kind == BlockKind::Code => body.language.as_deref(),
        _ => None,
    }
}

fn invalid(block: &AnnotatedBlock<'_>) -> ConvertError {
    ConvertError::InvalidBlock {
        id: block.block.id.clone(),
        kind: block.block.kind.tag().to_string(),
    }
}

fn text(block: &AnnotatedBlock<'_>) -> Result<String, ConvertError> {
    match &block.block.payload {
        BlockPayload::RichText(body) => Ok(render_runs(&body.rich_text)),
        _ => Err(invalid(block)),
    }
}

fn paragraph(block: &AnnotatedBlock<'_>) -> Result<String, ConvertError> {
    text(block)
}

fn heading_1(block: &AnnotatedBlock<'_>) -> Result<String, ConvertError> {
    Ok(format!("# {}", text(block)?))
}

fn heading_2(block: &AnnotatedBlock<'_>) -> Result<String, ConvertError> {
    Ok(format!("## {}", text(block)?))
}

fn heading_3(block: &AnnotatedBlock<'_>) -> Result<String, ConvertError> {
    Ok(format!("### {}", text(block)?))
}

fn quote(block: &AnnotatedBlock<'_>) -> Result<String, ConvertError> {
    Ok(format!("> {}", text(block)?))
}

fn bulleted_list_item(block: &AnnotatedBlock<'_>) -> Result<String, ConvertError> {
    Ok(format!("- {}", text(block)?))
}

fn numbered_list_item(block: &AnnotatedBlock<'_>) -> Result<String, ConvertError> {
    let content = text(block)?;
    let ordinal = block.ordinal.ok_or_else(|| ConvertError::MissingOrdinal {
        id: block.block.id.clone(),
    })?;
    Ok(format!("{ordinal}. {content}"))
}

fn code(block: &AnnotatedBlock<'_>) -> Result<String, ConvertError> {
    let BlockPayload::Code(body) = &block.block.payload else {
        return Err(invalid(block));
    };
    let language = code_language(block.block).unwrap_or("");
    Ok(format!("```{language}\n{}\n```", render_runs(&body.rich_text)))
}

fn bookmark(block: &AnnotatedBlock<'_>) -> Result<String, ConvertError> {
    let BlockPayload::Bookmark(body) = &block.block.payload else {
        return Err(invalid(block));
    };
    Ok(format!("[Bookmark]({})", body.url))
}

fn divider(_block: &AnnotatedBlock<'_>) -> Result<String, ConvertError> {
    Ok("---".to_string())
}

fn image(block: &AnnotatedBlock<'_>) -> Result<String, ConvertError> {
    let BlockPayload::Image(file) = &block.block.payload else {
        return Err(invalid(block));
    };
    let url = file.url().ok_or_else(|| invalid(block))?;
    Ok(format!("![Image]({url})"))
}

//! Joins Markdown blocks into a document.

use super::rich_text::render_runs;
use crate::doc::{BlockKind, MarkdownBlock, PAGE_TITLE_ID, PAGE_TITLE_KIND, PageProperties};

/// Page property holding the page title.
pub const TITLE_PROPERTY: &str = "title";

/// Emits each block's content on its own line followed by a blank line,
/// except between adjacent list items of the same kind so they render as
/// one list. The final block keeps its trailing blank line.
pub fn assemble(blocks: &[MarkdownBlock]) -> String {
    let capacity = blocks.iter().map(|block| block.content.len() + 2).sum();
    let mut markdown = String::with_capacity(capacity);

    for (index, block) in blocks.iter().enumerate() {
        markdown.push_str(&block.content);
        markdown.push('\n');

        let continues_list = blocks
            .get(index + 1)
            .is_some_and(|next| is_consecutive_list_item(block, next));
        if !continues_list {
            markdown.push('\n');
        }
    }

    markdown
}

fn is_consecutive_list_item(current: &MarkdownBlock, next: &MarkdownBlock) -> bool {
    current.kind == next.kind && BlockKind::from_tag(&current.kind).is_list_item()
}

/// Builds the leading `# title` block from page properties, if the title
/// property is present and not null.
pub fn page_title_block(properties: &PageProperties) -> Option<MarkdownBlock> {
    let runs = properties.get(TITLE_PROPERTY)?.title.as_deref()?;
    let title = render_runs(runs);
    Some(MarkdownBlock::new(
        PAGE_TITLE_ID,
        PAGE_TITLE_KIND,
        format!("# {title}"),
    ))
}

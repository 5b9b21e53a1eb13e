//! Inline rendering of rich-text runs.

use crate::doc::{Annotations, RichTextRun};
use tracing::{trace, warn};

/// Active emphasis markers, outermost first. A run's text is wrapped
/// innermost (code) to outermost (bold); the link bracket goes around all
/// of them.
fn markers(annotations: &Annotations) -> impl DoubleEndedIterator<Item = &'static str> {
    [
        (annotations.bold, "**"),
        (annotations.italic, "*"),
        (annotations.strikethrough, "~~"),
        (annotations.code, "`"),
    ]
    .into_iter()
    .filter_map(|(enabled, marker)| enabled.then_some(marker))
}

/// Renders an optional rich-text sequence. A missing sequence renders as
/// the empty string.
pub fn render_rich_text(runs: Option<&[Option<RichTextRun>]>) -> String {
    match runs {
        Some(runs) => render_runs(runs),
        None => {
            warn!("rich text list is missing");
            String::new()
        }
    }
}

/// Renders runs in order with no separator, skipping `null` entries.
pub fn render_runs(runs: &[Option<RichTextRun>]) -> String {
    let mut output = String::new();
    for (index, run) in runs.iter().enumerate() {
        let Some(run) = run else {
            warn!(index, "rich text run is null, skipping");
            continue;
        };
        trace!(text = %run.plain_text, "rendering rich text run");
        push_run(&mut output, run);
    }
    output
}

pub fn render_run(run: &RichTextRun) -> String {
    let mut output = String::with_capacity(run.plain_text.len() + 8);
    push_run(&mut output, run);
    output
}

fn push_run(output: &mut String, run: &RichTextRun) {
    let link = run.link_url();
    if link.is_some() {
        output.push('[');
    }
    for marker in markers(&run.annotations) {
        output.push_str(marker);
    }
    output.push_str(&run.plain_text);
    for marker in markers(&run.annotations).rev() {
        output.push_str(marker);
    }
    if let Some(url) = link {
        output.push_str("](");
        output.push_str(url);
        output.push(')');
    }
}

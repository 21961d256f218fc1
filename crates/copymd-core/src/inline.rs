//! Inline formatting: text escaping, emphasis, inline code, links.

use crate::convert::{Frame, Walker};
use crate::node::DocumentNode;
use crate::Result;

/// Escape the Markdown emphasis and code characters in a text node.
///
/// Only `*`, `_` and `` ` `` are escaped; every other character is kept.
pub fn escape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        if matches!(c, '*' | '_' | '`') {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

pub(crate) fn strong(walker: &Walker, node: &DocumentNode, frame: &mut Frame) -> Result<String> {
    let content = walker.children(node, frame)?;
    Ok(wrap(&content, "**"))
}

pub(crate) fn emphasis(walker: &Walker, node: &DocumentNode, frame: &mut Frame) -> Result<String> {
    let content = walker.children(node, frame)?;
    Ok(wrap(&content, "*"))
}

fn wrap(content: &str, delimiter: &str) -> String {
    if content.trim().is_empty() {
        return String::new();
    }
    format!("{delimiter}{content}{delimiter}")
}

/// Inline code span around the raw text of `node`
pub(crate) fn code(walker: &Walker, node: &DocumentNode, frame: &Frame) -> Result<String> {
    let content = node.text_content_within(frame.depth, walker.max_depth())?;
    Ok(code_span(&content))
}

/// Wrap raw code in a backtick fence; doubled when the code has a backtick.
pub fn code_span(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    let fence = if content.contains('`') { "``" } else { "`" };
    format!("{fence}{content}{fence}")
}

pub(crate) fn link(walker: &Walker, node: &DocumentNode, frame: &mut Frame) -> Result<String> {
    let label = walker.children(node, frame)?;

    let href = match node.attr("href").map(str::trim) {
        Some(href) if !href.is_empty() => href,
        _ => return Ok(label),
    };

    if label.trim().is_empty() {
        Ok(format!("[{href}]({href})"))
    } else {
        Ok(format!("[{label}]({href})"))
    }
}

pub(crate) fn line_break() -> String {
    "\n".to_string()
}

//! Block formatting: headings, paragraphs, code blocks and blockquotes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::convert::{Frame, Walker};
use crate::node::{DocumentNode, NodeView, Tag};
use crate::normalize::{normalize, squeeze_blank_lines};
use crate::{ConvertError, Result};

/// `language-<token>` anywhere in a class attribute
static LANGUAGE_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)language-([a-z0-9_-]+)").expect("valid language class pattern")
});

pub(crate) fn heading(
    walker: &Walker,
    level: u8,
    node: &DocumentNode,
    frame: &mut Frame,
) -> Result<String> {
    let content = walker.children(node, frame)?;
    if content.trim().is_empty() {
        return Ok(String::new());
    }
    Ok(format!("\n\n{} {}\n\n", "#".repeat(level as usize), content))
}

pub(crate) fn paragraph(walker: &Walker, node: &DocumentNode, frame: &mut Frame) -> Result<String> {
    let content = walker.children(node, frame)?;
    Ok(format!("\n\n{content}\n\n"))
}

pub(crate) fn thematic_break() -> String {
    "\n\n---\n\n".to_string()
}

/// Fenced code block from a `pre` element.
///
/// The code is the raw text of the first nested `code` element, or of the
/// `pre` itself when there is none.
pub(crate) fn code_block(walker: &Walker, pre: &DocumentNode, frame: &Frame) -> Result<String> {
    let max_depth = walker.max_depth();
    let code_node = find_code(pre, frame.depth, max_depth)?;
    let (target, target_depth) = code_node.unwrap_or((pre, frame.depth));

    let language = code_node
        .and_then(|(code, _)| language_of(code))
        .or_else(|| language_of(pre))
        .unwrap_or_default();

    let text = target.text_content_within(target_depth, max_depth)?;
    let code = text.trim_end_matches('\n');
    let fence = code_fence(code);

    Ok(format!("\n\n{fence}{language}\n{code}\n{fence}\n\n"))
}

/// First `code` element below `node` in document order, with its depth
fn find_code(
    node: &DocumentNode,
    depth: usize,
    max_depth: usize,
) -> Result<Option<(&DocumentNode, usize)>> {
    let mut pending: Vec<_> = node.children().iter().rev().map(|child| (child, depth + 1)).collect();

    while let Some((child, depth)) = pending.pop() {
        if depth > max_depth {
            return Err(ConvertError::TooDeep(max_depth));
        }
        if let NodeView::Element { tag, node } = child.view()? {
            if tag == Tag::Code {
                return Ok(Some((node, depth)));
            }
            pending.extend(node.children().iter().rev().map(|child| (child, depth + 1)));
        }
    }
    Ok(None)
}

/// Language token from a `language-*` class
pub fn language_of(node: &DocumentNode) -> Option<&str> {
    let class = node.attr("class")?;
    LANGUAGE_CLASS
        .captures(class)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Three backticks, or one more than the longest backtick run in the code
pub fn code_fence(code: &str) -> String {
    let longest = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

pub(crate) fn blockquote(walker: &Walker, node: &DocumentNode, frame: &mut Frame) -> Result<String> {
    let content = normalize(&walker.children(node, frame)?);
    let lines = squeeze_blank_lines(&content);
    if lines.is_empty() {
        return Ok(String::new());
    }

    let quoted: Vec<String> = lines.iter().map(|line| format!("> {line}")).collect();
    Ok(format!("\n\n{}\n\n", quoted.join("\n")))
}

//! List formatting with an explicitly threaded nesting context.

use crate::convert::{Frame, Walker};
use crate::node::{DocumentNode, NodeView, Tag};
use crate::normalize::normalize;
use crate::Result;

/// Indent added per list nesting level
const INDENT_STEP: usize = 2;

/// Prefix of item body lines after the marker line
const CONTINUATION: &str = "  ";

/// State of the list currently being emitted.
///
/// Lives on the stack frame of the list conversion; the items below it borrow
/// it mutably through [`Frame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListContext {
    /// `ol` rather than `ul`
    pub ordered: bool,
    /// Ordinal of the next emitted item, starting at 1
    pub next_index: usize,
    /// Two per nesting level; the top-level list has 2
    pub indent_level: usize,
}

impl ListContext {
    /// Context for a list nested inside `parent`, or a top-level one
    pub fn nested(ordered: bool, parent: Option<&ListContext>) -> Self {
        let parent_indent = parent.map_or(0, |p| p.indent_level);
        Self {
            ordered,
            next_index: 1,
            indent_level: parent_indent + INDENT_STEP,
        }
    }

    /// Context used by an item met outside any list
    pub fn implicit() -> Self {
        Self::nested(false, None)
    }

    /// Marker for the next item, advancing the ordinal for ordered lists
    pub fn next_bullet(&mut self) -> String {
        if self.ordered {
            let bullet = format!("{}. ", self.next_index);
            self.next_index += 1;
            bullet
        } else {
            "- ".to_string()
        }
    }

    /// Column of this list's markers in the final output.
    ///
    /// Items are emitted flush left and every enclosing item shifts its body
    /// by one step, so markers land here without the list adding it itself.
    pub fn marker_column(&self) -> usize {
        self.indent_level.saturating_sub(INDENT_STEP)
    }
}

pub(crate) fn list(
    walker: &Walker,
    ordered: bool,
    node: &DocumentNode,
    frame: &mut Frame,
) -> Result<String> {
    let mut ctx = ListContext::nested(ordered, frame.list.as_deref());
    tracing::trace!(ordered, column = ctx.marker_column(), "list");

    let mut items = String::new();
    for child in node.children() {
        if let NodeView::Element {
            tag: Tag::ListItem,
            node: li,
        } = child.view()?
        {
            items.push_str(&list_item(walker, li, &mut frame.with_list(&mut ctx))?);
        }
    }

    Ok(format!("\n{items}\n"))
}

pub(crate) fn list_item(walker: &Walker, node: &DocumentNode, frame: &mut Frame) -> Result<String> {
    let depth = frame.depth;
    let mut fallback = ListContext::implicit();
    let ctx = match frame.list.as_deref_mut() {
        Some(ctx) => ctx,
        None => &mut fallback,
    };
    let bullet = ctx.next_bullet();
    let mut inner = Frame {
        list: Some(ctx),
        depth,
    };

    let mut body = String::new();
    for child in node.children() {
        body.push_str(&walker.node(child, &mut inner.descend())?);
    }
    let body = normalize(&body);

    let mut lines: Vec<&str> = body.lines().collect();
    // a nested list must not share the marker line
    if starts_with_list(node)? {
        lines.insert(0, "");
    }

    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            out.push_str(&bullet);
        } else {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(CONTINUATION);
            }
        }
        out.push_str(line);
    }
    if lines.is_empty() {
        out.push_str(&bullet);
    }
    out.push('\n');

    Ok(out)
}

/// First child with content is a `ul`/`ol`
fn starts_with_list(node: &DocumentNode) -> Result<bool> {
    for child in node.children() {
        match child.view()? {
            NodeView::Text(text) if text.trim().is_empty() => continue,
            NodeView::Element { tag, .. } => return Ok(tag.is_list()),
            NodeView::Text(_) => return Ok(false),
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert;
    use pretty_assertions::assert_eq;

    fn li(text: &str) -> DocumentNode {
        DocumentNode::element("li").with_text(text)
    }

    fn list_of(tag: &str, items: Vec<DocumentNode>) -> DocumentNode {
        let mut list = DocumentNode::element(tag);
        for item in items {
            list.add_child(item);
        }
        list
    }

    fn md(child: DocumentNode) -> String {
        convert(&DocumentNode::element("div").with_child(child)).unwrap()
    }

    #[test]
    fn test_context_numbering() {
        let mut ctx = ListContext::nested(true, None);
        assert_eq!(ctx.indent_level, 2);
        assert_eq!(ctx.marker_column(), 0);
        assert_eq!(ctx.next_bullet(), "1. ");
        assert_eq!(ctx.next_bullet(), "2. ");

        let child = ListContext::nested(false, Some(&ctx));
        assert_eq!(child.indent_level, 4);
        assert_eq!(child.marker_column(), 2);
        assert_eq!(child.next_index, 1);
    }

    #[test]
    fn test_ordered_list() {
        let ol = list_of("ol", vec![li("first"), li("second")]);
        assert_eq!(md(ol), "1. first\n2. second");
    }

    #[test]
    fn test_unordered_list() {
        let ul = list_of("ul", vec![li("One"), li("Two")]);
        assert_eq!(md(ul), "- One\n- Two");
    }

    #[test]
    fn test_ordered_inside_unordered() {
        let inner = list_of("ol", vec![li("x"), li("y")]);
        let outer = list_of(
            "ul",
            vec![li("a"), DocumentNode::element("li").with_text("b").with_child(inner)],
        );
        assert_eq!(md(outer), "- a\n- b\n  1. x\n  2. y");
    }

    #[test]
    fn test_three_levels() {
        let third = list_of("ul", vec![li("c")]);
        let second = list_of("ol", vec![DocumentNode::element("li").with_text("b").with_child(third)]);
        let first = list_of("ul", vec![DocumentNode::element("li").with_text("a").with_child(second)]);
        assert_eq!(md(first), "- a\n  1. b\n    - c");
    }

    #[test]
    fn test_list_wrapped_in_block_inside_item() {
        let wrapped = DocumentNode::element("div").with_child(list_of("ul", vec![li("b")]));
        let item = DocumentNode::element("li").with_text("a").with_child(wrapped);
        assert_eq!(md(list_of("ul", vec![item])), "- a\n  - b");
    }

    #[test]
    fn test_wrapped_and_direct_nesting_agree() {
        let direct = DocumentNode::element("li")
            .with_text("a")
            .with_child(list_of("ol", vec![li("b"), li("c")]));
        let wrapped = DocumentNode::element("li").with_text("a").with_child(
            DocumentNode::element("section")
                .with_child(DocumentNode::element("div").with_child(list_of("ol", vec![li("b"), li("c")]))),
        );
        let direct = md(list_of("ul", vec![direct]));
        assert_eq!(direct, "- a\n  1. b\n  2. c");
        assert_eq!(md(list_of("ul", vec![wrapped])), direct);
    }

    #[test]
    fn test_numbering_restarts_per_list() {
        let nested = list_of("ol", vec![li("inner")]);
        let outer = list_of(
            "ol",
            vec![
                li("one"),
                DocumentNode::element("li").with_text("two").with_child(nested),
                li("three"),
            ],
        );
        let doc = DocumentNode::element("div")
            .with_child(outer)
            .with_child(list_of("ol", vec![li("again")]));
        assert_eq!(
            convert(&doc).unwrap(),
            "1. one\n2. two\n  1. inner\n3. three\n\n1. again"
        );
    }

    #[test]
    fn test_item_continuation_lines() {
        let item = DocumentNode::element("li")
            .with_child(DocumentNode::element("p").with_text("para one"))
            .with_child(DocumentNode::element("p").with_text("para two"));
        let ul = list_of("ul", vec![item, li("next")]);
        assert_eq!(md(ul), "- para one\n\n  para two\n- next");
    }

    #[test]
    fn test_text_after_nested_list() {
        let nested = list_of("ul", vec![li("inner")]);
        let item = DocumentNode::element("li")
            .with_text("before")
            .with_child(nested)
            .with_text("after");
        assert_eq!(md(list_of("ul", vec![item])), "- before\n  - inner\n\n  after");
    }

    #[test]
    fn test_item_starting_with_nested_list() {
        let nested = list_of("ul", vec![li("inner")]);
        let item = DocumentNode::element("li").with_child(nested);
        assert_eq!(md(list_of("ol", vec![item])), "1.\n  - inner");
    }

    #[test]
    fn test_non_item_children_ignored() {
        let ul = list_of("ul", vec![DocumentNode::text("\n  "), li("only"), DocumentNode::element("span")]);
        assert_eq!(md(ul), "- only");
    }

    #[test]
    fn test_orphan_item_uses_implicit_context() {
        assert_eq!(md(li("lonely")), "- lonely");
    }

    #[test]
    fn test_list_after_paragraph() {
        let doc = DocumentNode::element("div")
            .with_child(DocumentNode::element("p").with_text("Intro"))
            .with_child(list_of("ul", vec![li("a")]))
            .with_child(DocumentNode::element("p").with_text("Outro"));
        assert_eq!(convert(&doc).unwrap(), "Intro\n\n- a\n\nOutro");
    }
}

//! Convert a document tree to Markdown text
//!
//! The walker classifies every child of the root, hands it to the matching
//! formatter, and concatenates the fragments in document order. Elements
//! without a rule of their own are passed through to their children.

use crate::list::{self, ListContext};
use crate::node::{DocumentNode, NodeView, Tag};
use crate::normalize::normalize;
use crate::options::ConvertOptions;
use crate::{block, inline, table, ConvertError, Result};

/// Convert the children of `root` to Markdown with default options
pub fn convert(root: &DocumentNode) -> Result<String> {
    convert_with_options(root, &ConvertOptions::default())
}

/// Convert the children of `root` to Markdown.
///
/// `root` itself is the conversion anchor and is not classified; its
/// children are. The assembled output is normalized once.
pub fn convert_with_options(root: &DocumentNode, options: &ConvertOptions) -> Result<String> {
    let walker = Walker { options };
    let mut frame = Frame::root();

    // the anchor still has to honor the node contract
    root.view()?;
    let raw = walker.children(root, &mut frame)?;
    let markdown = normalize(&raw);

    tracing::debug!(
        children = root.children().len(),
        bytes = markdown.len(),
        "converted document tree"
    );
    Ok(markdown)
}

/// Per-recursion state handed down the tree.
///
/// The list context is borrowed from whichever list frame encloses the
/// current node; a nested list creates its own context on its own stack
/// frame, so the enclosing one is back in effect when it returns.
pub(crate) struct Frame<'a> {
    pub list: Option<&'a mut ListContext>,
    pub depth: usize,
}

impl<'a> Frame<'a> {
    fn root() -> Frame<'static> {
        Frame {
            list: None,
            depth: 0,
        }
    }

    /// Frame for the children of the current node
    pub fn descend(&mut self) -> Frame<'_> {
        Frame {
            list: self.list.as_deref_mut(),
            depth: self.depth + 1,
        }
    }

    /// Frame for a descendant found `depth` levels below the root, keeping
    /// the current list context
    pub fn at_depth(&mut self, depth: usize) -> Frame<'_> {
        Frame {
            list: self.list.as_deref_mut(),
            depth,
        }
    }

    /// Frame for the children of the current node under a new list context
    pub fn with_list<'b>(&self, list: &'b mut ListContext) -> Frame<'b> {
        Frame {
            list: Some(list),
            depth: self.depth + 1,
        }
    }
}

/// Recursive dispatcher over a borrowed tree
pub(crate) struct Walker<'o> {
    options: &'o ConvertOptions,
}

impl Walker<'_> {
    /// Convert every child of `node` and concatenate the results
    pub fn children(&self, node: &DocumentNode, frame: &mut Frame) -> Result<String> {
        let mut out = String::new();
        for child in node.children() {
            out.push_str(&self.node(child, &mut frame.descend())?);
        }
        Ok(out)
    }

    /// Deepest node nesting accepted
    pub fn max_depth(&self) -> usize {
        self.options.max_depth
    }

    /// Convert a single node
    pub fn node(&self, node: &DocumentNode, frame: &mut Frame) -> Result<String> {
        if frame.depth > self.max_depth() {
            return Err(ConvertError::TooDeep(self.max_depth()));
        }

        match node.view()? {
            NodeView::Text(text) => Ok(inline::escape_text(text)),
            NodeView::Element { tag, node } => {
                tracing::trace!(?tag, depth = frame.depth, "element");
                self.element(tag, node, frame)
            }
        }
    }

    fn element(&self, tag: Tag, node: &DocumentNode, frame: &mut Frame) -> Result<String> {
        match tag {
            Tag::Heading(level) => block::heading(self, level, node, frame),
            Tag::Paragraph => block::paragraph(self, node, frame),
            Tag::Pre => block::code_block(self, node, frame),
            Tag::Blockquote => block::blockquote(self, node, frame),
            Tag::ThematicBreak => Ok(block::thematic_break()),

            Tag::UnorderedList => list::list(self, false, node, frame),
            Tag::OrderedList => list::list(self, true, node, frame),
            Tag::ListItem => list::list_item(self, node, frame),

            Tag::Table => table::table(self, node, frame),

            Tag::Strong => inline::strong(self, node, frame),
            Tag::Emphasis => inline::emphasis(self, node, frame),
            Tag::Code => inline::code(self, node, frame),
            Tag::Anchor => inline::link(self, node, frame),
            Tag::LineBreak => Ok(inline::line_break()),

            Tag::Removed => Ok(String::new()),

            // rows and cells outside a table carry no structure of their own
            Tag::TableRow | Tag::HeaderCell | Tag::DataCell | Tag::Other => {
                self.children(node, frame)
            }
        }
    }
}

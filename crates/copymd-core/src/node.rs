//! Document tree view consumed by the converter.
//!
//! A [`DocumentNode`] is a snapshot of one node of a rendered document: either a
//! text leaf or a tagged element with ordered children and attributes. Tree
//! providers (an HTML parser, a selection clone, a message container adapter)
//! build these; the converter only ever borrows them.
//!
//! Tag names are classified once into the closed [`Tag`] enumeration, so the
//! formatters never compare tag strings themselves.

use indexmap::IndexMap;

use crate::{ConvertError, Result};

/// Node kinds understood by the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Text leaf
    Text,
    /// Tagged element with children
    Element,
}

/// One node of a document tree.
///
/// Fields are public so adapters can build nodes that do not satisfy the
/// contract; such nodes are rejected with [`ConvertError::InvalidNode`] when
/// the converter reaches them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNode {
    /// Text or element
    pub kind: NodeKind,

    /// Lowercase tag name, present only for elements
    pub tag_name: Option<String>,

    /// Text of a text node
    pub text_content: Option<String>,

    /// Ordered children. Required for elements, ignored for text.
    pub children: Option<Vec<DocumentNode>>,

    /// Attributes in document order
    pub attributes: IndexMap<String, String>,
}

impl DocumentNode {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            kind: NodeKind::Element,
            tag_name: Some(tag_name.to_ascii_lowercase()),
            text_content: None,
            children: Some(Vec::new()),
            attributes: IndexMap::new(),
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut node = Self::element(tag_name);
        for (name, value) in attrs {
            node.set_attr(name, value);
        }
        node
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self {
            kind: NodeKind::Text,
            tag_name: None,
            text_content: Some(content.to_string()),
            children: None,
            attributes: IndexMap::new(),
        }
    }

    /// Builder form of [`add_child`](Self::add_child)
    pub fn with_child(mut self, child: DocumentNode) -> Self {
        self.add_child(child);
        self
    }

    /// Builder form adding a text child
    pub fn with_text(self, content: &str) -> Self {
        self.with_child(Self::text(content))
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Tag name as stored (lowercase when built through the constructors)
    pub fn tag_name(&self) -> Option<&str> {
        self.tag_name.as_deref()
    }

    /// Get an attribute value by name, ignoring ASCII case
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing one of the same name
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let key = name.to_ascii_lowercase();
        self.attributes.insert(key, value.to_string());
    }

    /// Child nodes; empty for text nodes and for elements missing a child list
    pub fn children(&self) -> &[DocumentNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Add a child node
    pub fn add_child(&mut self, child: DocumentNode) {
        self.children.get_or_insert_with(Vec::new).push(child);
    }

    /// Validate this node against the tree contract and classify it.
    pub fn view(&self) -> Result<NodeView<'_>> {
        match self.kind {
            NodeKind::Text => self
                .text_content
                .as_deref()
                .map(NodeView::Text)
                .ok_or_else(|| ConvertError::InvalidNode("text node without text content".into())),
            NodeKind::Element => {
                let tag_name = match self.tag_name.as_deref() {
                    Some(name) if !name.is_empty() => name,
                    _ => {
                        return Err(ConvertError::InvalidNode(
                            "element node without a tag name".into(),
                        ))
                    }
                };
                if self.children.is_none() {
                    return Err(ConvertError::InvalidNode(format!(
                        "<{tag_name}> element without a children list"
                    )));
                }
                Ok(NodeView::Element {
                    tag: Tag::classify(tag_name),
                    node: self,
                })
            }
        }
    }

    /// Raw text of this subtree, concatenated in document order.
    pub fn text_content(&self) -> Result<String> {
        self.text_content_within(0, usize::MAX)
    }

    /// Raw text of this subtree, where `self` sits at `depth` and no node may
    /// sit deeper than `max_depth`.
    pub fn text_content_within(&self, depth: usize, max_depth: usize) -> Result<String> {
        let mut out = String::new();
        let mut pending = vec![(self, depth)];

        while let Some((node, depth)) = pending.pop() {
            if depth > max_depth {
                return Err(ConvertError::TooDeep(max_depth));
            }
            match node.view()? {
                NodeView::Text(text) => out.push_str(text),
                NodeView::Element { node, .. } => {
                    pending.extend(node.children().iter().rev().map(|child| (child, depth + 1)));
                }
            }
        }

        Ok(out)
    }
}

/// A validated, classified node
#[derive(Debug, Clone, Copy)]
pub enum NodeView<'a> {
    /// Text leaf with its content
    Text(&'a str),
    /// Element with its classification
    Element { tag: Tag, node: &'a DocumentNode },
}

/// Closed classification of element tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// `h1`..`h6` with the level
    Heading(u8),
    Paragraph,
    Pre,
    Code,
    Blockquote,
    UnorderedList,
    OrderedList,
    ListItem,
    Table,
    TableRow,
    HeaderCell,
    DataCell,
    Strong,
    Emphasis,
    Anchor,
    LineBreak,
    ThematicBreak,
    /// Interactive widgets and embedded media, dropped with their subtree
    Removed,
    /// Anything else; converted by passing through to the children
    Other,
}

/// Tags whose whole subtree is dropped from the output
pub const REMOVED_TAGS: &[&str] = &[
    "button", "nav", "footer", "form", "input", "textarea", "select", "option", "svg",
    "script", "style", "noscript", "template", "iframe", "video", "audio", "canvas",
    "object", "embed",
];

impl Tag {
    /// Classify a tag name, ignoring ASCII case
    pub fn classify(tag_name: &str) -> Tag {
        let tag = tag_name.to_ascii_lowercase();
        match tag.as_str() {
            "h1" => Tag::Heading(1),
            "h2" => Tag::Heading(2),
            "h3" => Tag::Heading(3),
            "h4" => Tag::Heading(4),
            "h5" => Tag::Heading(5),
            "h6" => Tag::Heading(6),
            "p" => Tag::Paragraph,
            "pre" => Tag::Pre,
            "code" => Tag::Code,
            "blockquote" => Tag::Blockquote,
            "ul" => Tag::UnorderedList,
            "ol" => Tag::OrderedList,
            "li" => Tag::ListItem,
            "table" => Tag::Table,
            "tr" => Tag::TableRow,
            "th" => Tag::HeaderCell,
            "td" => Tag::DataCell,
            "strong" | "b" => Tag::Strong,
            "em" | "i" => Tag::Emphasis,
            "a" => Tag::Anchor,
            "br" => Tag::LineBreak,
            "hr" => Tag::ThematicBreak,
            other if REMOVED_TAGS.contains(&other) => Tag::Removed,
            _ => Tag::Other,
        }
    }

    /// Check if this tag opens a list container
    pub fn is_list(self) -> bool {
        matches!(self, Tag::UnorderedList | Tag::OrderedList)
    }

    /// Check if this tag is a table cell
    pub fn is_cell(self) -> bool {
        matches!(self, Tag::HeaderCell | Tag::DataCell)
    }
}

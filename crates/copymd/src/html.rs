//! HTML parsing support.
//!
//! This module parses HTML strings into the [`DocumentNode`] tree consumed by
//! the converter. The scraper tree is walked with an explicit stack of open
//! elements, so input nesting never turns into native recursion.

use scraper::{Html, Node as ScraperNode};

use copymd_core::{ConvertError, ConvertOptions, DocumentNode};

use crate::Result;

/// Parse an HTML fragment into a node tree with default options.
///
/// The returned node is the synthetic `html` element wrapping the fragment,
/// which serves as the conversion anchor.
///
/// # Example
///
/// ```rust
/// use copymd::parse_html;
///
/// let root = parse_html("<h1>Hello <em>World</em></h1>").unwrap();
/// assert_eq!(copymd_core::convert(&root).unwrap(), "# Hello *World*");
/// ```
pub fn parse_html(html: &str) -> Result<DocumentNode> {
    parse_html_with_options(html, &ConvertOptions::default())
}

/// Parse an HTML fragment, refusing element nesting deeper than
/// `options.max_depth` below the anchor.
pub fn parse_html_with_options(html: &str, options: &ConvertOptions) -> Result<DocumentNode> {
    let document = Html::parse_fragment(html);
    let root = document.root_element();

    // open elements, each with the rest of its scraper children
    let mut open = vec![(element_node(root.value()), root.children())];

    while let Some((_, children)) = open.last_mut() {
        let Some(child) = children.next() else {
            let Some((node, _)) = open.pop() else { break };
            match open.last_mut() {
                Some((parent, _)) => parent.add_child(node),
                None => return Ok(node),
            }
            continue;
        };

        match child.value() {
            ScraperNode::Text(text) => {
                if let Some((parent, _)) = open.last_mut() {
                    parent.add_child(DocumentNode::text(&text.text));
                }
            }
            ScraperNode::Element(element) => {
                if open.len() > options.max_depth {
                    return Err(ConvertError::TooDeep(options.max_depth).into());
                }
                open.push((element_node(element), child.children()));
            }
            // comments, doctypes and processing instructions carry no content
            _ => {}
        }
    }

    Ok(element_node(root.value()))
}

/// Childless copy of a scraper element
fn element_node(element: &scraper::node::Element) -> DocumentNode {
    DocumentNode::element_with_attrs(element.name(), element.attrs().collect())
}

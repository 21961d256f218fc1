//! Pruning of interactive chrome from message containers.
//!
//! Chat pages render action toolbars, copy/share buttons and inputs inside
//! or next to the message body. Before a message container is converted, its
//! snapshot is cloned without those subtrees.

use copymd_core::{DocumentNode, Tag};

/// Attribute test used to recognize chrome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrRule {
    /// Attribute equals the value, ignoring ASCII case
    Equals(String, String),
    /// Attribute contains the value
    Contains(String, String),
}

impl AttrRule {
    fn matches(&self, node: &DocumentNode) -> bool {
        match self {
            AttrRule::Equals(name, value) => node
                .attr(name)
                .is_some_and(|actual| actual.trim().eq_ignore_ascii_case(value)),
            AttrRule::Contains(name, needle) => {
                node.attr(name).is_some_and(|actual| actual.contains(needle.as_str()))
            }
        }
    }
}

/// Decides which subtrees of a message are chrome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeFilter {
    rules: Vec<AttrRule>,
}

impl Default for ChromeFilter {
    fn default() -> Self {
        Self {
            rules: vec![
                AttrRule::Equals("role".into(), "button".into()),
                AttrRule::Contains("data-testid".into(), "copy".into()),
                AttrRule::Contains("data-testid".into(), "share".into()),
                AttrRule::Contains("class".into(), "toolbar".into()),
                AttrRule::Contains("class".into(), "action".into()),
            ],
        }
    }
}

impl ChromeFilter {
    /// A filter that only drops the widget tags
    pub fn tags_only() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add an attribute rule
    pub fn rule(mut self, rule: AttrRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Check if an element is chrome
    pub fn is_chrome(&self, node: &DocumentNode) -> bool {
        if !node.is_element() {
            return false;
        }
        if node.tag_name().map(Tag::classify) == Some(Tag::Removed) {
            return true;
        }
        self.rules.iter().any(|rule| rule.matches(node))
    }

    /// Clone `root` without its chrome descendants.
    ///
    /// The root itself is always kept: it is the container being copied.
    /// The walk keeps its own stack, so arbitrarily deep snapshots are fine.
    pub fn prune(&self, root: &DocumentNode) -> DocumentNode {
        let mut removed = 0usize;
        let mut pruned = None;
        let mut stack = vec![(shell(root), root.children().iter())];

        while let Some((_, children)) = stack.last_mut() {
            match children.next() {
                Some(child) if self.is_chrome(child) => removed += 1,
                Some(child) => stack.push((shell(child), child.children().iter())),
                None => {
                    if let Some((node, _)) = stack.pop() {
                        match stack.last_mut() {
                            Some((parent, _)) => parent.add_child(node),
                            None => pruned = Some(node),
                        }
                    }
                }
            }
        }

        if removed > 0 {
            tracing::debug!(removed, "pruned message chrome");
        }
        pruned.unwrap_or_else(|| shell(root))
    }
}

/// Copy of `node` with an empty child list, or none if it had none
fn shell(node: &DocumentNode) -> DocumentNode {
    DocumentNode {
        kind: node.kind,
        tag_name: node.tag_name.clone(),
        text_content: node.text_content.clone(),
        children: node.children.as_ref().map(|_| Vec::new()),
        attributes: node.attributes.clone(),
    }
}

/// Prune with the default filter
pub fn prune_message(root: &DocumentNode) -> DocumentNode {
    ChromeFilter::default().prune(root)
}

//! copymd-core - document tree to Markdown serialization
//!
//! This crate turns a snapshot of a rendered document tree into canonical
//! Markdown text. It is used by `copymd` (HTML strings and chat message
//! containers) and anything else able to produce a [`DocumentNode`] tree.
//!
//! # Architecture
//!
//! ```text
//!                     ┌──────────┐  inline / block / list / table
//! DocumentNode tree ─▶│  Walker  │ ─────────────────────────────▶ fragments
//!                     └──────────┘                                   │
//!                                               normalize ◀──────────┘
//!                                                   │
//!                                                   ▼
//!                                            Markdown String
//! ```
//!
//! Conversion is a pure function of the tree: no I/O, no shared state, and
//! nothing survives the call. List nesting is tracked by a context living on
//! the stack of the list being converted, so concurrent conversions of
//! separate trees are independent.
//!
//! # Example
//!
//! ```rust
//! use copymd_core::{convert, DocumentNode};
//!
//! let root = DocumentNode::element("div").with_child(
//!     DocumentNode::element("p")
//!         .with_text("Hello ")
//!         .with_child(DocumentNode::element("b").with_text("world")),
//! );
//!
//! assert_eq!(convert(&root).unwrap(), "Hello **world**");
//! ```

mod block;
mod convert;
mod inline;
mod list;
pub mod node;
mod normalize;
mod options;
mod table;

pub use block::{code_fence, language_of};
pub use convert::{convert, convert_with_options};
pub use inline::{code_span, escape_text};
pub use list::ListContext;
pub use node::{DocumentNode, NodeKind, NodeView, Tag, REMOVED_TAGS};
pub use normalize::{normalize, squeeze_blank_lines};
pub use options::{ConvertOptions, DEFAULT_MAX_DEPTH};
pub use table::{Row, TableModel};

/// Error type for conversion
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// The tree breaks the node contract
    #[error("Invalid node: {0}")]
    InvalidNode(String),

    /// The tree nests deeper than the configured bound
    #[error("Tree nesting exceeds the limit of {0} levels")]
    TooDeep(usize),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

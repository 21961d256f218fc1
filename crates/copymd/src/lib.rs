//! # copymd
//!
//! Copy rendered documents and chat messages to the clipboard as Markdown.
//!
//! The conversion itself lives in `copymd-core`; this crate supplies the
//! pieces around it:
//!
//! - **Tree providers**: HTML strings via scraper (`html` feature), and
//!   message containers cleaned of toolbars and buttons ([`ChromeFilter`])
//! - **Snippet modes**: Markdown, quoted, or fenced as plain text ([`CopyMode`])
//! - **Clipboard sinks**: the [`ClipboardSink`] trait with in-memory and
//!   stream-backed implementations
//! - **[`CopyService`]**: settings plus the convert-then-write sequence
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use copymd::{CopyService, CopyStatus, DocumentNode, MemoryClipboard};
//!
//! let service = CopyService::new();
//! let mut clipboard = MemoryClipboard::new();
//!
//! let message = DocumentNode::element("div")
//!     .with_child(DocumentNode::element("h1").with_text("Hello World"));
//!
//! let status = service.copy(&message, &mut clipboard).unwrap();
//! assert_eq!(status, CopyStatus::Copied);
//! assert_eq!(clipboard.contents(), Some("# Hello World"));
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! let markdown = copymd::convert_html("<ol><li>first</li><li>second</li></ol>").unwrap();
//! assert_eq!(markdown, "1. first\n2. second");
//! ```

mod clipboard;
mod extract;
#[cfg(feature = "html")]
pub mod html;
mod service;
mod snippet;

pub use clipboard::{ClipboardSink, MemoryClipboard, WriteOutcome, WriterSink};
pub use copymd_core::{convert, convert_with_options, ConvertError, ConvertOptions, DocumentNode};
pub use extract::{prune_message, AttrRule, ChromeFilter};
#[cfg(feature = "html")]
pub use html::{parse_html, parse_html_with_options};
pub use service::{CopyService, CopyStatus, Settings, MIN_SELECTION_CHARS};
pub use snippet::{to_blockquote, to_code_block, CopyMode};

/// Error type for copy operations
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("Unknown copy mode: {0}")]
    UnknownMode(String),
}

pub type Result<T> = std::result::Result<T, CopyError>;

/// Parse an HTML fragment and convert it to Markdown
#[cfg(feature = "html")]
pub fn convert_html(html: &str) -> Result<String> {
    let root = parse_html(html)?;
    Ok(convert(&root)?)
}

//! Plain-text snippet shapes: quoted selections and code-fenced messages.

use std::fmt;
use std::str::FromStr;

use copymd_core::{code_fence, normalize, squeeze_blank_lines};

use crate::CopyError;

/// How copied content is shaped before it reaches the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyMode {
    /// Markdown rendering of the tree
    #[default]
    Markdown,
    /// Every line prefixed with `> `
    Quote,
    /// Wrapped in a fenced `text` block
    CodeBlock,
}

impl CopyMode {
    /// Apply this mode to already-produced text
    pub fn shape(self, text: &str) -> String {
        match self {
            CopyMode::Markdown => normalize(text),
            CopyMode::Quote => to_blockquote(text),
            CopyMode::CodeBlock => to_code_block(text),
        }
    }
}

impl FromStr for CopyMode {
    type Err = CopyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(CopyMode::Markdown),
            "quote" | "blockquote" => Ok(CopyMode::Quote),
            "code" | "codeblock" | "code-block" => Ok(CopyMode::CodeBlock),
            other => Err(CopyError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for CopyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CopyMode::Markdown => "markdown",
            CopyMode::Quote => "quote",
            CopyMode::CodeBlock => "code",
        })
    }
}

/// Quote a text selection line by line
pub fn to_blockquote(text: &str) -> String {
    let normalized = normalize(text);
    squeeze_blank_lines(&normalized)
        .iter()
        .map(|line| if line.is_empty() { ">".to_string() } else { format!("> {line}") })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap text in a fenced block tagged `text`
pub fn to_code_block(text: &str) -> String {
    let normalized = normalize(text);
    let fence = code_fence(&normalized);
    format!("{fence}text\n{normalized}\n{fence}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blockquote() {
        assert_eq!(to_blockquote("  one\ntwo\n\n\n\nthree  \n"), "> one\n> two\n>\n> three");
    }

    #[test]
    fn test_blockquote_empty() {
        assert_eq!(to_blockquote(" \n "), "");
    }

    #[test]
    fn test_code_block() {
        assert_eq!(to_code_block("\nlet x = 1;\n\n"), "```text\nlet x = 1;\n```");
    }

    #[test]
    fn test_code_block_with_fence_inside() {
        assert_eq!(
            to_code_block("```rust\nfn f() {}\n```"),
            "````text\n```rust\nfn f() {}\n```\n````"
        );
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("Quote".parse::<CopyMode>().unwrap(), CopyMode::Quote);
        assert_eq!("code-block".parse::<CopyMode>().unwrap(), CopyMode::CodeBlock);
        assert_eq!("md".parse::<CopyMode>().unwrap(), CopyMode::Markdown);
        assert!("html".parse::<CopyMode>().is_err());
    }

    #[test]
    fn test_mode_display_round_trips() {
        for mode in [CopyMode::Markdown, CopyMode::Quote, CopyMode::CodeBlock] {
            assert_eq!(mode.to_string().parse::<CopyMode>().unwrap(), mode);
        }
    }
}

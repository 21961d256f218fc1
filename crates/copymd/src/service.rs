//! CopyService - the main entry point for copying trees as Markdown.

use std::fmt;

use copymd_core::{convert_with_options, ConvertOptions, DocumentNode};

use crate::clipboard::ClipboardSink;
use crate::extract::ChromeFilter;
use crate::snippet::CopyMode;
use crate::Result;

/// Selections shorter than this, once trimmed, are not worth copying
pub const MIN_SELECTION_CHARS: usize = 3;

/// Diagnostic used when a sink fails without saying why
const UNKNOWN_FAILURE: &str = "clipboard-write-failed";

/// Settings for CopyService
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Copying is switched on
    pub enabled: bool,

    /// Shape of the copied text
    pub mode: CopyMode,

    /// Options passed to the converter
    pub convert: ConvertOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: CopyMode::Markdown,
            convert: ConvertOptions::default(),
        }
    }
}

/// What a copy request ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyStatus {
    /// Text reached the sink
    Copied,
    /// The tree or selection held no text
    NothingToCopy,
    /// The sink refused the text
    Failed(String),
    /// Copying is switched off in the settings
    Disabled,
}

impl CopyStatus {
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyStatus::Copied)
    }
}

impl fmt::Display for CopyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyStatus::Copied => f.write_str("Copied to Markdown"),
            CopyStatus::NothingToCopy => f.write_str("Nothing to copy"),
            CopyStatus::Failed(diagnostic) => write!(f, "Copy failed: {diagnostic}"),
            CopyStatus::Disabled => f.write_str("Copying is disabled"),
        }
    }
}

/// The main service for copying document trees to a clipboard
pub struct CopyService {
    settings: Settings,
    filter: ChromeFilter,
}

impl CopyService {
    /// Create a new CopyService with default settings
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            filter: ChromeFilter::default(),
        }
    }

    /// Create a CopyService with custom settings
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            filter: ChromeFilter::default(),
        }
    }

    /// Replace the filter used by [`copy_message`](Self::copy_message)
    pub fn filter(&mut self, filter: ChromeFilter) -> &mut Self {
        self.filter = filter;
        self
    }

    /// Get the current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get mutable access to settings
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Switch copying on or off
    pub fn set_enabled(&mut self, enabled: bool) -> &mut Self {
        self.settings.enabled = enabled;
        self
    }

    /// Render a tree in the configured mode without copying it
    pub fn render(&self, root: &DocumentNode) -> Result<String> {
        let markdown = convert_with_options(root, &self.settings.convert)?;
        Ok(self.settings.mode.shape(&markdown))
    }

    /// Convert a tree snapshot, such as a cloned selection, and copy it.
    ///
    /// Conversion finishes before the sink is called.
    pub fn copy(&self, root: &DocumentNode, sink: &mut dyn ClipboardSink) -> Result<CopyStatus> {
        if !self.settings.enabled {
            return Ok(CopyStatus::Disabled);
        }
        let text = self.render(root)?;
        Ok(self.deliver(&text, sink))
    }

    /// Copy a chat message container, leaving out its interactive chrome
    pub fn copy_message(&self, message: &DocumentNode, sink: &mut dyn ClipboardSink) -> Result<CopyStatus> {
        let pruned = self.filter.prune(message);
        self.copy(&pruned, sink)
    }

    /// Copy a plain-text selection in the configured mode
    pub fn copy_text(&self, selection: &str, sink: &mut dyn ClipboardSink) -> CopyStatus {
        if !self.settings.enabled {
            return CopyStatus::Disabled;
        }
        if selection.trim().chars().count() < MIN_SELECTION_CHARS {
            return CopyStatus::NothingToCopy;
        }
        let text = self.settings.mode.shape(selection);
        self.deliver(&text, sink)
    }

    /// Parse an HTML fragment and copy it as a message
    #[cfg(feature = "html")]
    pub fn copy_html(&self, html: &str, sink: &mut dyn ClipboardSink) -> Result<CopyStatus> {
        let root = crate::html::parse_html_with_options(html, &self.settings.convert)?;
        self.copy_message(&root, sink)
    }

    fn deliver(&self, text: &str, sink: &mut dyn ClipboardSink) -> CopyStatus {
        if text.trim().is_empty() {
            return CopyStatus::NothingToCopy;
        }

        let outcome = sink.write(text);
        if outcome.success {
            tracing::debug!(bytes = text.len(), mode = %self.settings.mode, "copied");
            CopyStatus::Copied
        } else {
            let diagnostic = outcome
                .diagnostic
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| UNKNOWN_FAILURE.to_string());
            tracing::warn!(%diagnostic, "clipboard write failed");
            CopyStatus::Failed(diagnostic)
        }
    }
}

impl Default for CopyService {
    fn default() -> Self {
        Self::new()
    }
}

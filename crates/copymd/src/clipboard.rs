//! Clipboard sinks receiving the converted text.

use std::io::Write;

/// Result of one clipboard write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub success: bool,
    /// Short reason for a failed write
    pub diagnostic: Option<String>,
}

impl WriteOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            diagnostic: None,
        }
    }

    pub fn failed(diagnostic: impl Into<String>) -> Self {
        Self {
            success: false,
            diagnostic: Some(diagnostic.into()),
        }
    }
}

/// Destination of copied text.
///
/// Sinks report failure through [`WriteOutcome`] instead of an error; the
/// converter never sees what happens here.
pub trait ClipboardSink {
    fn write(&mut self, text: &str) -> WriteOutcome;
}

/// In-memory clipboard keeping every write
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    writes: Vec<String>,
    fail_with: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard rejecting every write with `diagnostic`
    pub fn failing(diagnostic: &str) -> Self {
        Self {
            writes: Vec::new(),
            fail_with: Some(diagnostic.to_string()),
        }
    }

    /// Most recent successful write
    pub fn contents(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }

    pub fn writes(&self) -> &[String] {
        &self.writes
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write(&mut self, text: &str) -> WriteOutcome {
        match &self.fail_with {
            Some(diagnostic) => WriteOutcome::failed(diagnostic.clone()),
            None => {
                self.writes.push(text.to_string());
                WriteOutcome::ok()
            }
        }
    }
}

/// Sink writing each copy to an output stream, newline terminated
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ClipboardSink for WriterSink<W> {
    fn write(&mut self, text: &str) -> WriteOutcome {
        let written = writeln!(self.inner, "{text}").and_then(|_| self.inner.flush());
        match written {
            Ok(()) => WriteOutcome::ok(),
            Err(err) => WriteOutcome::failed(err.kind().to_string()),
        }
    }
}

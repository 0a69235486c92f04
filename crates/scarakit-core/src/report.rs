//! Operator-facing diagnostics
//!
//! Every echoed line and diagnostic goes to a [`Reporter`]. The usual setup is a
//! [`FanoutReporter`] that mirrors the text to the console and to a persistent log file.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// A sink for diagnostic text. Each call reports one line; sinks add the line ending.
pub trait Reporter {
    fn report(&mut self, text: &str) -> Result<()>;
}

/// Writes to standard output.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl Reporter for ConsoleSink {
    fn report(&mut self, text: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", text)?;
        out.flush()?;
        Ok(())
    }
}

/// Appends to a log file, truncated when the sink is created.
#[derive(Debug)]
pub struct LogFileSink {
    path: PathBuf,
    file: File,
}

impl LogFileSink {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| {
            Error::other(format!("Cannot open {} for writing: {}", path.display(), e))
        })?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Reporter for LogFileSink {
    fn report(&mut self, text: &str) -> Result<()> {
        writeln!(self.file, "{}", text)?;
        self.file.flush()?;
        Ok(())
    }
}

/// Keeps reported lines in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }
}

impl Reporter for MemorySink {
    fn report(&mut self, text: &str) -> Result<()> {
        let mut lines = self
            .lines
            .lock()
            .map_err(|e| Error::other(format!("Failed to lock report buffer: {}", e)))?;
        lines.push(text.to_string());
        Ok(())
    }
}

/// Duplicates every report to all of its sinks.
///
/// All sinks are attempted even if one fails; the first failure is returned.
#[derive(Default)]
pub struct FanoutReporter {
    sinks: Vec<Box<dyn Reporter>>,
}

impl FanoutReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: impl Reporter + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn add_sink(&mut self, sink: Box<dyn Reporter>) {
        self.sinks.push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Reporter for FanoutReporter {
    fn report(&mut self, text: &str) -> Result<()> {
        let mut first_error = None;
        for sink in self.sinks.iter_mut() {
            if let Err(e) = sink.report(text) {
                tracing::warn!("Report sink failed: {}", e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

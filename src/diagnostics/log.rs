//! File-backed diagnostic sink.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::error;

use super::{Diagnostic, DiagnosticSink};
use crate::error::{EngineResult, PayrollError};

/// Appends diagnostic lines to a log file and mirrors them to stderr.
///
/// The file is opened in append mode for each diagnostic, so nothing is
/// created until the first problem is reported. Writes are serialized by an
/// internal lock.
#[derive(Debug)]
pub struct DiagnosticLog {
    path: PathBuf,
    mirror_to_stderr: bool,
    lock: Mutex<()>,
}

impl DiagnosticLog {
    /// Creates a log writing to `path` and mirroring to stderr.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mirror_to_stderr: true,
            lock: Mutex::new(()),
        }
    }

    /// Enables or disables the stderr mirror.
    pub fn with_stderr_mirror(mut self, enabled: bool) -> Self {
        self.mirror_to_stderr = enabled;
        self
    }

    /// Returns the path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, line: &str) -> EngineResult<()> {
        let to_error = |e: std::io::Error| PayrollError::DiagnosticLog {
            path: self.path.display().to_string(),
            message: e.to_string(),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(to_error)?;
        writeln!(file, "{line}").map_err(to_error)
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn report(&self, diagnostic: Diagnostic) {
        let line = diagnostic.line();
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Err(err) = self.append(&line) {
            error!(error = %err, "Diagnostic could not be written to the log file");
        }
        if self.mirror_to_stderr {
            eprintln!("{line}");
        }
    }
}

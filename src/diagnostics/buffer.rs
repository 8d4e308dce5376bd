//! In-memory diagnostic sink.

use std::sync::{Mutex, MutexGuard};

use super::{Diagnostic, DiagnosticSink};

/// Collects diagnostics in memory, in the order they were reported.
#[derive(Debug, Default)]
pub struct DiagnosticBuffer {
    entries: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every diagnostic reported so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries().clone()
    }

    /// Removes and returns every diagnostic reported so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries())
    }

    /// Returns the number of diagnostics held.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns true if nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticSink for DiagnosticBuffer {
    fn report(&self, diagnostic: Diagnostic) {
        self.entries().push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;

    fn load_failure(detail: &str) -> Diagnostic {
        Diagnostic::new(DiagnosticKind::LoadFailure {
            detail: detail.to_string(),
        })
    }

    #[test]
    fn test_keeps_report_order() {
        let buffer = DiagnosticBuffer::new();
        buffer.report(load_failure("first"));
        buffer.report(load_failure("second"));

        let messages: Vec<_> = buffer.diagnostics().iter().map(Diagnostic::message).collect();
        assert!(messages[0].ends_with("first"));
        assert!(messages[1].ends_with("second"));
    }

    #[test]
    fn test_take_empties_buffer() {
        let buffer = DiagnosticBuffer::new();
        buffer.report(load_failure("x"));

        assert_eq!(buffer.take().len(), 1);
        assert!(buffer.is_empty());
    }
}

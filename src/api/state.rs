//! Application state for the Punch Payroll Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::TierPolicy;
use crate::diagnostics::DiagnosticSink;

/// A diagnostic sink that can be shared between request handlers.
pub type SharedSink = Arc<dyn DiagnosticSink + Send + Sync>;

/// Shared application state.
///
/// Holds the tier policy applied to every request and the sink that
/// receives each request's diagnostics after the run completes.
#[derive(Clone)]
pub struct AppState {
    policy: Arc<TierPolicy>,
    sink: SharedSink,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(policy: TierPolicy, sink: SharedSink) -> Self {
        Self {
            policy: Arc::new(policy),
            sink,
        }
    }

    /// Returns the tier policy.
    pub fn policy(&self) -> &TierPolicy {
        &self.policy
    }

    /// Returns the shared diagnostic sink.
    pub fn sink(&self) -> &SharedSink {
        &self.sink
    }
}

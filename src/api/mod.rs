//! HTTP API module for the Punch Payroll Engine.
//!
//! This module provides the REST endpoint for calculating payroll from a
//! posted punch document.

mod handlers;
mod response;
mod state;

pub use handlers::{create_router, serve};
pub use response::{ApiError, DiagnosticEntry, PayrollResponse};
pub use state::{AppState, SharedSink};

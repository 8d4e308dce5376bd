//! HTTP request handlers for the Punch Payroll Engine API.
//!
//! This module contains the router, the handler for `POST /payroll`, and
//! the server entry point.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calculation::run_payroll;
use crate::diagnostics::{Diagnostic, DiagnosticBuffer, DiagnosticKind, DiagnosticSink};
use crate::error::{EngineResult, PayrollError};
use crate::input::parse_document;

use super::response::{ApiErrorResponse, DiagnosticEntry, PayrollResponse};
use super::state::{AppState, SharedSink};

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll", post(payroll_handler))
        .with_state(state)
}

/// Binds `address` and serves the API until the process is stopped.
pub async fn serve(address: &str, state: AppState) -> EngineResult<()> {
    let to_error = |e: std::io::Error| PayrollError::Server {
        address: address.to_string(),
        message: e.to_string(),
    };

    let listener = TcpListener::bind(address).await.map_err(to_error)?;
    info!(%address, "Payroll API listening");

    axum::serve(listener, create_router(state))
        .await
        .map_err(to_error)
}

/// Handler for POST /payroll endpoint.
///
/// Accepts a payroll document and returns the results for every employee
/// that could be processed together with the run's diagnostics. Diagnostics
/// are also forwarded to the shared sink.
async fn payroll_handler(State(state): State<AppState>, body: String) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let document = match parse_document(&body, "request body") {
        Ok(document) => document,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payroll document rejected"
            );
            let load_failure = Diagnostic::new(DiagnosticKind::LoadFailure {
                detail: err.to_string(),
            });
            forward_diagnostics(state.sink(), vec![load_failure], correlation_id).await;
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let start_time = Instant::now();
    let buffer = DiagnosticBuffer::new();
    let results = run_payroll(&document, state.policy(), &buffer);
    let diagnostics = buffer.take();

    forward_diagnostics(state.sink(), diagnostics.clone(), correlation_id).await;

    info!(
        correlation_id = %correlation_id,
        employees = document.employee_data.len(),
        calculated = results.len(),
        diagnostics = diagnostics.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Payroll request completed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(PayrollResponse {
            correlation_id,
            results,
            diagnostics: diagnostics.iter().map(DiagnosticEntry::from).collect(),
        }),
    )
        .into_response()
}

/// Hands a request's diagnostics to the shared sink.
///
/// Sinks may do blocking file I/O, so the writes run on the blocking pool.
/// They complete before the response is sent.
async fn forward_diagnostics(sink: &SharedSink, diagnostics: Vec<Diagnostic>, correlation_id: Uuid) {
    if diagnostics.is_empty() {
        return;
    }

    let sink = Arc::clone(sink);
    let forwarded = tokio::task::spawn_blocking(move || {
        for diagnostic in diagnostics {
            sink.report(diagnostic);
        }
    })
    .await;

    if let Err(err) = forwarded {
        error!(
            correlation_id = %correlation_id,
            error = %err,
            "Diagnostics could not be forwarded"
        );
    }
}

//! Punch Payroll Engine
//!
//! This crate turns employee time punches and per-job pay rates into a
//! payroll summary: hours allocated to the Regular, Overtime and Doubletime
//! tiers, total wages and total benefits, per employee.
//!
//! The core is [`calculation::TierAllocator`], which consumes an employee's
//! punches in order and cascades hours that overflow one tier into the next.
//! All hour and currency arithmetic uses [`rust_decimal::Decimal`] so tier
//! boundaries are reached exactly.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod input;
pub mod models;
pub mod telemetry;

// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording store activity.
//!
//! Every store call is captured as a [`DiagnosticEvent`], kept in a
//! memory-bounded circular buffer, and can be exported as a JSON report
//! for troubleshooting (why did this toast vanish? who closed it?).
//!
//! # Architecture
//!
//! - [`DiagnosticsHandle`]: Cloneable, thread-safe, non-blocking sender
//! - [`DiagnosticsCollector`]: Drains handles into a [`CircularBuffer`] and exports reports
//! - [`DiagnosticEventKind`]: What happened to which notification

mod buffer;
mod collector;
mod events;
mod export;
mod report;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, RemovalReason, TimerChange};
pub use export::{generate_default_filename, write_atomic, ExportError};
pub use report::{DiagnosticReport, ReportMetadata, SerializableEvent};

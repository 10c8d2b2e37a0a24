// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for store activity.
//!
//! One event is recorded per store call, so a report shows exactly how a
//! notification moved through its lifecycle.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::notifications::{Kind, NotificationId};

/// Why a notification left the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    /// Explicit `remove` call from application code.
    Removed,
    /// Its auto-dismiss timer fired.
    Expired,
    /// The user closed it.
    Dismissed,
    /// The user triggered its action.
    Activated,
}

/// Effect of an update on the notification's timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum TimerChange {
    Unchanged,
    Armed { duration_ms: u64 },
    Cancelled,
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    /// The type and data of the event
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    Added {
        id: NotificationId,
        kind: Kind,
        /// Resolved auto-dismiss delay, 0 when the notification sticks.
        duration_ms: u64,
    },
    Updated {
        id: NotificationId,
        /// Kind after the merge.
        kind: Kind,
        timer: TimerChange,
    },
    /// Update for an id that is not in the collection.
    UpdateIgnored { id: NotificationId },
    Removed {
        id: NotificationId,
        reason: RemovalReason,
    },
    /// The user tried to close a non-dismissible notification.
    DismissRejected { id: NotificationId },
    Cleared { count: usize },
}

impl DiagnosticEventKind {
    /// The notification this event is about, if it concerns a single one.
    #[must_use]
    pub fn notification_id(&self) -> Option<NotificationId> {
        match self {
            Self::Added { id, .. }
            | Self::Updated { id, .. }
            | Self::UpdateIgnored { id }
            | Self::Removed { id, .. }
            | Self::DismissRejected { id } => Some(*id),
            Self::Cleared { .. } => None,
        }
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` record held by the store, the
//! `Kind` enum that drives its defaults, and the two input shapes callers
//! hand to the store: [`NewNotification`] for `add` and
//! [`NotificationPatch`] for `update`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
///
/// Assigned by the store that created the notification and never reused
/// by that store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl NotificationId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of notification; determines default duration and dismissibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Operation completed successfully.
    Success,
    /// Operation failed.
    Error,
    /// Something the user should look at, nothing failed.
    Warning,
    /// Plain informational message.
    #[default]
    Info,
    /// Operation still in progress. Sticks until updated or removed.
    Loading,
}

impl Kind {
    pub const ALL: [Kind; 5] = [
        Kind::Success,
        Kind::Error,
        Kind::Warning,
        Kind::Info,
        Kind::Loading,
    ];

    #[must_use]
    pub fn is_loading(self) -> bool {
        matches!(self, Kind::Loading)
    }

    /// Loading notifications cannot be closed by the user unless told otherwise.
    #[must_use]
    pub fn default_dismissible(self) -> bool {
        !self.is_loading()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Success => "success",
            Kind::Error => "error",
            Kind::Warning => "warning",
            Kind::Info => "info",
            Kind::Loading => "loading",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown kind name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown notification kind: {}", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for Kind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Kind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Progress bar value in percent, clamped to `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Progress(f32);

impl Progress {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 100.0;

    /// Creates a progress value. NaN is treated as zero.
    #[must_use]
    pub fn new(percent: f32) -> Self {
        if percent.is_nan() {
            return Self(Self::MIN);
        }
        Self(percent.clamp(Self::MIN, Self::MAX))
    }

    /// Progress for `done` out of `total` steps.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // step counts stay far below f32 precision limits
    pub fn from_ratio(done: usize, total: usize) -> Self {
        if total == 0 {
            return Self(Self::MAX);
        }
        Self::new(done as f32 / total as f32 * Self::MAX)
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    #[must_use]
    pub fn is_complete(self) -> bool {
        self.0 >= Self::MAX
    }
}

/// A single user-triggered follow-up attached to a notification.
///
/// The notification owns the callback. A callback that needs the store
/// should capture a [`crate::notifications::WeakStore`]; a captured
/// `Store` keeps the store alive for as long as the notification exists.
#[derive(Clone)]
pub struct Action {
    label: String,
    on_activate: Arc<dyn Fn() + Send + Sync>,
}

impl Action {
    pub fn new(label: impl Into<String>, on_activate: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            on_activate: Arc::new(on_activate),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Runs the callback.
    pub fn activate(&self) {
        (self.on_activate)();
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// A notification currently held by a store.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    kind: Kind,
    title: String,
    message: Option<String>,
    /// `Duration::ZERO` means the notification never auto-dismisses.
    duration: Duration,
    dismissible: bool,
    progress: Option<Progress>,
    action: Option<Action>,
    created_at: Instant,
    updated_at: Instant,
}

impl Notification {
    /// Resolves the defaults of `input` and stamps it with `id`.
    pub(crate) fn from_input(id: NotificationId, input: NewNotification, default_duration: Duration) -> Self {
        let now = Instant::now();
        Self {
            id,
            kind: input.kind,
            title: input.title,
            message: input.message,
            duration: input.duration.unwrap_or(default_duration),
            dismissible: input
                .dismissible
                .unwrap_or_else(|| input.kind.default_dismissible()),
            progress: input.progress,
            action: input.action,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn dismissible(&self) -> bool {
        self.dismissible
    }

    #[must_use]
    pub fn progress(&self) -> Option<Progress> {
        self.progress
    }

    #[must_use]
    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> Instant {
        self.updated_at
    }

    /// Returns the age of this notification.
    #[must_use]
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Returns whether a timer removes this notification.
    #[must_use]
    pub fn auto_dismisses(&self) -> bool {
        !self.duration.is_zero()
    }

    /// Merges `patch` into this record and decides what happens to its timer.
    ///
    /// `default_duration_for` supplies the configured duration of a kind;
    /// it is consulted only when the record leaves the loading state without
    /// an explicit duration.
    pub(crate) fn apply(
        &mut self,
        patch: NotificationPatch,
        default_duration_for: impl Fn(Kind) -> Duration,
    ) -> TimerDirective {
        let was_loading = self.kind.is_loading();
        let NotificationPatch {
            kind,
            title,
            message,
            duration,
            dismissible,
            progress,
            action,
        } = patch;

        if let Some(kind) = kind {
            self.kind = kind;
        }
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(message) = message {
            self.message = message;
        }
        if let Some(progress) = progress {
            self.progress = progress;
        }
        if let Some(action) = action {
            self.action = action;
        }
        if let Some(duration) = duration {
            self.duration = duration;
        }
        if let Some(dismissible) = dismissible {
            self.dismissible = dismissible;
        }
        self.updated_at = Instant::now();

        let is_loading = self.kind.is_loading();
        if was_loading != is_loading {
            if duration.is_none() {
                if is_loading {
                    self.duration = Duration::ZERO;
                } else if self.duration.is_zero() {
                    self.duration = default_duration_for(self.kind);
                }
            }
            if dismissible.is_none() {
                self.dismissible = self.kind.default_dismissible();
            }
            return TimerDirective::for_duration(self.duration);
        }

        match duration {
            Some(duration) => TimerDirective::for_duration(duration),
            None => TimerDirective::Keep,
        }
    }
}

/// What the store must do with a record's timer after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerDirective {
    /// Leave any pending timer alone.
    Keep,
    /// Cancel any pending timer.
    Cancel,
    /// Cancel any pending timer and schedule a new one.
    Arm(Duration),
}

impl TimerDirective {
    fn for_duration(duration: Duration) -> Self {
        if duration.is_zero() {
            TimerDirective::Cancel
        } else {
            TimerDirective::Arm(duration)
        }
    }
}

/// Input for [`crate::notifications::Store::add`].
///
/// Every field except `kind` and `title` is optional; the store fills in
/// `duration` and `dismissible` from the kind when they are unset.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub(crate) kind: Kind,
    pub(crate) title: String,
    pub(crate) message: Option<String>,
    pub(crate) duration: Option<Duration>,
    pub(crate) dismissible: Option<bool>,
    pub(crate) progress: Option<Progress>,
    pub(crate) action: Option<Action>,
}

impl NewNotification {
    pub fn new(kind: Kind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: None,
            duration: None,
            dismissible: None,
            progress: None,
            action: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(Kind::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(Kind::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(Kind::Warning, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(Kind::Info, title)
    }

    pub fn loading(title: impl Into<String>) -> Self {
        Self::new(Kind::Loading, title)
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the auto-dismiss delay. `Duration::ZERO` disables auto-dismiss.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Shorthand for a zero duration.
    #[must_use]
    pub fn persistent(self) -> Self {
        self.duration(Duration::ZERO)
    }

    #[must_use]
    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }

    #[must_use]
    pub fn progress(mut self, progress: Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }
}

/// Partial update for [`crate::notifications::Store::update`].
///
/// Unset fields keep their current value. Optional-valued fields use a
/// nested `Option`: `Some(None)` clears the value.
#[derive(Debug, Clone, Default)]
pub struct NotificationPatch {
    pub(crate) kind: Option<Kind>,
    pub(crate) title: Option<String>,
    pub(crate) message: Option<Option<String>>,
    pub(crate) duration: Option<Duration>,
    pub(crate) dismissible: Option<bool>,
    pub(crate) progress: Option<Option<Progress>>,
    pub(crate) action: Option<Option<Action>>,
}

impl NotificationPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch turning a notification into `kind` with a new title.
    pub fn resolve(kind: Kind, title: impl Into<String>) -> Self {
        Self::new().kind(kind).title(title)
    }

    #[must_use]
    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(Some(message.into()));
        self
    }

    #[must_use]
    pub fn clear_message(mut self) -> Self {
        self.message = Some(None);
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }

    #[must_use]
    pub fn progress(mut self, progress: Progress) -> Self {
        self.progress = Some(Some(progress));
        self
    }

    #[must_use]
    pub fn clear_progress(mut self) -> Self {
        self.progress = Some(None);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(Some(action));
        self
    }

    #[must_use]
    pub fn clear_action(mut self) -> Self {
        self.action = Some(None);
        self
    }

    /// Returns the kind this patch sets, if any.
    #[must_use]
    pub fn kind_change(&self) -> Option<Kind> {
        self.kind
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.title.is_none()
            && self.message.is_none()
            && self.duration.is_none()
            && self.dismissible.is_none()
            && self.progress.is_none()
            && self.action.is_none()
    }
}

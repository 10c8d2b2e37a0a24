// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The [`Store`] owns the ordered collection of active notifications and
//! their auto-dismiss timers. It is a cheap, cloneable handle: build one at
//! startup and hand clones to every producer (event handlers, background
//! jobs) and to the renderer, which follows changes through
//! [`Store::subscribe`].
//!
//! No operation can fail. Unknown ids are tolerated everywhere because late
//! updates (a job finishing after the user closed its toast) are expected.

use super::notification::{
    Notification, NotificationId, NotificationPatch, NewNotification, Progress, TimerDirective,
};
use super::timer::TimerTable;
use crate::config::StoreSettings;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle, RemovalReason, TimerChange};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;

/// Ordered view of the collection, oldest first.
pub type Snapshot = Arc<[Notification]>;

/// Messages a renderer sends back on user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The user clicked the close button.
    Dismiss(NotificationId),
    /// The user clicked the action button.
    Activate(NotificationId),
}

/// Where a notification stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// In the collection with an auto-dismiss timer running.
    ActivePendingTimer,
    /// In the collection, stays until updated or removed.
    ActiveNoTimer,
    /// Not in the collection. Terminal.
    Removed,
}

#[derive(Debug, Default)]
struct State {
    entries: Vec<Notification>,
    timers: TimerTable,
    last_id: u64,
}

impl State {
    fn position(&self, id: NotificationId) -> Option<usize> {
        self.entries.iter().position(|n| n.id() == id)
    }
}

#[derive(Debug)]
struct Inner {
    state: Mutex<State>,
    settings: StoreSettings,
    runtime: Handle,
    snapshot_tx: watch::Sender<Snapshot>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, State> {
        // Every mutation leaves the state consistent before anything can panic.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, entries: &[Notification]) {
        self.snapshot_tx.send_replace(Arc::from(entries.to_vec()));
    }

    fn record(&self, kind: DiagnosticEventKind) {
        if let Some(handle) = &self.diagnostics {
            handle.log(kind);
        }
    }

    /// Called by a timer task once its delay has elapsed.
    fn expire(&self, id: NotificationId, generation: u64) {
        {
            let mut state = self.lock();
            if !state.timers.claim_expired(id, generation) {
                return;
            }
            let Some(index) = state.position(id) else {
                return;
            };
            state.entries.remove(index);
            self.publish(&state.entries);
        }
        self.record(DiagnosticEventKind::Removed {
            id,
            reason: RemovalReason::Expired,
        });
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        state.timers.cancel_all();
    }
}

/// Builder for a [`Store`].
#[derive(Debug, Default)]
pub struct StoreBuilder {
    settings: StoreSettings,
    runtime: Option<Handle>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl StoreBuilder {
    #[must_use]
    pub fn settings(mut self, settings: StoreSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Runtime that runs the auto-dismiss timers.
    #[must_use]
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Records every store mutation through `handle`.
    #[must_use]
    pub fn diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.diagnostics = Some(handle);
        self
    }

    /// # Panics
    ///
    /// Panics if no runtime was given and this is called outside a tokio runtime.
    #[must_use]
    pub fn build(self) -> Store {
        let (snapshot_tx, _) = watch::channel(Snapshot::from(Vec::new()));
        Store {
            inner: Arc::new(Inner {
                state: Mutex::new(State::default()),
                settings: self.settings,
                runtime: self.runtime.unwrap_or_else(Handle::current),
                snapshot_tx,
                diagnostics: self.diagnostics,
            }),
        }
    }
}

/// Process-wide collection of active notifications.
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

impl Store {
    /// Creates an empty store whose timers run on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime; use
    /// [`StoreBuilder::runtime`] in that case.
    #[must_use]
    pub fn new(settings: StoreSettings) -> Self {
        Self::builder().settings(settings).build()
    }

    #[must_use]
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Creates a handle that does not keep the store alive.
    ///
    /// Action callbacks that call back into the store should capture this
    /// instead of a `Store` clone. A notification owning a strong handle
    /// keeps its own store alive until it is removed.
    #[must_use]
    pub fn downgrade(&self) -> WeakStore {
        WeakStore {
            inner: Arc::downgrade(&self.inner),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &StoreSettings {
        &self.inner.settings
    }

    /// Appends a notification and returns its id.
    ///
    /// Unset `duration` and `dismissible` are filled in from the kind. A
    /// timer removing the notification is armed when the duration is not
    /// zero.
    pub fn add(&self, input: NewNotification) -> NotificationId {
        let default_duration = self.inner.settings.default_duration_for(input.kind());
        let (id, kind, duration) = {
            let mut guard = self.inner.lock();
            let state = &mut *guard;
            state.last_id += 1;
            let id = NotificationId::from_raw(state.last_id);
            let notification = Notification::from_input(id, input, default_duration);
            let (kind, duration) = (notification.kind(), notification.duration());
            state.entries.push(notification);
            if !duration.is_zero() {
                self.arm(&mut state.timers, id, duration);
            }
            self.inner.publish(&state.entries);
            (id, kind, duration)
        };
        self.inner.record(DiagnosticEventKind::Added {
            id,
            kind,
            duration_ms: millis(duration),
        });
        id
    }

    /// Merges `patch` into the notification `id`.
    ///
    /// Returns `false`, without doing anything, when `id` is not in the
    /// collection. Leaving the loading kind arms a timer with the effective
    /// duration; see [`NotificationPatch`] for the full timer rules.
    pub fn update(&self, id: NotificationId, patch: NotificationPatch) -> bool {
        let settings = self.inner.settings;
        let outcome = {
            let mut guard = self.inner.lock();
            let state = &mut *guard;
            match state.entries.iter_mut().find(|n| n.id() == id) {
                None => None,
                Some(entry) => {
                    let directive = entry.apply(patch, |kind| settings.default_duration_for(kind));
                    let kind = entry.kind();
                    let timer = match directive {
                        TimerDirective::Keep => TimerChange::Unchanged,
                        TimerDirective::Cancel => {
                            if state.timers.cancel(id) {
                                TimerChange::Cancelled
                            } else {
                                TimerChange::Unchanged
                            }
                        }
                        TimerDirective::Arm(duration) => {
                            self.arm(&mut state.timers, id, duration);
                            TimerChange::Armed {
                                duration_ms: millis(duration),
                            }
                        }
                    };
                    self.inner.publish(&state.entries);
                    Some((kind, timer))
                }
            }
        };

        match outcome {
            Some((kind, timer)) => {
                self.inner
                    .record(DiagnosticEventKind::Updated { id, kind, timer });
                true
            }
            None => {
                self.inner.record(DiagnosticEventKind::UpdateIgnored { id });
                false
            }
        }
    }

    /// Updates only the progress bar of `id`.
    pub fn set_progress(&self, id: NotificationId, progress: Progress) -> bool {
        self.update(id, NotificationPatch::new().progress(progress))
    }

    /// Removes `id` and cancels its timer. Idempotent.
    pub fn remove(&self, id: NotificationId) -> bool {
        self.remove_with_reason(id, RemovalReason::Removed)
    }

    /// User-initiated close. Refused for non-dismissible notifications.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let dismissible = {
            let state = self.inner.lock();
            state
                .entries
                .iter()
                .find(|n| n.id() == id)
                .map(Notification::dismissible)
        };
        match dismissible {
            Some(true) => self.remove_with_reason(id, RemovalReason::Dismissed),
            Some(false) => {
                self.inner
                    .record(DiagnosticEventKind::DismissRejected { id });
                false
            }
            None => false,
        }
    }

    /// Runs the action of `id`, then removes it.
    ///
    /// Returns `false` when `id` is unknown or carries no action. The
    /// callback runs after the store lock is released, so it may call back
    /// into the store through a [`WeakStore`].
    pub fn activate(&self, id: NotificationId) -> bool {
        let action = {
            let mut guard = self.inner.lock();
            let state = &mut *guard;
            let Some(index) = state.position(id) else {
                return false;
            };
            let Some(action) = state.entries[index].action().cloned() else {
                return false;
            };
            state.entries.remove(index);
            state.timers.cancel(id);
            self.inner.publish(&state.entries);
            action
        };
        action.activate();
        self.inner.record(DiagnosticEventKind::Removed {
            id,
            reason: RemovalReason::Activated,
        });
        true
    }

    /// Empties the collection and cancels every pending timer.
    pub fn clear_all(&self) {
        let count = {
            let mut guard = self.inner.lock();
            let state = &mut *guard;
            let count = state.entries.len();
            state.entries.clear();
            state.timers.cancel_all();
            if count > 0 {
                self.inner.publish(&state.entries);
            }
            count
        };
        self.inner.record(DiagnosticEventKind::Cleared { count });
    }

    /// Handles a renderer message.
    pub fn handle_message(&self, message: &Message) {
        match *message {
            Message::Dismiss(id) => {
                self.dismiss(id);
            }
            Message::Activate(id) => {
                self.activate(id);
            }
        }
    }

    /// Returns a copy of the notification `id`.
    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<Notification> {
        let state = self.inner.lock();
        state.entries.iter().find(|n| n.id() == id).cloned()
    }

    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.inner.lock().position(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    #[must_use]
    pub fn lifecycle(&self, id: NotificationId) -> Lifecycle {
        let state = self.inner.lock();
        match state.position(id) {
            None => Lifecycle::Removed,
            Some(_) if state.timers.is_armed(id) => Lifecycle::ActivePendingTimer,
            Some(_) => Lifecycle::ActiveNoTimer,
        }
    }

    /// Number of armed auto-dismiss timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.inner.lock().timers.len()
    }

    /// The whole collection in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// The oldest notifications that fit in the configured visible window.
    #[must_use]
    pub fn visible(&self) -> Vec<Notification> {
        self.snapshot()
            .iter()
            .take(self.inner.settings.max_visible())
            .cloned()
            .collect()
    }

    /// Number of notifications waiting beyond the visible window.
    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.len().saturating_sub(self.inner.settings.max_visible())
    }

    /// Follows the collection. A new snapshot is published after every
    /// mutation; calls that change nothing publish nothing.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    fn remove_with_reason(&self, id: NotificationId, reason: RemovalReason) -> bool {
        {
            let mut guard = self.inner.lock();
            let state = &mut *guard;
            let Some(index) = state.position(id) else {
                return false;
            };
            state.entries.remove(index);
            state.timers.cancel(id);
            self.inner.publish(&state.entries);
        }
        self.inner
            .record(DiagnosticEventKind::Removed { id, reason });
        true
    }

    fn arm(&self, timers: &mut TimerTable, id: NotificationId, duration: Duration) {
        let generation = timers.next_generation();
        let store: Weak<Inner> = Arc::downgrade(&self.inner);
        let task = self.inner.runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(inner) = store.upgrade() {
                inner.expire(id, generation);
            }
        });
        timers.arm(id, generation, task);
    }
}

/// Non-owning handle to a [`Store`], from [`Store::downgrade`].
#[derive(Debug, Clone)]
pub struct WeakStore {
    inner: Weak<Inner>,
}

impl WeakStore {
    /// Returns the store if any `Store` handle is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Store> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

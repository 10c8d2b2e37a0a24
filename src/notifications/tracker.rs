// SPDX-License-Identifier: MPL-2.0
//! Loading toasts that follow an async operation.
//!
//! The usual flow is: post a loading notification, await the work, then
//! flip the same notification to success or error so it auto-dismisses.

use super::notification::{Kind, NewNotification, NotificationPatch};
use super::store::Store;
use std::future::Future;

impl Store {
    /// Shows `loading` while `task` runs, then resolves it.
    ///
    /// The patch built by `on_success` or `on_failure` is applied to the
    /// loading notification. A patch that sets no kind resolves to
    /// [`Kind::Success`] or [`Kind::Error`]. If the notification was
    /// removed in the meantime the final update is skipped.
    ///
    /// # Errors
    ///
    /// Returns whatever `task` returns.
    pub async fn track<T, E, F>(
        &self,
        loading: NewNotification,
        task: F,
        on_success: impl FnOnce(&T) -> NotificationPatch,
        on_failure: impl FnOnce(&E) -> NotificationPatch,
    ) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let id = self.add(loading);
        let result = task.await;
        let patch = match &result {
            Ok(value) => with_fallback_kind(on_success(value), Kind::Success),
            Err(err) => with_fallback_kind(on_failure(err), Kind::Error),
        };
        self.update(id, patch);
        result
    }
}

fn with_fallback_kind(patch: NotificationPatch, kind: Kind) -> NotificationPatch {
    if patch.kind_change().is_some() {
        patch
    } else {
        patch.kind(kind)
    }
}

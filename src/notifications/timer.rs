// SPDX-License-Identifier: MPL-2.0
//! Auto-dismiss timer bookkeeping.
//!
//! Each notification has at most one armed timer. Every arm gets a fresh
//! generation number; an expiring task must present the generation it was
//! armed with, so a task that lost a race against a re-arm or cancel is
//! ignored instead of removing the notification.

use super::notification::NotificationId;
use std::collections::HashMap;
use tokio::task::JoinHandle;

#[derive(Debug)]
struct ArmedTimer {
    generation: u64,
    task: JoinHandle<()>,
}

#[derive(Debug, Default)]
pub(crate) struct TimerTable {
    armed: HashMap<NotificationId, ArmedTimer>,
    next_generation: u64,
}

impl TimerTable {
    /// Reserves the generation for the next timer of `id`.
    pub(crate) fn next_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Stores `task` as the only timer of `id`, aborting the previous one.
    pub(crate) fn arm(&mut self, id: NotificationId, generation: u64, task: JoinHandle<()>) {
        if let Some(previous) = self.armed.insert(id, ArmedTimer { generation, task }) {
            previous.task.abort();
        }
    }

    /// Aborts the timer of `id`. Returns whether one was pending.
    pub(crate) fn cancel(&mut self, id: NotificationId) -> bool {
        match self.armed.remove(&id) {
            Some(timer) => {
                timer.task.abort();
                true
            }
            None => false,
        }
    }

    pub(crate) fn cancel_all(&mut self) {
        for (_, timer) in self.armed.drain() {
            timer.task.abort();
        }
    }

    /// Forgets the timer of `id` if `generation` is still the current one.
    ///
    /// Called from the expiring task itself, so nothing is aborted.
    pub(crate) fn claim_expired(&mut self, id: NotificationId, generation: u64) -> bool {
        let current = self
            .armed
            .get(&id)
            .is_some_and(|timer| timer.generation == generation);
        if current {
            self.armed.remove(&id);
        }
        current
    }

    pub(crate) fn is_armed(&self, id: NotificationId) -> bool {
        self.armed.contains_key(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.armed.len()
    }
}

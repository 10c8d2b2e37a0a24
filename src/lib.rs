// SPDX-License-Identifier: MPL-2.0
//! `notification_store` keeps the transient notifications (toasts) of an
//! application: an ordered, thread-safe collection with per-notification
//! auto-dismiss timers, a subscription for renderers, and a diagnostics log
//! of everything that happened to each notification.
//!
//! Start with [`notifications::Store`].

#![doc(html_root_url = "https://docs.rs/notification_store/0.1.0")]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod notifications;

#[cfg(test)]
mod test_utils;

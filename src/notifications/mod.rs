// SPDX-License-Identifier: MPL-2.0
//! Toast notification store.
//!
//! This module holds transient user-facing notifications (toasts): status
//! messages that appear after an action and either disappear on their own
//! or stay until the application or the user removes them.
//!
//! # Components
//!
//! - `notification` - `Notification` record, `Kind`, input and patch shapes
//! - `store` - `Store` owning the ordered collection and its timers
//! - `tracker` - `Store::track`, a loading toast following a future
//!
//! # Usage
//!
//! ```no_run
//! use notification_store::config::StoreSettings;
//! use notification_store::notifications::{Kind, NewNotification, NotificationPatch, Store};
//!
//! # async fn upload() {
//! let store = Store::new(StoreSettings::default());
//!
//! // Sticks until updated: loading toasts have no timer by default.
//! let id = store.add(NewNotification::loading("Procesando archivo").message("Cargando x.xlsx..."));
//!
//! // Later, from the upload completion: auto-dismisses after 5 seconds.
//! store.update(id, NotificationPatch::resolve(Kind::Success, "Carga completada"));
//! # }
//! ```
//!
//! # Defaults
//!
//! - Duration: 5 s for every kind except loading, which never auto-dismisses
//! - Dismissible: always, except loading notifications
//! - Order: insertion order, oldest first; updates never reorder

mod notification;
mod store;
mod timer;
mod tracker;

pub use notification::{
    Action, Kind, NewNotification, Notification, NotificationId, NotificationPatch, Progress,
    UnknownKind,
};
pub use store::{Lifecycle, Message, Snapshot, Store, StoreBuilder, WeakStore};

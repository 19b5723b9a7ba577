//! Notification dispatch.
//!
//! Geofence notifications always use the same id, so showing a new one
//! replaces whatever was on screen: at most one geofence notification is
//! ever visible. Delivery is fire-and-forget.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Fixed id shared by every geofence notification.
pub const GEOFENCE_NOTIFICATION_ID: u32 = 0;

/// Accent colour of geofence notifications.
pub const NOTIFICATION_COLOR: &str = "#FF0000";

/// A rendered notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: u32,
    /// Transition details, e.g. `Entered: Ruta N`.
    pub title: String,
    pub text: String,
    pub color: String,
    /// Dismissed when the user touches it.
    pub auto_cancel: bool,
    pub posted_at: DateTime<Utc>,
}

impl Notification {
    pub fn geofence(description: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: GEOFENCE_NOTIFICATION_ID,
            title: description.into(),
            text: text.into(),
            color: NOTIFICATION_COLOR.to_string(),
            auto_cancel: true,
            posted_at: Utc::now(),
        }
    }
}

/// The host's notification service.
pub trait Notifier: Send + Sync {
    /// Show `notification`, replacing any notification with the same id.
    fn notify(&self, notification: Notification);

    /// Show a short transient message (registration results, connection
    /// and permission failures).
    fn flash(&self, message: &str) {
        log::info!("{}", message);
    }
}

/// Writes notifications to the log. Used by the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        log::info!(
            "notification #{}: {} ({})",
            notification.id,
            notification.title,
            notification.text
        );
    }
}

/// In-memory notification tray keyed by id.
#[derive(Debug, Default)]
pub struct NotificationSlot {
    shown: Mutex<HashMap<u32, Notification>>,
    last_flash: Mutex<Option<String>>,
}

impl NotificationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The geofence notification currently on screen.
    pub fn current(&self) -> Option<Notification> {
        self.get(GEOFENCE_NOTIFICATION_ID)
    }

    pub fn get(&self, id: u32) -> Option<Notification> {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Remove a notification, as when the user touches an auto-cancel one.
    pub fn dismiss(&self, id: u32) -> Option<Notification> {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }

    pub fn visible_count(&self) -> usize {
        self.shown.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn last_flash(&self) -> Option<String> {
        self.last_flash
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for NotificationSlot {
    fn notify(&self, notification: Notification) {
        log::debug!("showing notification #{}: {}", notification.id, notification.title);
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(notification.id, notification);
    }

    fn flash(&self, message: &str) {
        log::info!("{}", message);
        *self.last_flash.lock().unwrap_or_else(PoisonError::into_inner) = Some(message.to_string());
    }
}

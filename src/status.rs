//! Registration and connection status reporting.
//!
//! Failures from the monitoring service are shown to the user as a short
//! transient message and logged. Nothing is retried.

use crate::notifier::Notifier;
use std::fmt;

pub const STATUS_SUCCESS: i32 = 0;
pub const GEOFENCE_NOT_AVAILABLE: i32 = 1000;
pub const GEOFENCE_TOO_MANY_GEOFENCES: i32 = 1001;
pub const GEOFENCE_TOO_MANY_PENDING_INTENTS: i32 = 1002;

pub const PERMISSION_DENIED_MESSAGE: &str =
    "In order to allow location services, permission must be granted";

/// Outcome of registering geofences with the monitoring service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    Added,
    NotAvailable,
    TooManyGeofences,
    TooManyPendingIntents,
    Other(i32),
}

impl RegistrationStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            STATUS_SUCCESS => Self::Added,
            GEOFENCE_NOT_AVAILABLE => Self::NotAvailable,
            GEOFENCE_TOO_MANY_GEOFENCES => Self::TooManyGeofences,
            GEOFENCE_TOO_MANY_PENDING_INTENTS => Self::TooManyPendingIntents,
            other => Self::Other(other),
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Added
    }

    /// Message shown to the user.
    pub fn message(self) -> String {
        match self {
            Self::Added => "Geofences Added".to_string(),
            Self::NotAvailable => "GEOFENCE_NOT_AVAILABLE".to_string(),
            Self::TooManyGeofences => "GEOFENCE_TOO_MANY_GEOFENCES".to_string(),
            Self::TooManyPendingIntents => "GEOFENCE_TOO_MANY_PENDING_INTENTS".to_string(),
            Self::Other(code) => format!("Unknown status code: {}", code),
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Tell the user how registration went.
pub fn report_registration(code: i32, notifier: &dyn Notifier) -> RegistrationStatus {
    let status = RegistrationStatus::from_code(code);
    if !status.is_success() {
        log::warn!("geofence registration failed: {}", status);
    }
    notifier.flash(&status.message());
    status
}

/// Tell the user the monitoring service is unreachable.
pub fn report_connection_failure(error_code: i32, notifier: &dyn Notifier) {
    log::warn!("location service connection failed: error {}", error_code);
    notifier.flash(&format!("Location services not connected (error {})", error_code));
}

/// Tell the user location permission is required.
pub fn report_permission_denied(notifier: &dyn Notifier) {
    log::warn!("location permission denied");
    notifier.flash(PERMISSION_DENIED_MESSAGE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::NotificationSlot;

    #[test]
    fn test_status_codes() {
        assert_eq!(RegistrationStatus::from_code(0), RegistrationStatus::Added);
        assert_eq!(RegistrationStatus::from_code(1000), RegistrationStatus::NotAvailable);
        assert_eq!(RegistrationStatus::from_code(1001), RegistrationStatus::TooManyGeofences);
        assert_eq!(RegistrationStatus::from_code(1002), RegistrationStatus::TooManyPendingIntents);
        assert_eq!(RegistrationStatus::from_code(13), RegistrationStatus::Other(13));
    }

    #[test]
    fn test_messages() {
        assert_eq!(RegistrationStatus::Added.message(), "Geofences Added");
        assert_eq!(RegistrationStatus::TooManyGeofences.to_string(), "GEOFENCE_TOO_MANY_GEOFENCES");
        assert_eq!(RegistrationStatus::Other(13).message(), "Unknown status code: 13");
    }

    #[test]
    fn test_report_registration_flashes() {
        let slot = NotificationSlot::new();
        assert!(report_registration(0, &slot).is_success());
        assert_eq!(slot.last_flash().as_deref(), Some("Geofences Added"));

        assert!(!report_registration(1000, &slot).is_success());
        assert_eq!(slot.last_flash().as_deref(), Some("GEOFENCE_NOT_AVAILABLE"));
        assert_eq!(slot.visible_count(), 0);
    }

    #[test]
    fn test_report_connection_and_permission() {
        let slot = NotificationSlot::new();
        report_connection_failure(7, &slot);
        assert_eq!(
            slot.last_flash().as_deref(),
            Some("Location services not connected (error 7)")
        );

        report_permission_denied(&slot);
        assert_eq!(slot.last_flash().as_deref(), Some(PERMISSION_DENIED_MESSAGE));
    }
}

//! Geofence registration and transition notification.
//!
//! A landmark registry produces the monitoring request handed to the
//! platform's geofencing service. Transition events coming back from that
//! service are classified, rendered to a one-line description and shown as
//! a single live notification.

pub mod notifier;
pub mod registry;
pub mod server;
pub mod service;
pub mod status;
pub mod transition;

//! Core types for the geofence registry.

use bitflags::bitflags;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Expiration value meaning "monitor until explicitly removed".
pub const NEVER_EXPIRE: i64 = -1;

/// A named point of interest. The name doubles as the geofence request id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Landmark {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    pub fn display_line(&self) -> String {
        format!(
            "{} ({})",
            self.name,
            super::landmarks::format_coords(self.latitude, self.longitude)
        )
    }
}

bitflags! {
    /// Transition kinds a geofence reports, using the platform bit values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TransitionTypes: u8 {
        const ENTER = 1;
        const EXIT = 2;
        const DWELL = 4;
    }
}

impl Default for TransitionTypes {
    fn default() -> Self {
        Self::ENTER | Self::EXIT
    }
}

// Monitoring services expect the raw bitmask, not flag names.
impl Serialize for TransitionTypes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

/// Which transition fires right after registration if the device is already
/// inside a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialTrigger {
    Enter,
    Exit,
    #[default]
    Dwell,
}

impl fmt::Display for InitialTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter => write!(f, "enter"),
            Self::Exit => write!(f, "exit"),
            Self::Dwell => write!(f, "dwell"),
        }
    }
}

/// A circular monitoring region derived from one landmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeofenceDefinition {
    /// Landmark name; maps back to exactly one registry entry.
    pub request_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f32,
    /// Milliseconds until the platform drops the region, or [`NEVER_EXPIRE`].
    pub expiration_ms: i64,
    pub transition_types: TransitionTypes,
}

/// Everything the monitoring service needs to start watching.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeofencingRequest {
    pub initial_trigger: InitialTrigger,
    pub geofences: Vec<GeofenceDefinition>,
}

/// Registry validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Duplicate landmark name: '{0}'")]
    DuplicateLandmark(String),

    #[error("Landmark name must not be empty")]
    EmptyName,

    #[error("Invalid coordinates for '{name}': lat {lat}, lon {lon} (lat -90..90, lon -180..180)")]
    InvalidCoordinates { name: String, lat: f64, lon: f64 },

    #[error("Invalid radius {0} m: must be a positive, finite number")]
    InvalidRadius(f32),

    #[error("Invalid expiration {0} ms: must be positive or -1 (never expire)")]
    InvalidExpiration(i64),
}

//! Geofence registry subsystem.
//!
//! Holds the landmark set, the global radius/expiration configuration and
//! the builder that turns both into monitoring requests.

pub mod builder;
pub mod config;
pub mod landmarks;
pub mod types;

pub use builder::{build_geofences, geofencing_request};
pub use config::{ConfigError, RegistryConfig};
pub use landmarks::{builtin_landmarks, format_coords, LandmarkRegistry};
pub use types::{
    GeofenceDefinition, GeofencingRequest, InitialTrigger, Landmark, RegistryError,
    TransitionTypes, NEVER_EXPIRE,
};

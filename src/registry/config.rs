//! Registry configuration at ~/.geofence/config.json.
//!
//! Every field is optional; missing fields fall back to the built-in
//! landmark set, a 121 m radius and a 12 hour expiration.

use super::landmarks::{builtin_landmarks, LandmarkRegistry, DEFAULT_EXPIRATION_MS, DEFAULT_RADIUS_M};
use super::types::{InitialTrigger, Landmark, RegistryError, NEVER_EXPIRE};
use crate::transition::TransitionLabels;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config JSON in '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] RegistryError),
}

/// Landmarks plus the global geofence parameters and user-facing labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub radius_m: f32,
    pub expiration_ms: i64,
    pub initial_trigger: InitialTrigger,
    pub landmarks: Vec<Landmark>,
    pub labels: TransitionLabels,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_RADIUS_M,
            expiration_ms: DEFAULT_EXPIRATION_MS,
            initial_trigger: InitialTrigger::default(),
            landmarks: builtin_landmarks(),
            labels: TransitionLabels::default(),
        }
    }
}

impl RegistryConfig {
    /// Load from the default location. A missing file yields the built-in
    /// configuration; an unreadable or invalid one is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if !path.exists() {
            log::debug!("no config at {}, using built-in landmarks", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::debug!(
            "loaded {} landmark(s) from {}",
            config.landmarks.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".geofence")
            .join("config.json")
    }

    /// Check the global parameters and the landmark set.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if !self.radius_m.is_finite() || self.radius_m <= 0.0 {
            return Err(RegistryError::InvalidRadius(self.radius_m));
        }
        if self.expiration_ms != NEVER_EXPIRE && self.expiration_ms <= 0 {
            return Err(RegistryError::InvalidExpiration(self.expiration_ms));
        }
        self.registry().map(|_| ())
    }

    /// Build the validated landmark registry.
    pub fn registry(&self) -> Result<LandmarkRegistry, RegistryError> {
        LandmarkRegistry::new(self.landmarks.clone())
    }
}

//! Built-in landmark dataset and the validated landmark registry.

use super::types::{Landmark, RegistryError};
use std::collections::HashSet;

// ─── Built-in dataset ───────────────────────────────────────────

/// Default geofence radius in metres.
pub const DEFAULT_RADIUS_M: f32 = 121.0;

/// Default expiration: 12 hours.
pub const DEFAULT_EXPIRATION_MS: i64 = 12 * 60 * 60 * 1000;

struct BuiltinLandmark {
    name: &'static str,
    lat: f64,
    lon: f64,
}

const BUILTIN_LANDMARKS: &[BuiltinLandmark] = &[
    BuiltinLandmark {
        name: "Ruta N",
        lat: 36.7318691, lon: 3.1830059,
    },
    BuiltinLandmark {
        name: "Juan Valdez CC Aventura",
        lat: 36.7321593, lon: 3.1822452,
    },
];

/// The landmarks monitored when no configuration overrides them.
pub fn builtin_landmarks() -> Vec<Landmark> {
    BUILTIN_LANDMARKS
        .iter()
        .map(|l| Landmark::new(l.name, l.lat, l.lon))
        .collect()
}

/// Format coordinates as `36.7319°N, 3.1830°E`.
pub fn format_coords(lat: f64, lon: f64) -> String {
    let ns = if lat >= 0.0 { 'N' } else { 'S' };
    let ew = if lon >= 0.0 { 'E' } else { 'W' };
    format!("{:.4}°{}, {:.4}°{}", lat.abs(), ns, lon.abs(), ew)
}

// ─── Registry ───────────────────────────────────────────────────

/// An immutable, validated set of landmarks keyed by name.
///
/// Names are unique under Unicode lowercasing, the same folding `get`
/// uses, so every geofence id resolves to exactly one landmark.
#[derive(Debug, Clone)]
pub struct LandmarkRegistry {
    landmarks: Vec<Landmark>,
}

impl LandmarkRegistry {
    pub fn new(landmarks: Vec<Landmark>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for lm in &landmarks {
            if lm.name.trim().is_empty() {
                return Err(RegistryError::EmptyName);
            }
            if !(-90.0..=90.0).contains(&lm.latitude) || !(-180.0..=180.0).contains(&lm.longitude) {
                return Err(RegistryError::InvalidCoordinates {
                    name: lm.name.clone(),
                    lat: lm.latitude,
                    lon: lm.longitude,
                });
            }
            if !seen.insert(lm.name.to_lowercase()) {
                return Err(RegistryError::DuplicateLandmark(lm.name.clone()));
            }
        }
        Ok(Self { landmarks })
    }

    pub fn builtin() -> Self {
        Self {
            landmarks: builtin_landmarks(),
        }
    }

    /// Find the landmark behind a geofence id. Exact match first, then
    /// case-insensitive.
    pub fn get(&self, id: &str) -> Option<&Landmark> {
        self.landmarks
            .iter()
            .find(|l| l.name == id)
            .or_else(|| {
                let q = id.trim().to_lowercase();
                self.landmarks.iter().find(|l| l.name.to_lowercase() == q)
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.iter()
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

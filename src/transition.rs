//! Transition classification.
//!
//! Turns a raw transition code plus the triggered geofence ids into a
//! one-line description such as `Exited: Ruta N, Juan Valdez CC Aventura`.
//! Unrecognised codes never fail; they render with the unknown label.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Platform code for entering a geofence.
pub const GEOFENCE_TRANSITION_ENTER: i32 = 1;
/// Platform code for leaving a geofence.
pub const GEOFENCE_TRANSITION_EXIT: i32 = 2;

/// Kind of boundary crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Enter,
    Exit,
    /// Anything else the service reports, kept as its raw code.
    Unknown(i32),
}

impl TransitionKind {
    pub fn from_code(code: i32) -> Self {
        match code {
            GEOFENCE_TRANSITION_ENTER => Self::Enter,
            GEOFENCE_TRANSITION_EXIT => Self::Exit,
            other => Self::Unknown(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Enter => GEOFENCE_TRANSITION_ENTER,
            Self::Exit => GEOFENCE_TRANSITION_EXIT,
            Self::Unknown(code) => code,
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter => write!(f, "enter"),
            Self::Exit => write!(f, "exit"),
            Self::Unknown(code) => write!(f, "unknown({})", code),
        }
    }
}

/// Accepts `enter`, `exit` (case-insensitive) or a raw numeric code.
impl FromStr for TransitionKind {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "enter" | "entered" => Ok(Self::Enter),
            "exit" | "exited" => Ok(Self::Exit),
            other => other
                .parse::<i32>()
                .map(Self::from_code)
                .map_err(|_| EventError::UnknownKindName(s.to_string())),
        }
    }
}

/// User-facing strings. Overridable from config for localisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionLabels {
    pub entered: String,
    pub exited: String,
    pub unknown: String,
    /// Body line shown under the transition details.
    pub notification_text: String,
}

impl Default for TransitionLabels {
    fn default() -> Self {
        Self {
            entered: "Entered".into(),
            exited: "Exited".into(),
            unknown: "Unknown".into(),
            notification_text: "Click notification to return to app".into(),
        }
    }
}

impl TransitionLabels {
    pub fn label(&self, kind: TransitionKind) -> &str {
        match kind {
            TransitionKind::Enter => &self.entered,
            TransitionKind::Exit => &self.exited,
            TransitionKind::Unknown(_) => &self.unknown,
        }
    }
}

/// `"<label>: <id>, <id>, ..."` with ids in the order given.
pub fn transition_details<S: AsRef<str>>(kind: TransitionKind, ids: &[S], labels: &TransitionLabels) -> String {
    let joined = ids.iter().map(|id| id.as_ref()).collect::<Vec<&str>>().join(", ");
    format!("{}: {}", labels.label(kind), joined)
}

// ─── Events ─────────────────────────────────────────────────────

/// Event parsing errors.
#[derive(Error, Debug)]
pub enum EventError {
    #[error("Malformed geofencing event: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Geofencing event carries neither a transition nor an error code")]
    MissingTransition,

    #[error("Unknown transition kind '{0}'. Use 'enter', 'exit' or a numeric code.")]
    UnknownKindName(String),
}

/// A transition event as delivered by the monitoring service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeofencingEvent {
    /// Set when the service failed to deliver a usable event.
    #[serde(default)]
    pub error_code: Option<i32>,
    #[serde(default)]
    pub transition: Option<i32>,
    /// Triggered geofence ids; one crossing can hit several regions.
    #[serde(default)]
    pub ids: Vec<String>,
}

impl GeofencingEvent {
    pub fn new(kind: TransitionKind, ids: Vec<String>) -> Self {
        Self {
            error_code: None,
            transition: Some(kind.code()),
            ids,
        }
    }

    pub fn failed(error_code: i32) -> Self {
        Self {
            error_code: Some(error_code),
            transition: None,
            ids: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn has_error(&self) -> bool {
        self.error_code.is_some()
    }

    /// `None` when the event has no transition code at all.
    pub fn kind(&self) -> Option<TransitionKind> {
        self.transition.map(TransitionKind::from_code)
    }
}

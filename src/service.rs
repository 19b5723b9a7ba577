//! Transition event handling.
//!
//! [`dispatch_for`] is the pure decision: it maps an event to either a
//! notification to show or a reason to stay silent. [`GeofenceService`]
//! applies that decision to a [`Notifier`].

use crate::notifier::{Notification, Notifier};
use crate::transition::{transition_details, EventError, GeofencingEvent, TransitionLabels};
use serde::Serialize;
use std::sync::Arc;

/// What to do with an incoming event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Dispatch {
    Notify { notification: Notification },
    Skip { reason: String },
}

impl Dispatch {
    /// Transition details, if this dispatch shows a notification.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Notify { notification } => Some(notification.title.as_str()),
            Self::Skip { .. } => None,
        }
    }
}

/// Decide how to react to `event`.
///
/// Erroneous events are skipped. Events with no transition at all are
/// malformed. Every other event, including unknown transition codes,
/// yields one notification.
pub fn dispatch_for(event: &GeofencingEvent, labels: &TransitionLabels) -> Result<Dispatch, EventError> {
    if let Some(code) = event.error_code {
        return Ok(Dispatch::Skip {
            reason: format!("GeofencingEvent error: {}", code),
        });
    }

    let kind = event.kind().ok_or(EventError::MissingTransition)?;
    let description = transition_details(kind, event.ids.as_slice(), labels);
    Ok(Dispatch::Notify {
        notification: Notification::geofence(description, labels.notification_text.clone()),
    })
}

/// Receives transition events and drives the notifier.
#[derive(Clone)]
pub struct GeofenceService {
    labels: TransitionLabels,
    notifier: Arc<dyn Notifier>,
}

impl GeofenceService {
    pub fn new(labels: TransitionLabels, notifier: Arc<dyn Notifier>) -> Self {
        Self { labels, notifier }
    }

    /// Parse a JSON event and handle it. Payloads that fail to parse are
    /// logged and produce no notification.
    pub fn on_json(&self, body: &str) -> Result<(GeofencingEvent, Dispatch), EventError> {
        let event = GeofencingEvent::from_json(body).map_err(|e| {
            log::error!("{}", e);
            e
        })?;
        let dispatch = self.on_event(&event)?;
        Ok((event, dispatch))
    }

    /// Handle one event. Returns the decision that was applied.
    pub fn on_event(&self, event: &GeofencingEvent) -> Result<Dispatch, EventError> {
        log::debug!("handling geofencing event {:?}", event);

        let dispatch = match dispatch_for(event, &self.labels) {
            Ok(d) => d,
            Err(e) => {
                log::error!("{}", e);
                return Err(e);
            }
        };

        match &dispatch {
            Dispatch::Notify { notification } => {
                self.notifier.notify(notification.clone());
                log::info!("{}", notification.title);
            }
            Dispatch::Skip { reason } => log::error!("{}", reason),
        }
        Ok(dispatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::NotificationSlot;
    use crate::transition::TransitionKind;

    fn service() -> (GeofenceService, Arc<NotificationSlot>) {
        let slot = Arc::new(NotificationSlot::new());
        let svc = GeofenceService::new(TransitionLabels::default(), slot.clone());
        (svc, slot)
    }

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dispatch_enter() {
        let ev = GeofencingEvent::new(TransitionKind::Enter, ids(&["Ruta N"]));
        let d = dispatch_for(&ev, &TransitionLabels::default()).unwrap();
        assert_eq!(d.description(), Some("Entered: Ruta N"));
    }

    #[test]
    fn test_dispatch_unknown_code_still_notifies() {
        let ev = GeofencingEvent {
            error_code: None,
            transition: Some(99),
            ids: ids(&["Ruta N", "Juan Valdez CC Aventura"]),
        };
        let d = dispatch_for(&ev, &TransitionLabels::default()).unwrap();
        assert_eq!(d.description(), Some("Unknown: Ruta N, Juan Valdez CC Aventura"));
    }

    #[test]
    fn test_dispatch_error_event_skips() {
        let d = dispatch_for(&GeofencingEvent::failed(1000), &TransitionLabels::default()).unwrap();
        assert_eq!(d, Dispatch::Skip { reason: "GeofencingEvent error: 1000".into() });
        assert_eq!(d.description(), None);
    }

    #[test]
    fn test_dispatch_error_wins_over_transition() {
        let ev = GeofencingEvent {
            error_code: Some(1),
            transition: Some(1),
            ids: ids(&["Ruta N"]),
        };
        assert!(matches!(
            dispatch_for(&ev, &TransitionLabels::default()).unwrap(),
            Dispatch::Skip { .. }
        ));
    }

    #[test]
    fn test_dispatch_missing_transition_is_malformed() {
        let ev = GeofencingEvent { error_code: None, transition: None, ids: vec![] };
        assert!(matches!(
            dispatch_for(&ev, &TransitionLabels::default()),
            Err(EventError::MissingTransition)
        ));
    }

    #[test]
    fn test_on_event_shows_notification() {
        let (svc, slot) = service();
        let ev = GeofencingEvent::new(
            TransitionKind::Exit,
            ids(&["Ruta N", "Juan Valdez CC Aventura"]),
        );
        svc.on_event(&ev).unwrap();

        let shown = slot.current().unwrap();
        assert_eq!(shown.title, "Exited: Ruta N, Juan Valdez CC Aventura");
        assert_eq!(shown.text, "Click notification to return to app");
    }

    #[test]
    fn test_on_event_error_produces_no_notification() {
        let (svc, slot) = service();
        svc.on_event(&GeofencingEvent::failed(1000)).unwrap();
        assert!(slot.current().is_none());
    }

    #[test]
    fn test_on_event_error_keeps_previous_notification() {
        let (svc, slot) = service();
        svc.on_event(&GeofencingEvent::new(TransitionKind::Enter, ids(&["Ruta N"]))).unwrap();
        svc.on_event(&GeofencingEvent::failed(1001)).unwrap();
        assert_eq!(slot.current().unwrap().title, "Entered: Ruta N");
    }

    #[test]
    fn test_on_event_malformed_produces_no_notification() {
        let (svc, slot) = service();
        let ev = GeofencingEvent { error_code: None, transition: None, ids: ids(&["Ruta N"]) };
        assert!(svc.on_event(&ev).is_err());
        assert_eq!(slot.visible_count(), 0);
    }

    #[test]
    fn test_on_json_null_produces_no_notification() {
        let (svc, slot) = service();
        assert!(matches!(svc.on_json("null"), Err(EventError::Malformed(_))));
        assert!(matches!(svc.on_json("{ \"transition\": "), Err(EventError::Malformed(_))));
        assert_eq!(slot.visible_count(), 0);
    }

    #[test]
    fn test_on_json_enter() {
        let (svc, slot) = service();
        let (event, dispatch) = svc.on_json(r#"{ "transition": 1, "ids": ["Ruta N"] }"#).unwrap();
        assert_eq!(event.ids, ids(&["Ruta N"]));
        assert_eq!(dispatch.description(), Some("Entered: Ruta N"));
        assert_eq!(slot.current().unwrap().title, "Entered: Ruta N");
    }

    #[test]
    fn test_latest_transition_supersedes() {
        let (svc, slot) = service();
        svc.on_event(&GeofencingEvent::new(TransitionKind::Enter, ids(&["Ruta N"]))).unwrap();
        svc.on_event(&GeofencingEvent::new(TransitionKind::Exit, ids(&["Ruta N"]))).unwrap();
        assert_eq!(slot.visible_count(), 1);
        assert_eq!(slot.current().unwrap().title, "Exited: Ruta N");
    }
}

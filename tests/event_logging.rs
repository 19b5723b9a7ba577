use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use geofence_notify::registry::RegistryConfig;
use geofence_notify::server::{build_router, AppState};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

struct CaptureLogger;

static CAPTURED: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
static LOGGER: CaptureLogger = CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut lines) = CAPTURED.lock() {
            lines.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

// Only test in this binary: the global logger can be set once.
#[tokio::test]
async fn null_event_body_is_logged_as_error() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let state = Arc::new(AppState::new(&RegistryConfig::default()).unwrap());
    let router = build_router(state.clone());
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/events")
        .header("content-type", "application/json")
        .body(Body::from("null"))
        .unwrap();
    let resp = router.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(state.slot.current().is_none());

    let lines = CAPTURED.lock().unwrap();
    assert!(
        lines
            .iter()
            .any(|(level, msg)| *level == Level::Error && msg.starts_with("Malformed geofencing event")),
        "captured: {:?}",
        *lines
    );
}

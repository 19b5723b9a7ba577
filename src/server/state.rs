use crate::notifier::NotificationSlot;
use crate::registry::{geofencing_request, GeofencingRequest, Landmark, RegistryConfig, RegistryError};
use crate::service::GeofenceService;
use std::sync::Arc;

pub struct AppState {
    pub landmarks: Vec<Landmark>,
    pub request: GeofencingRequest,
    pub service: GeofenceService,
    pub slot: Arc<NotificationSlot>,
}

impl AppState {
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        config.validate()?;
        let registry = config.registry()?;
        let slot = Arc::new(NotificationSlot::new());
        Ok(Self {
            landmarks: registry.landmarks().to_vec(),
            request: geofencing_request(&registry, config),
            service: GeofenceService::new(config.labels.clone(), slot.clone()),
            slot,
        })
    }
}

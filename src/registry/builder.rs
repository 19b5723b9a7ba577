//! Turns the landmark registry into monitoring requests.

use super::config::RegistryConfig;
use super::landmarks::LandmarkRegistry;
use super::types::{GeofenceDefinition, GeofencingRequest, TransitionTypes};

/// One circular geofence per landmark, in registry order, watching both
/// ENTER and EXIT.
pub fn build_geofences(registry: &LandmarkRegistry, config: &RegistryConfig) -> Vec<GeofenceDefinition> {
    registry
        .iter()
        .map(|lm| GeofenceDefinition {
            request_id: lm.name.clone(),
            latitude: lm.latitude,
            longitude: lm.longitude,
            radius_m: config.radius_m,
            expiration_ms: config.expiration_ms,
            transition_types: TransitionTypes::ENTER | TransitionTypes::EXIT,
        })
        .collect()
}

/// The full request handed to the monitoring service.
pub fn geofencing_request(registry: &LandmarkRegistry, config: &RegistryConfig) -> GeofencingRequest {
    let geofences = build_geofences(registry, config);
    log::debug!(
        "built geofencing request: {} region(s), initial trigger {}",
        geofences.len(),
        config.initial_trigger
    );
    GeofencingRequest {
        initial_trigger: config.initial_trigger,
        geofences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::types::{InitialTrigger, Landmark, NEVER_EXPIRE};

    #[test]
    fn test_one_geofence_per_landmark() {
        let config = RegistryConfig::default();
        let registry = config.registry().unwrap();
        let geofences = build_geofences(&registry, &config);

        assert_eq!(geofences.len(), 2);
        assert_eq!(geofences[0].request_id, "Ruta N");
        assert_eq!(geofences[1].request_id, "Juan Valdez CC Aventura");
        for g in &geofences {
            assert_eq!(g.radius_m, 121.0);
            assert_eq!(g.expiration_ms, 12 * 60 * 60 * 1000);
            assert_eq!(g.transition_types.bits(), 3);
        }
    }

    #[test]
    fn test_every_id_maps_back_to_one_landmark() {
        let config = RegistryConfig::default();
        let registry = config.registry().unwrap();
        for g in build_geofences(&registry, &config) {
            let lm = registry.get(&g.request_id).unwrap();
            assert_eq!(lm.latitude, g.latitude);
            assert_eq!(lm.longitude, g.longitude);
        }
    }

    #[test]
    fn test_global_parameters_applied() {
        let config = RegistryConfig {
            radius_m: 50.0,
            expiration_ms: NEVER_EXPIRE,
            initial_trigger: InitialTrigger::Enter,
            landmarks: vec![Landmark::new("Parque Explora", 6.2704, -75.5657)],
            ..Default::default()
        };
        let registry = config.registry().unwrap();
        let request = geofencing_request(&registry, &config);

        assert_eq!(request.initial_trigger, InitialTrigger::Enter);
        assert_eq!(request.geofences.len(), 1);
        assert_eq!(request.geofences[0].radius_m, 50.0);
        assert_eq!(request.geofences[0].expiration_ms, -1);
    }

    #[test]
    fn test_request_json_shape() {
        let config = RegistryConfig::default();
        let registry = config.registry().unwrap();
        let json = serde_json::to_value(geofencing_request(&registry, &config)).unwrap();

        assert_eq!(json["initial_trigger"], "dwell");
        assert_eq!(json["geofences"][0]["request_id"], "Ruta N");
        assert_eq!(json["geofences"][0]["transition_types"], 3);
        assert_eq!(json["geofences"][0]["radius_m"], 121.0);
    }

    #[test]
    fn test_empty_registry_builds_empty_request() {
        let config = RegistryConfig { landmarks: vec![], ..Default::default() };
        let registry = config.registry().unwrap();
        assert!(geofencing_request(&registry, &config).geofences.is_empty());
    }
}

use panel_tracker::config::SimulationConfig;
use panel_tracker::types::GeoLocation;
use panel_tracker::TrackerError;

// ── Defaults ──

#[test]
fn test_default_config() {
    let c = SimulationConfig::default();
    assert_eq!(c.latitude, -0.2105367);
    assert_eq!(c.longitude, -78.491614);
    assert_eq!(c.timezone, "America/Guayaquil");
    assert_eq!(c.interval_minutes, 10);
    assert_eq!(c.tracker_step_minutes, 60);
    assert_eq!(c.observer_elevation_m, 0.0);
    assert!(c.refraction);
    assert_eq!(c.panel.width, 0.5);
    assert_eq!(c.panel.height, 0.3);
}

#[test]
fn test_default_resolves() {
    let c = SimulationConfig::default();
    let loc = c.location().unwrap();
    assert_eq!(loc.latitude, c.latitude);
    assert_eq!(c.timezone().unwrap(), chrono_tz::America::Guayaquil);
    let eph = c.ephemeris();
    assert_eq!(eph.observer_elevation_m, 0.0);
    assert!(eph.refraction);
}

// ── JSON ──

#[test]
fn test_partial_json_fills_defaults() {
    let c = SimulationConfig::from_json_str(r#"{"interval_minutes": 30, "refraction": false}"#).unwrap();
    assert_eq!(c.interval_minutes, 30);
    assert!(!c.refraction);
    assert_eq!(c.timezone, "America/Guayaquil");
    assert!(!c.ephemeris().refraction);
}

#[test]
fn test_full_json() {
    let json = r#"{
        "latitude": 48.21,
        "longitude": 16.37,
        "timezone": "Europe/Vienna",
        "interval_minutes": 15,
        "tracker_step_minutes": 30,
        "observer_elevation_m": 190.0,
        "refraction": true,
        "panel": { "center": [0.0, 0.0, 1.0], "width": 2.0, "height": 1.0 }
    }"#;
    let c = SimulationConfig::from_json_str(json).unwrap();
    assert_eq!(c.timezone().unwrap(), chrono_tz::Europe::Vienna);
    assert_eq!(c.panel.center.z, 1.0);
    assert_eq!(c.panel.width, 2.0);
    assert_eq!(c.ephemeris().observer_elevation_m, 190.0);
}

#[test]
fn test_json_roundtrip_through_serde() {
    let c = SimulationConfig::default();
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(SimulationConfig::from_json_str(&json).unwrap(), c);
}

// ── Errors ──

#[test]
fn test_malformed_json() {
    assert!(matches!(
        SimulationConfig::from_json_str("{ not json"),
        Err(TrackerError::Json(_))
    ));
}

#[test]
fn test_unknown_timezone() {
    let c = SimulationConfig {
        timezone: "Mars/Olympus_Mons".to_string(),
        ..SimulationConfig::default()
    };
    match c.timezone() {
        Err(TrackerError::UnknownTimezone(name)) => assert_eq!(name, "Mars/Olympus_Mons"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_invalid_location() {
    let c = SimulationConfig {
        latitude: 123.0,
        ..SimulationConfig::default()
    };
    assert!(matches!(c.location(), Err(TrackerError::InvalidParameter { .. })));
}

#[test]
fn test_location_json_is_range_checked() {
    let loc: GeoLocation = serde_json::from_str(r#"{"latitude": -33.45, "longitude": -70.66}"#).unwrap();
    assert_eq!(loc, GeoLocation::new(-33.45, -70.66).unwrap());

    for json in [
        r#"{"latitude": 123.0, "longitude": 0.0}"#,
        r#"{"latitude": 0.0, "longitude": -200.0}"#,
    ] {
        let err = serde_json::from_str::<GeoLocation>(json).unwrap_err();
        assert!(err.to_string().contains("not within"), "{}", err);
    }
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        SimulationConfig::load("/nonexistent/panel_tracker.json"),
        Err(TrackerError::Io(_))
    ));
}

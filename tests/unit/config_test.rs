//! Tests for configuration validation

use prometheus_depot::config::SimulationConfig;
use prometheus_depot::core::{CarrierKind, GoodsKind, ProducerSource};

#[test]
fn test_default_config_validation() {
    let cfg = SimulationConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.producers.len(), 3);
    assert_eq!(cfg.fleet.len(), 2);
    assert_eq!(cfg.warehouse_capacity(), 16_500);
}

#[test]
fn test_config_invalid_ticks() {
    let cfg = SimulationConfig {
        ticks: 0,
        ..SimulationConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_invalid_threshold() {
    for threshold in [0.0, -0.5, 1.01, f64::NAN] {
        let cfg = SimulationConfig {
            fill_threshold: threshold,
            ..SimulationConfig::default()
        };
        assert!(cfg.validate().is_err(), "threshold {threshold} accepted");
    }
}

#[test]
fn test_config_threshold_of_one_is_valid() {
    let cfg = SimulationConfig {
        fill_threshold: 1.0,
        ..SimulationConfig::default()
    };
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_config_invalid_fleet() {
    let empty = SimulationConfig {
        fleet: Vec::new(),
        ..SimulationConfig::default()
    };
    assert!(empty.validate().is_err());

    let zero = SimulationConfig {
        fleet: vec![CarrierKind::new("Cart", 0)],
        ..SimulationConfig::default()
    };
    let err = zero.validate().unwrap_err();
    assert!(err.contains("Cart"));
}

#[test]
fn test_config_invalid_producers() {
    let empty = SimulationConfig {
        producers: Vec::new(),
        ..SimulationConfig::default()
    };
    assert!(empty.validate().is_err());

    let negative = SimulationConfig {
        producers: vec![ProducerSource::new(
            "A",
            GoodsKind::new("a", 1.0, "Box 1"),
            -1.0,
        )],
        ..SimulationConfig::default()
    };
    assert!(negative.validate().is_err());
}

#[test]
fn test_config_zero_capacity_rejected() {
    let cfg = SimulationConfig {
        warehouse_multiplier: 0,
        ..SimulationConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_from_json_uses_defaults_for_missing_fields() {
    let cfg = SimulationConfig::from_json_str(r#"{"ticks": 7, "seed": 99}"#).unwrap();
    assert_eq!(cfg.ticks, 7);
    assert_eq!(cfg.seed, Some(99));
    assert_eq!(cfg.warehouse_multiplier, 100);
    assert_eq!(cfg.producers.len(), 3);
}

#[test]
fn test_config_from_json_rejects_invalid_values() {
    assert!(SimulationConfig::from_json_str(r#"{"ticks": 0}"#).is_err());
    assert!(SimulationConfig::from_json_str("not json").is_err());
}

#[test]
fn test_config_from_json_custom_fleet() {
    let json = r#"{
        "fleet": [{"name": "Van", "capacity": 40}],
        "producers": [{
            "name": "Z",
            "goods": {"name": "z", "weight": 2.5, "package_type": "Crate"},
            "production_rate": 4.0
        }]
    }"#;
    let cfg = SimulationConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.fleet, vec![CarrierKind::new("Van", 40)]);
    assert_eq!(cfg.producers[0].goods.name, "z");
    assert_eq!(cfg.warehouse_capacity(), 400);
}

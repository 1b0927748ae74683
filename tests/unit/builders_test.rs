//! Tests for builder modules

use std::time::Duration;

use prometheus_depot::builders::{build_monitor, build_workers, standard_fleet, standard_roster};
use prometheus_depot::config::SimulationConfig;
use prometheus_depot::core::{FixedCarrierSelector, MonitorState};

#[test]
fn test_standard_roster_naming_and_rates() {
    let roster = standard_roster(4, 50.0);
    let names: Vec<_> = roster.iter().map(|p| p.name.as_str()).collect();
    let goods: Vec<_> = roster.iter().map(|p| p.goods.name.as_str()).collect();

    assert_eq!(names, vec!["A", "B", "C", "D"]);
    assert_eq!(goods, vec!["a", "b", "c", "d"]);
    assert_eq!(roster[3].goods.package_type, "Box 4");
    assert_eq!(roster[0].units_per_tick(), 50);
    assert_eq!(roster[2].units_per_tick(), 60);
}

#[test]
fn test_standard_fleet() {
    let fleet = standard_fleet();
    let capacities: Vec<_> = fleet.iter().map(|c| c.capacity).collect();
    assert_eq!(capacities, vec![150, 300]);
}

#[test]
fn test_build_workers_shares_the_tick() {
    let cfg = SimulationConfig {
        ticks: 12,
        tick_interval_ms: 900,
        ..SimulationConfig::default()
    };
    let workers = build_workers(&cfg);

    assert_eq!(workers.len(), 3);
    assert_eq!(cfg.producer_pace(), Duration::from_millis(300));
    assert_eq!(workers[1].source().name, "B");
}

#[test]
fn test_build_monitor_starts_idle() {
    let cfg = SimulationConfig::default();
    let monitor = build_monitor(&cfg, FixedCarrierSelector(0)).unwrap();

    assert_eq!(monitor.handle().state(), MonitorState::Idle);
    assert!(monitor.log().is_empty());
}

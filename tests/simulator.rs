use std::time::Duration;

use chrono::Utc;
use satboard::sim::{Fix, FixSet, Simulator, SimulatorConfig, SimulatorMode, DEFAULT_DOPPLER_BAND};

fn fix(id: &str, latitude_deg: f64) -> Fix {
    Fix {
        id: id.to_string(),
        name: None,
        latitude_deg,
        longitude_deg: 10.0,
        height_km: 500.0,
        velocity_km_s: 7.6,
        heading_deg: 45.0,
        azimuth_deg: 90.0,
        elevation_deg: 20.0,
        range_km: 7000.0,
        doppler_factor: 1.0,
        fix_timestamp: Utc::now(),
    }
}

fn fix_set(fixes: Vec<Fix>) -> FixSet {
    FixSet {
        fixes,
        reference_timestamp: Utc::now(),
    }
}

fn fast_config() -> SimulatorConfig {
    SimulatorConfig {
        tick: Duration::from_millis(20),
        marker_interval: Duration::from_millis(1),
        doppler_band: DEFAULT_DOPPLER_BAND,
    }
}

#[tokio::test]
async fn publishes_the_full_set_every_tick() {
    let mut simulator = Simulator::new(fast_config());
    let mut ticks = simulator.subscribe_ticks();

    simulator
        .load_fixes(fix_set(vec![fix("a", 0.0), fix("b", 5.0)]))
        .await;

    ticks.changed().await.unwrap();
    let first = ticks.borrow_and_update().clone();
    assert_eq!(first.states.len(), 2);

    ticks.changed().await.unwrap();
    let second = ticks.borrow_and_update().clone();
    assert_eq!(second.states.len(), 2);
    assert!(second.generated_at > first.generated_at);

    // Consecutive ticks move continuously, no discontinuous jumps.
    for (before, after) in first.states.iter().zip(second.states.iter()) {
        assert_eq!(before.id, after.id);
        assert!((after.latitude_deg - before.latitude_deg).abs() < 1.0);
        let mut dlon = (after.longitude_deg - before.longitude_deg).abs();
        if dlon > 180.0 {
            dlon = 360.0 - dlon;
        }
        assert!(dlon < 1.0);
    }

    simulator.stop().await;
}

#[tokio::test]
async fn corrupted_fix_is_isolated_from_the_rest_of_the_tick() {
    let mut simulator = Simulator::new(fast_config());
    let mut ticks = simulator.subscribe_ticks();

    let mut bad = fix("bad", 0.0);
    bad.latitude_deg = f64::NAN;
    simulator
        .load_fixes(fix_set(vec![fix("one", 0.0), bad, fix("three", 30.0)]))
        .await;

    ticks.changed().await.unwrap();
    let set = ticks.borrow_and_update().clone();
    let ids: Vec<&str> = set.states.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["one", "three"]);
    for state in set.states.iter() {
        assert!(state.latitude_deg.is_finite());
        assert!(state.longitude_deg.is_finite());
    }

    // Shared stats are written just after the watch publication; poll briefly.
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        let stats = simulator.status().stats;
        if stats.extrapolated == 2 {
            assert_eq!(stats.skipped, 1);
            break;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "tick stats never updated"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    simulator.stop().await;
}

#[tokio::test]
async fn empty_refresh_transitions_to_idle() {
    let mut simulator = Simulator::new(fast_config());
    let mut ticks = simulator.subscribe_ticks();

    simulator.load_fixes(fix_set(vec![fix("a", 0.0)])).await;
    ticks.changed().await.unwrap();
    assert!(matches!(
        simulator.status().mode,
        SimulatorMode::Running { objects: 1, .. }
    ));

    simulator.load_fixes(fix_set(vec![])).await;
    assert!(matches!(simulator.status().mode, SimulatorMode::Idle));
    ticks.changed().await.unwrap();
    assert!(ticks.borrow_and_update().states.is_empty());
}

#[tokio::test]
async fn reload_replaces_the_tracked_set() {
    let mut simulator = Simulator::new(fast_config());
    let mut ticks = simulator.subscribe_ticks();

    simulator
        .load_fixes(fix_set(vec![fix("old-1", 0.0), fix("old-2", 1.0)]))
        .await;
    ticks.changed().await.unwrap();
    ticks.borrow_and_update();

    simulator.load_fixes(fix_set(vec![fix("new", 2.0)])).await;

    // The next published set must come from the new worker only.
    let ids = loop {
        ticks.changed().await.unwrap();
        let set = ticks.borrow_and_update().clone();
        let ids: Vec<String> = set.states.iter().map(|s| s.id.clone()).collect();
        if ids != ["old-1", "old-2"] {
            break ids;
        }
    };
    assert_eq!(ids, ["new"]);
    assert!(matches!(
        simulator.status().mode,
        SimulatorMode::Running { objects: 1, .. }
    ));

    simulator.stop().await;
}

#[tokio::test]
async fn stop_goes_idle_and_stops_publishing() {
    let mut simulator = Simulator::new(fast_config());
    let mut ticks = simulator.subscribe_ticks();

    simulator.load_fixes(fix_set(vec![fix("a", 0.0)])).await;
    ticks.changed().await.unwrap();
    ticks.borrow_and_update();

    simulator.stop().await;
    assert!(matches!(simulator.status().mode, SimulatorMode::Idle));

    let more = tokio::time::timeout(Duration::from_millis(100), ticks.changed()).await;
    assert!(more.is_err(), "worker kept publishing after stop");
}

#[tokio::test]
async fn dead_worker_resets_status_to_idle() {
    // A zero tick makes the worker's interval construction panic; the
    // status must not stay stuck on Running afterwards.
    let mut simulator = Simulator::new(SimulatorConfig {
        tick: Duration::ZERO,
        ..SimulatorConfig::default()
    });
    simulator.load_fixes(fix_set(vec![fix("a", 0.0)])).await;

    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        if matches!(simulator.status().mode, SimulatorMode::Idle) {
            break;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "status stuck on Running after worker death"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn marker_updates_are_rate_limited() {
    let config = SimulatorConfig {
        tick: Duration::from_millis(20),
        marker_interval: Duration::from_secs(30),
        doppler_band: DEFAULT_DOPPLER_BAND,
    };
    let mut simulator = Simulator::new(config);
    let mut ticks = simulator.subscribe_ticks();
    let mut markers = simulator.subscribe_markers();

    simulator.load_fixes(fix_set(vec![fix("a", 0.0)])).await;

    // First tick pushes markers once.
    markers.changed().await.unwrap();
    assert_eq!(markers.borrow_and_update().len(), 1);

    // Several more ticks pass without a second marker push.
    for _ in 0..3 {
        ticks.changed().await.unwrap();
        ticks.borrow_and_update();
    }
    assert!(!markers.has_changed().unwrap());

    simulator.stop().await;
}

#[tokio::test]
async fn marker_positions_mirror_the_tick_set() {
    let mut simulator = Simulator::new(fast_config());
    let mut ticks = simulator.subscribe_ticks();
    let mut markers = simulator.subscribe_markers();

    simulator.load_fixes(fix_set(vec![fix("a", 0.0)])).await;
    ticks.changed().await.unwrap();
    markers.changed().await.unwrap();

    let set = ticks.borrow_and_update().clone();
    let markers = markers.borrow_and_update().clone();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].id, set.states[0].id);
    assert_eq!(markers[0].lat, set.states[0].latitude_deg);
    assert_eq!(markers[0].lon, set.states[0].longitude_deg);

    simulator.stop().await;
}

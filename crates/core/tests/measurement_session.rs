//! Measurement harness behavior driven through the full engine.

use forest_fire_core::{
    ForestSimulation, Neighborhood, SimulationConfig, DEFAULT_STEP_BATCHES,
};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .with_test_writer()
        .try_init()
        .ok();
}

fn bench_sim() -> ForestSimulation {
    // Tiny grid so the 11111-step default session finishes quickly.
    ForestSimulation::new(SimulationConfig {
        width: 8,
        height: 8,
        neighborhood: Neighborhood::Moore,
        ..SimulationConfig::default()
    })
}

#[test]
fn default_session_completes_batches_in_ascending_order() {
    init_logging();
    let mut sim = bench_sim();
    sim.measurement_mut().start();
    assert!(sim.measurement().is_active());

    let total: u64 = DEFAULT_STEP_BATCHES.iter().sum();
    for _ in 0..total {
        sim.step();
    }

    assert!(!sim.measurement().is_active());
    let batches: Vec<u64> = sim
        .measurement()
        .results()
        .iter()
        .map(|result| result.steps)
        .collect();
    assert_eq!(batches, vec![1, 10, 100, 1000, 10000]);
    assert_eq!(sim.measurement().progress(), 0.0);
}

#[test]
fn session_survives_exactly_the_expected_step_count() {
    init_logging();
    let mut sim = bench_sim();
    sim.measurement_mut().start();

    // One step short of the full backlog: still inside the last batch.
    let total: u64 = DEFAULT_STEP_BATCHES.iter().sum();
    for _ in 0..total - 1 {
        sim.step();
    }
    assert!(sim.measurement().is_active());
    assert_eq!(sim.measurement().results().len(), 4);

    sim.step();
    assert!(!sim.measurement().is_active());
    assert_eq!(sim.measurement().results().len(), 5);
}

#[test]
fn restarting_mid_session_is_rejected() {
    init_logging();
    let mut sim = bench_sim();
    sim.measurement_mut().start();
    for _ in 0..5 {
        sim.step();
    }
    let results_before = sim.measurement().results().len();

    // Logged as a warning, otherwise a no-op.
    sim.measurement_mut().start();
    assert!(sim.measurement().is_active());
    assert_eq!(sim.measurement().results().len(), results_before);
}

#[test]
fn abort_ends_the_session_and_discards_the_backlog() {
    init_logging();
    let mut sim = bench_sim();
    sim.measurement_mut().start();
    for _ in 0..15 {
        sim.step();
    }
    assert!(sim.measurement().is_active());

    sim.measurement_mut().abort();
    assert!(!sim.measurement().is_active());
    assert_eq!(sim.measurement().progress(), 0.0);

    // Further steps no longer feed a session.
    sim.step();
    assert!(!sim.measurement().is_active());
}

#[test]
fn progress_resets_at_each_batch_boundary() {
    init_logging();
    let mut sim = bench_sim();
    sim.measurement_mut().start();

    // Finishing the 1-step batch leaves the 10-step batch untouched.
    sim.step();
    assert_eq!(sim.measurement().results().len(), 1);
    assert_eq!(sim.measurement().progress(), 0.0);

    sim.step();
    let progress = sim.measurement().progress();
    assert!(progress > 0.0 && progress < 1.0);
}

use folio_fluid::{AmbientSwirl, FluidConfig, FluidMetrics, FluidSimulation, Impulse, StableFluid};

fn small_fluid(n: usize) -> StableFluid {
    StableFluid::new(n, 0.15, 0.000_02, 0.000_000_1)
}

fn interior_mass(sim: &StableFluid) -> f32 {
    sim.interior_density().iter().sum()
}

#[test]
fn test_creation_allocates_bordered_grids() {
    let sim = small_fluid(50);
    assert_eq!(sim.resolution(), 50);
    assert_eq!(sim.density().len(), 52 * 52);
    assert_eq!(sim.velocity_x().len(), 52 * 52);
    assert_eq!(sim.interior_density().len(), 2500);
    assert_eq!(sim.frame(), 0);
    assert!(!sim.has_driver());
}

#[test]
fn test_fields_stay_zero_without_injection() {
    let mut sim = small_fluid(32);
    for _ in 0..50 {
        sim.step();
    }

    assert!(sim.density().iter().all(|&d| d == 0.0));
    assert!(sim.velocity_x().iter().all(|&u| u == 0.0));
    assert!(sim.velocity_y().iter().all(|&v| v == 0.0));
    assert_eq!(sim.frame(), 50);
}

#[test]
fn test_injection_waits_for_next_step() {
    let mut sim = small_fluid(16);
    sim.inject_density(8, 8, 3.0);
    sim.inject_velocity(8, 8, 1.0, 0.0);

    assert_eq!(sim.density_at(8, 8), 0.0);
    assert_eq!(sim.pending().len(), 2);

    sim.step();

    assert!(sim.pending().is_empty());
    assert!(sim.density_at(8, 8) > 0.0);
}

#[test]
fn test_single_step_diffuses_point_source() {
    let mut sim = StableFluid::new(128, 0.15, 0.000_02, 0.000_000_1);
    sim.inject_density(64, 64, 80.0);

    sim.step();

    let center = sim.density_at(64, 64);
    assert!(center < 80.0 && center > 0.0, "center density {}", center);
    for (x, y) in [(63, 64), (65, 64), (64, 63), (64, 65)] {
        let neighbour = sim.density_at(x, y);
        assert!(neighbour > 0.0, "neighbour ({}, {}) = {}", x, y, neighbour);
    }
}

#[test]
fn test_density_mass_holds_in_still_fluid() {
    let mut sim = small_fluid(64);
    sim.inject_density(32, 32, 80.0);

    for _ in 0..5 {
        sim.step();
    }

    let mass = interior_mass(&sim);
    assert!((mass - 80.0).abs() / 80.0 < 0.01, "mass drifted to {}", mass);
}

#[test]
fn test_velocity_impulse_carries_density() {
    let mut sim = small_fluid(32);
    sim.inject_density(10, 16, 10.0);
    for y in 12..=20 {
        for x in 6..=14 {
            sim.inject_velocity(x, y, 2.0, 0.0);
        }
    }

    for _ in 0..3 {
        sim.step();
    }

    let grid = sim.grid();
    let mass = interior_mass(&sim);
    let (mut cx, mut cy) = (0.0, 0.0);
    for (x, y) in grid.interior() {
        let d = sim.density_at(x, y);
        cx += x as f32 * d;
        cy += y as f32 * d;
    }
    cx /= mass;
    cy /= mass;

    assert!(cx > 11.0, "density centroid did not move right: {}", cx);
    assert!((cy - 16.0).abs() < 2.0, "density drifted vertically: {}", cy);
}

#[test]
fn test_trait_force_maps_to_velocity_impulse() {
    let mut sim = small_fluid(16);
    FluidSimulation::add_force(&mut sim, 4, 5, glam::Vec2::new(1.5, -2.0));
    FluidSimulation::add_density(&mut sim, 4, 5, 2.0);

    assert_eq!(
        sim.pending(),
        &[
            Impulse::Velocity { x: 4, y: 5, delta: glam::Vec2::new(1.5, -2.0) },
            Impulse::Density { x: 4, y: 5, amount: 2.0 },
        ]
    );
}

#[test]
fn test_ambient_swirl_fires_on_eighth_frame() {
    let mut config = FluidConfig::default();
    config.resolution = 64;
    let mut sim = StableFluid::from_config(&config);
    assert!(sim.has_driver());

    for _ in 0..7 {
        sim.step();
    }
    assert_eq!(interior_mass(&sim), 0.0);

    sim.step();
    assert!(interior_mass(&sim) > 0.0);
    assert!(sim.velocity_x().iter().any(|&u| u != 0.0));
}

#[test]
fn test_ambient_swirl_can_be_removed() {
    let mut sim = small_fluid(32);
    sim.set_driver(Some(Box::new(AmbientSwirl::default())));
    sim.set_driver(None);

    for _ in 0..16 {
        sim.step();
    }
    assert_eq!(interior_mass(&sim), 0.0);
}

#[test]
fn test_reset_clears_state() {
    let mut sim = small_fluid(16);
    sim.inject_density(8, 8, 5.0);
    sim.step();
    sim.inject_density(4, 4, 1.0);

    sim.reset();

    assert!(sim.density().iter().all(|&d| d == 0.0));
    assert!(sim.pending().is_empty());
    assert_eq!(sim.frame(), 0);
}

#[test]
fn test_metrics_track_injected_mass() {
    let mut sim = small_fluid(32);
    let empty = FluidMetrics::analyze(&sim, 0);
    assert_eq!(empty.total_mass, 0.0);
    assert_eq!(empty.max_velocity, 0.0);

    sim.inject_density(16, 16, 4.0);
    sim.step();

    let metrics = FluidMetrics::analyze(&sim, sim.frame());
    assert!((metrics.total_mass - 4.0).abs() < 0.04, "mass {}", metrics.total_mass);
    assert!(metrics.max_density > 0.0 && metrics.max_density < 4.0);
    assert_eq!(metrics.max_velocity, 0.0);
    assert_eq!(metrics.frame, 1);

    sim.inject_velocity(8, 8, 1.0, 0.0);
    sim.step();
    let moving = FluidMetrics::analyze(&sim, sim.frame());
    assert!(moving.max_velocity > 0.0);
    assert!(moving.avg_velocity > 0.0);
}

#[test]
fn test_stays_finite_under_heavy_stirring() {
    let mut sim = small_fluid(48);
    for frame in 0..60 {
        let x = 10 + (frame % 28);
        sim.inject_density(x, 24, 80.0);
        sim.inject_velocity(x, 24, 40.0, -40.0);
        sim.step();
    }

    assert!(sim.density().iter().all(|d| d.is_finite()));
    assert!(sim.velocity_x().iter().chain(sim.velocity_y()).all(|v| v.is_finite()));
}

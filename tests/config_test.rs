use folio_fluid::{FluidConfig, FluidError, StableFluid};
use std::path::Path;

#[test]
fn test_defaults_are_valid() {
    let config = FluidConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.resolution, 128);
    assert_eq!(config.solver_iterations, 20);
    assert_eq!(config.ambient.interval, 8);
    assert_eq!(config.pointer.density, 80.0);
}

#[test]
fn test_partial_json_fills_defaults() {
    let config = FluidConfig::from_json(r#"{ "resolution": 64, "ambient": { "enabled": false } }"#).unwrap();
    assert_eq!(config.resolution, 64);
    assert!(!config.ambient.enabled);
    assert_eq!(config.ambient.radius, 16.0);
    assert_eq!(config.dt, FluidConfig::default().dt);
}

#[test]
fn test_json_output_loads_back() {
    let mut config = FluidConfig::default();
    config.viscosity = 0.001;
    config.display.width = 300;

    let json = config.to_json().unwrap();
    assert_eq!(FluidConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_rejects_invalid_values() {
    let cases = [
        (r#"{ "resolution": 0 }"#, "resolution"),
        (r#"{ "dt": 0.0 }"#, "dt"),
        (r#"{ "diffusion": -1.0 }"#, "diffusion"),
        (r#"{ "viscosity": -0.5 }"#, "viscosity"),
        (r#"{ "solver_iterations": 0 }"#, "solver_iterations"),
        (r#"{ "ambient": { "interval": 0 } }"#, "ambient.interval"),
        (r#"{ "display": { "width": 0 } }"#, "display"),
    ];

    for (json, expected) in cases {
        match FluidConfig::from_json(json) {
            Err(FluidError::InvalidConfig { field, .. }) => assert_eq!(field, expected, "{}", json),
            other => panic!("{} should fail on {}, got {:?}", json, expected, other),
        }
    }
}

#[test]
fn test_malformed_json_is_reported() {
    assert!(matches!(FluidConfig::from_json("{ resolution: "), Err(FluidError::Json(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = FluidConfig::load(Path::new("does/not/exist.json")).unwrap_err();
    assert!(matches!(err, FluidError::Io { .. }));
    assert!(err.to_string().contains("exist.json"));
}

#[test]
fn test_load_from_file() {
    let dir = std::env::temp_dir().join("folio_fluid_config_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("fluid.json");
    std::fs::write(&path, r#"{ "resolution": 40, "solver_iterations": 8 }"#).unwrap();

    let config = FluidConfig::load(&path).unwrap();
    let sim = StableFluid::from_config(&config);

    assert_eq!(sim.resolution(), 40);
    assert!(sim.has_driver());
}

//! # World Settings Tests
//!
//! Parsing, baking and running world settings files.

use std::path::PathBuf;

use strata::{
    run_generation, AppError, ChunkSizeSetting, CountingSink, PrefabRegistry, SettingsError,
    SharedSink, WorldSettings,
};
use strata_procedural::{ChunkDimensions, GenerationError, PrefabHandle};

fn bundled_world() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/world.toml")
}

/// Test: The bundled world file parses and bakes.
#[test]
fn test_bundled_world_file() {
    let settings = WorldSettings::load(bundled_world()).unwrap();

    assert_eq!(settings.noise.seed, 0);
    assert_eq!(settings.chunks.size, ChunkSizeSetting::Axes([16, 32, 16]));
    assert_eq!(settings.chunks.count, 16);

    let (config, options) = settings.bake(&PrefabRegistry::with_builtin()).unwrap();
    assert_eq!(config.chunk_size, ChunkDimensions::new(16, 32, 16));
    assert_eq!(config.validate().unwrap().side(), 4);
    assert_eq!(options.columns_per_batch, 4);
}

/// Test: Every section maps onto the generator's config.
#[test]
fn test_full_file_bakes() {
    let text = r#"
        [noise]
        seed = 1234
        frequency = 0.02
        amplitude = 0.75
        min = -0.5
        max = 1.5

        [chunks]
        size = 12
        count = 9

        [placement]
        prefab = "stone"

        [execution]
        worker_threads = 3
        columns_per_batch = 16
    "#;
    let settings = WorldSettings::from_toml_str(text).unwrap();

    let mut registry = PrefabRegistry::with_builtin();
    registry.register("stone", PrefabHandle::new(7));
    let (config, options) = settings.bake(&registry).unwrap();

    assert_eq!(config.noise.seed, 1234);
    assert_eq!(config.noise.frequency, 0.02);
    assert_eq!(config.noise.amplitude, 0.75);
    assert_eq!(config.noise.remap_min, -0.5);
    assert_eq!(config.noise.remap_max, 1.5);
    assert_eq!(config.chunk_size, ChunkDimensions::cube(12));
    assert_eq!(config.chunk_count, 9);
    assert_eq!(config.placement_prefab, PrefabHandle::new(7));
    assert_eq!(options.worker_threads, 3);
    assert_eq!(options.columns_per_batch, 16);
}

/// Test: A drawn seed above i64::MAX can be written back as a string.
#[test]
fn test_full_range_seed_replays() {
    let text = "[noise]\nseed = \"0xfedcba9876543210\"\n[chunks]\nsize = 4\n";
    let settings = WorldSettings::from_toml_str(text).unwrap();
    assert_eq!(settings.noise.seed, 0xfedc_ba98_7654_3210);

    let report = run_generation(
        &settings,
        &PrefabRegistry::with_builtin(),
        &mut CountingSink::new(),
    )
    .unwrap();
    assert_eq!(report.seed, 0xfedc_ba98_7654_3210);
}

/// Test: Unknown keys are rejected instead of ignored.
#[test]
fn test_unknown_key_rejected() {
    let result = WorldSettings::from_toml_str("[noise]\nfrequncy = 0.1\n");
    assert!(matches!(result, Err(SettingsError::Parse(_))));
}

/// Test: A wrongly shaped size is a parse error.
#[test]
fn test_bad_size_shape_rejected() {
    let result = WorldSettings::from_toml_str("[chunks]\nsize = [16, 16]\n");
    assert!(matches!(result, Err(SettingsError::Parse(_))));
}

/// Test: An unregistered prefab names the known ones.
#[test]
fn test_unknown_prefab() {
    let settings = WorldSettings::from_toml_str("[placement]\nprefab = \"lava\"\n").unwrap();
    let err = settings.bake(&PrefabRegistry::with_builtin()).unwrap_err();

    match err {
        SettingsError::UnknownPrefab { name, known } => {
            assert_eq!(name, "lava");
            assert_eq!(known, "grass");
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// Test: A missing file reports its path.
#[test]
fn test_missing_file() {
    let err = WorldSettings::load("does/not/exist.toml").unwrap_err();
    assert!(matches!(err, SettingsError::Read { .. }));
    assert!(err.to_string().contains("does/not/exist.toml"));
}

/// Test: Range problems surface as generation errors, not settings errors.
#[test]
fn test_non_square_count_fails_at_generation() {
    let settings = WorldSettings::from_toml_str("[chunks]\nsize = 4\ncount = 3\n").unwrap();
    let result = run_generation(
        &settings,
        &PrefabRegistry::with_builtin(),
        &mut CountingSink::new(),
    );

    assert!(matches!(
        result,
        Err(AppError::Generation(GenerationError::NonSquareChunkCount {
            count: 3,
            side: 1
        }))
    ));
}

/// Test: A settings file drives a full run into the bundled sinks.
#[test]
fn test_run_from_settings() {
    let text = r#"
        [noise]
        seed = 99
        min = 0.3
        max = 0.7

        [chunks]
        size = [8, 16, 8]
        count = 4
    "#;
    let settings = WorldSettings::from_toml_str(text).unwrap();
    let registry = PrefabRegistry::with_builtin();

    let mut counting = CountingSink::new();
    let report = run_generation(&settings, &registry, &mut counting).unwrap();
    assert_eq!(report.seed, 99);
    assert_eq!(report.chunks_generated(), 4);
    assert_eq!(counting.placed(), report.emitted());

    let bounds = counting.bounds().unwrap();
    assert_eq!((bounds.min.x, bounds.min.y, bounds.min.z), (0, 0, 0));
    assert!(bounds.max.x <= 15 && bounds.max.z <= 15 && bounds.max.y <= 15);

    // Same settings, same output.
    let mut shared = SharedSink::new();
    run_generation(&settings, &registry, &mut shared).unwrap();
    let placed = shared.drain();
    assert_eq!(placed.len(), counting.placed());
    assert!(placed.iter().all(|r| r.prefab == PrefabHandle::new(1)));
}

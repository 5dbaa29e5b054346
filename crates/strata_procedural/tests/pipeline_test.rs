//! # Generation Pipeline Tests
//!
//! Runs whole generation passes and checks what reaches the sink.

use strata_procedural::{
    BlockPos, CancellationToken, ChunkDimensions, GenerationConfig, GenerationError,
    GeneratorOptions, NoiseSettings, PlacementRequest, PlacementSink, PrefabHandle, SeedSource,
    WorldGenerator,
};

fn options(worker_threads: usize, columns_per_batch: usize) -> GeneratorOptions {
    GeneratorOptions {
        worker_threads,
        columns_per_batch,
    }
}

fn hilly_config(seed: u64) -> GenerationConfig {
    GenerationConfig {
        noise: NoiseSettings {
            seed,
            frequency: 0.07,
            amplitude: 1.0,
            remap_min: 0.1,
            remap_max: 0.9,
        },
        chunk_size: ChunkDimensions::new(8, 24, 8),
        chunk_count: 9,
        placement_prefab: PrefabHandle::new(1),
    }
}

fn run(config: GenerationConfig, options: GeneratorOptions) -> Vec<PlacementRequest> {
    let generator = WorldGenerator::new(config, options).unwrap();
    let mut sink: Vec<PlacementRequest> = Vec::new();
    generator.generate(&mut sink).unwrap();
    sink
}

/// Test: A 2x2x2 chunk with height 1 everywhere emits its bottom layer.
#[test]
fn test_single_chunk_bottom_layer() {
    let config = GenerationConfig {
        noise: NoiseSettings {
            seed: 99,
            frequency: 0.3,
            amplitude: 1.0,
            remap_min: 1.0,
            remap_max: 1.0,
        },
        chunk_size: ChunkDimensions::cube(2),
        chunk_count: 1,
        placement_prefab: PrefabHandle::new(42),
    };

    let placed = run(config, GeneratorOptions::default());

    let prefab = PrefabHandle::new(42);
    assert_eq!(
        placed,
        vec![
            PlacementRequest::new(BlockPos::new(0, 0, 0), prefab),
            PlacementRequest::new(BlockPos::new(0, 0, 1), prefab),
            PlacementRequest::new(BlockPos::new(1, 0, 0), prefab),
            PlacementRequest::new(BlockPos::new(1, 0, 1), prefab),
        ]
    );
}

/// Test: Same config and seed give identical output for any scheduling.
#[test]
fn test_output_independent_of_threads_and_batching() {
    let reference = run(hilly_config(777), options(1, 1));
    assert!(!reference.is_empty());

    for (threads, columns) in [(2, 1), (4, 3), (8, 64), (3, 1000)] {
        let placed = run(hilly_config(777), options(threads, columns));
        assert_eq!(
            placed, reference,
            "threads = {threads}, columns_per_batch = {columns}"
        );
    }
}

/// Test: Different seeds give different terrain.
#[test]
fn test_different_seeds_differ() {
    let a = run(hilly_config(1), GeneratorOptions::default());
    let b = run(hilly_config(2), GeneratorOptions::default());
    assert_ne!(a, b);
}

/// Test: No placement is emitted twice and every one lies inside the world.
#[test]
fn test_placements_unique_and_in_bounds() {
    let placed = run(hilly_config(31337), GeneratorOptions::default());

    let mut positions: Vec<BlockPos> = placed.iter().map(|r| r.world_position).collect();
    positions.sort_unstable();
    let before = positions.len();
    positions.dedup();
    assert_eq!(positions.len(), before, "duplicate placement");

    // 3x3 grid of 8x24x8 chunks
    for pos in &positions {
        assert!((0..24).contains(&pos.x), "{pos:?}");
        assert!((0..24).contains(&pos.y), "{pos:?}");
        assert!((0..24).contains(&pos.z), "{pos:?}");
    }
}

/// Test: Chunks are flushed in index order, one grid row of x at a time.
#[test]
fn test_chunks_flushed_in_order() {
    struct ChunkOrder {
        size: i32,
        seen: Vec<(i32, i32)>,
    }

    impl PlacementSink for ChunkOrder {
        fn place(&mut self, request: PlacementRequest) {
            let key = (
                request.world_position.x.div_euclid(self.size),
                request.world_position.z.div_euclid(self.size),
            );
            if self.seen.last() != Some(&key) {
                self.seen.push(key);
            }
        }
    }

    let config = GenerationConfig {
        chunk_size: ChunkDimensions::new(4, 12, 4),
        chunk_count: 4,
        ..hilly_config(5)
    };
    let generator = WorldGenerator::new(config, GeneratorOptions::default()).unwrap();
    let mut sink = ChunkOrder {
        size: 4,
        seen: Vec::new(),
    };
    let report = generator.generate(&mut sink).unwrap();

    assert_eq!(report.chunks_generated(), 4);
    // Minimum height is trunc(0.1 * 11) = 1, so every chunk emits.
    assert_eq!(sink.seen, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
}

/// Test: A saturated height field fills every column to the top.
#[test]
fn test_saturated_height_fills_chunk() {
    let config = GenerationConfig {
        noise: NoiseSettings {
            seed: 3,
            frequency: 0.1,
            amplitude: 4.0,
            remap_min: 1.0,
            remap_max: 1.0,
        },
        chunk_size: ChunkDimensions::new(5, 5, 5),
        chunk_count: 1,
        placement_prefab: PrefabHandle::new(0),
    };
    let generator = WorldGenerator::new(config, GeneratorOptions::default()).unwrap();
    let mut sink: Vec<PlacementRequest> = Vec::new();
    let report = generator.generate(&mut sink).unwrap();

    assert_eq!(report.solid_blocks(), 125);
    // Only the 3x3x3 core is buried.
    assert_eq!(report.culled(), 27);
    assert_eq!(sink.len(), 125 - 27);
}

/// Test: Seed zero is replaced by a drawn, non-zero seed.
#[test]
fn test_zero_seed_is_resolved() {
    let generator = WorldGenerator::new(hilly_config(0), GeneratorOptions::default()).unwrap();
    let mut sink: Vec<PlacementRequest> = Vec::new();
    let report = generator.generate(&mut sink).unwrap();

    assert_ne!(report.seed, 0);
    assert_eq!(report.seed_source, SeedSource::Drawn);
    // The supplied config is left as authored.
    assert_eq!(generator.config().noise.seed, 0);
}

/// Test: A drawn seed reproduces the same world when configured explicitly.
#[test]
fn test_drawn_seed_replays() {
    let generator = WorldGenerator::new(hilly_config(0), GeneratorOptions::default()).unwrap();
    let mut first: Vec<PlacementRequest> = Vec::new();
    let report = generator.generate(&mut first).unwrap();

    let replay = run(hilly_config(report.seed), GeneratorOptions::default());
    assert_eq!(replay, first);
}

/// Test: Cancelling mid-run stops at a chunk boundary.
#[test]
fn test_cancel_between_chunks() {
    struct CancelAfterFirstChunk {
        token: CancellationToken,
        placed: usize,
    }

    impl PlacementSink for CancelAfterFirstChunk {
        fn place(&mut self, _request: PlacementRequest) {
            self.placed += 1;
            self.token.cancel();
        }
    }

    let generator = WorldGenerator::new(hilly_config(8), GeneratorOptions::default()).unwrap();
    let mut sink = CancelAfterFirstChunk {
        token: generator.cancellation_token(),
        placed: 0,
    };

    let result = generator.generate(&mut sink);

    assert_eq!(result, Err(GenerationError::Cancelled { completed: 1 }));
    // The first chunk was flushed completely, not cut off after one request.
    assert!(sink.placed > 1);
}

/// Test: Invalid configs fail before any placement is made.
#[test]
fn test_invalid_config_is_fatal() {
    let bad_count = GenerationConfig {
        chunk_count: 8,
        ..hilly_config(1)
    };
    assert!(matches!(
        WorldGenerator::new(bad_count, GeneratorOptions::default()),
        Err(GenerationError::NonSquareChunkCount { count: 8, side: 2 })
    ));

    let bad_size = GenerationConfig {
        chunk_size: ChunkDimensions::new(8, -2, 8),
        ..hilly_config(1)
    };
    assert!(matches!(
        WorldGenerator::new(bad_size, GeneratorOptions::default()),
        Err(GenerationError::InvalidChunkDimensions { .. })
    ));
}

/// Test: A frequency that pushes samples off the noise lattice is rejected.
#[test]
fn test_extreme_frequency_rejected() {
    let config = GenerationConfig {
        noise: NoiseSettings {
            seed: 1,
            frequency: 1.0e10,
            ..NoiseSettings::default()
        },
        chunk_size: ChunkDimensions::cube(4),
        chunk_count: 1,
        placement_prefab: PrefabHandle::new(1),
    };

    assert!(matches!(
        WorldGenerator::new(config, GeneratorOptions::default()),
        Err(GenerationError::ExtentOverflow(_))
    ));
}

/// Test: An oversized batch setting generates the same world as the default.
#[test]
fn test_oversized_batch_matches_default() {
    let config = GenerationConfig {
        chunk_size: ChunkDimensions::cube(4),
        chunk_count: 1,
        ..hilly_config(1)
    };
    let reference = run(config, GeneratorOptions::default());

    for columns in [1 << 62, usize::MAX] {
        let placed = run(config, options(1, columns));
        assert_eq!(placed, reference, "columns_per_batch = {columns}");
    }
}

//! Integration tests for chunk loading, world edits and the update loop
use cgmath::Point3;
use voxel_chunks::*;

#[test]
fn same_seed_fills_identical_chunks() {
    let position = ChunkPosition::new(-3, 7);
    let fill = |seed| {
        let generator = TerrainGenerator::new(seed);
        let mut chunk = Chunk::new(position);
        chunk.fill(|global| generator.map_definition(global));
        chunk
    };

    let a = fill(99);
    let b = fill(99);
    assert_eq!(a.voxels().as_slice(), b.voxels().as_slice());
    assert!(a.voxels().solid_count() > 0);
}

#[test]
fn negative_globals_map_to_negative_chunks() {
    let (chunk, local) = ChunkDirectory::local_position_of(Point3::new(-1, 10, 0)).unwrap();
    assert_eq!(chunk, ChunkPosition::new(-1, 0));
    assert_eq!(local, Point3::new(15, 10, 0));

    let (chunk, local) = ChunkDirectory::local_position_of(Point3::new(-16, 0, -17)).unwrap();
    assert_eq!(chunk, ChunkPosition::new(-1, -2));
    assert_eq!(local, Point3::new(0, 0, 15));

    assert_eq!(ChunkDirectory::local_position_of(Point3::new(0, -1, 0)), None);
    assert_eq!(ChunkDirectory::local_position_of(Point3::new(0, 128, 0)), None);
}

#[test]
fn edits_land_in_the_owning_chunk() {
    let mut directory = ChunkDirectory::new();
    directory.add_chunk(ChunkPosition::new(-1, 0));

    assert!(directory.set_voxel(Point3::new(-1, 10, 0), SOLID).unwrap());
    let chunk = directory.get_chunk(ChunkPosition::new(-1, 0)).unwrap();
    assert_eq!(chunk.get_voxel(15, 10, 0).unwrap(), SOLID);
    assert_eq!(directory.get_voxel(Point3::new(-1, 10, 0)), Some(SOLID));

    // Unloaded chunks are left alone
    assert!(!directory.set_voxel(Point3::new(0, 10, 0), SOLID).unwrap());
    assert_eq!(directory.get_voxel(Point3::new(0, 10, 0)), None);

    assert!(matches!(
        directory.set_voxel(Point3::new(-1, 200, 0), SOLID),
        Err(VoxelError::OutOfRange { .. })
    ));
}

#[test]
fn loading_never_duplicates_chunks() {
    let mut directory = ChunkDirectory::new();
    let mut total = 0;
    for step in 0..10 {
        let player = Point3::new(step as f32 * 7.5, 64.0, -(step as f32) * 3.0);
        total += directory.load_chunks_around_player(player, 2).len();
    }

    assert_eq!(directory.len(), total);
    let mut positions: Vec<_> = directory.chunks().map(|chunk| chunk.position).collect();
    positions.sort();
    positions.dedup();
    assert_eq!(positions.len(), directory.len());
}

#[test]
fn engine_uploads_and_draws_loaded_chunks() {
    let config = WorldConfig {
        seed: 7,
        load_radius: 1,
        generation: GenerationMethod::Flat { height: 32 },
        block_data: None,
    };
    let mut engine = EngineState::new(config).unwrap();
    let mut backend = HeadlessBackend::new();

    let report = engine.update(Point3::new(8.0, 40.0, 8.0), &mut backend);
    assert_eq!(report.chunks_added.len(), 9);
    assert_eq!(report.chunks_meshed, 9);
    assert_eq!(backend.mesh_count(), 9);

    let origin = engine.mesh_handle(ChunkPosition::new(-1, 1)).unwrap();
    let uploaded = backend.get(origin).unwrap();
    assert_eq!(uploaded.position, ChunkPosition::new(-1, 1));
    assert_eq!(uploaded.origin.x, -16.0);
    assert_eq!(uploaded.origin.y, -(CHUNK_HEIGHT as f32));
    assert_eq!(uploaded.origin.z, 16.0);

    engine.render(&mut backend);
    assert_eq!(backend.draw_calls, 9);

    // Nothing new to do while the player stays put
    let report = engine.update(Point3::new(8.0, 40.0, 8.0), &mut backend);
    assert_eq!(report, UpdateReport::default());
}

#[test]
fn edited_chunks_are_remeshed_and_old_meshes_released() {
    let config = WorldConfig {
        load_radius: 0,
        generation: GenerationMethod::Empty,
        ..WorldConfig::default()
    };
    let mut engine = EngineState::new(config).unwrap();
    let mut backend = HeadlessBackend::new();

    engine.update(Point3::new(1.0, 1.0, 1.0), &mut backend);
    let position = ChunkPosition::new(0, 0);
    let first = engine.mesh_handle(position).unwrap();
    assert_eq!(backend.get(first).unwrap().index_count, 0);

    assert!(engine.set_block(Point3::new(4, 20, 4), SOLID).unwrap());
    let report = engine.update(Point3::new(1.0, 1.0, 1.0), &mut backend);
    assert!(report.chunks_added.is_empty());
    assert_eq!(report.chunks_meshed, 1);

    let second = engine.mesh_handle(position).unwrap();
    assert_ne!(first, second);
    assert!(backend.get(first).is_none());
    assert_eq!(backend.get(second).unwrap().index_count, 36);
    assert_eq!(backend.mesh_count(), 1);

    engine.render(&mut backend);
    assert_eq!(backend.draw_calls, 1);
    assert_eq!(backend.indices_drawn, 36);
}

#[test]
fn edge_edits_remesh_the_neighboring_chunk() {
    let config = WorldConfig {
        load_radius: 1,
        generation: GenerationMethod::Solid,
        ..WorldConfig::default()
    };
    let mut engine = EngineState::new(config).unwrap();
    let mut backend = HeadlessBackend::new();
    let player = Point3::new(8.0, 64.0, 8.0);
    engine.update(player, &mut backend);

    let west = ChunkPosition::new(-1, 0);
    let before = engine.world.get_chunk(west).unwrap().mesh().unwrap().face_count();
    let west_handle = engine.mesh_handle(west).unwrap();

    // Local x = 0 of chunk (0, 0) borders chunk (-1, 0)
    assert!(engine.set_block(Point3::new(0, 20, 5), AIR).unwrap());
    let report = engine.update(player, &mut backend);
    assert_eq!(report.chunks_meshed, 2);
    assert!(backend.get(west_handle).is_none());

    let chunk = engine.world.get_chunk(west).unwrap();
    let stored = chunk.mesh().unwrap();
    let fresh = MeshBuilder::new(&engine.registry).generate_mesh(chunk, &engine.world);
    assert_eq!(stored, &fresh);
    assert_eq!(stored.face_count(), before + 1);
}

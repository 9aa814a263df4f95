use terrace_blocks::BlockType;
use terrace_chunk::{Chunk, ChunkRegistry};
use terrace_geom::{IVec2, IVec3, Vec3};
use terrace_io::{PersistenceError, load, restore, save, snapshot};
use terrace_world::ChunkDims;

fn world() -> ChunkRegistry {
    let d = ChunkDims::new(3, 2, 3);
    let mut reg = ChunkRegistry::new(d);
    for (i, origin) in [IVec3::ZERO, IVec3::new(0, 2, 0), IVec3::new(-3, 0, 6)].into_iter().enumerate() {
        let chunk = reg.insert(Chunk::filled(origin, d, BlockType::ALL[i * 3])).unwrap();
        chunk.blocks[i] = BlockType::Sand;
        chunk.health[i + 1] = BlockType::Crack3;
        chunk.visible = i != 1;
    }
    reg.add_column(IVec2::new(0, 0));
    reg.add_column(IVec2::new(-3, 6));
    reg
}

#[test]
fn save_then_load_restores_everything() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saves").join("world.dat");
    let original = world();
    let observer = Vec3::new(4.5, 21.0, -3.25);
    save(&path, &snapshot(&original, observer)).unwrap();

    let rec = load(&path).unwrap().expect("record present");
    let (restored, at) = restore(&rec, original.dims()).unwrap();
    assert_eq!(at, observer);
    assert_eq!(restored.len(), original.len());
    for chunk in original.iter() {
        assert_eq!(restored.get(chunk.origin()), Some(chunk));
    }
    let mut cols: Vec<_> = restored.columns().map(|c| (c.x, c.z)).collect();
    cols.sort();
    assert_eq!(cols, vec![(-3, 6), (0, 0)]);
    assert!(!dir.path().join("saves").join("world.dat.tmp").exists());
}

#[test]
fn missing_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load(&dir.path().join("nothing.dat")).unwrap().is_none());
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.dat");
    std::fs::write(&path, [1u8, 2, 3]).unwrap();
    assert!(matches!(load(&path), Err(PersistenceError::Encoding(_))));
}

#[test]
fn save_overwrites_previous_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.dat");
    save(&path, &snapshot(&world(), Vec3::ZERO)).unwrap();
    let empty = ChunkRegistry::new(ChunkDims::new(3, 2, 3));
    save(&path, &snapshot(&empty, Vec3::new(1.0, 1.0, 1.0))).unwrap();
    let rec = load(&path).unwrap().unwrap();
    assert_eq!(rec.chunk_count(), 0);
    assert_eq!(rec.observer, [1.0, 1.0, 1.0]);
}

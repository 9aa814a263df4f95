use proptest::prelude::*;
use terrace_blocks::BlockType;
use terrace_chunk::Chunk;
use terrace_geom::IVec3;
use terrace_world::ChunkDims;

fn dim() -> impl Strategy<Value = i32> {
    1i32..=8
}

fn small_i32() -> impl Strategy<Value = i32> {
    -10_000i32..=10_000
}

proptest! {
    // get_local reads from linearized storage at flatten(local)
    #[test]
    fn get_local_matches_linear(cx in small_i32(), cy in small_i32(), cz in small_i32(), sx in dim(), sy in dim(), sz in dim()) {
        let d = ChunkDims::new(sx, sy, sz);
        let origin = IVec3::new(cx * sx, cy * sy, cz * sz);
        let blocks = (0..d.volume()).map(|i| BlockType::ALL[i % BlockType::ALL.len()]).collect();
        let chunk = Chunk::from_blocks(origin, d, blocks);
        for z in 0..sz { for y in 0..sy { for x in 0..sx {
            let local = IVec3::new(x, y, z);
            prop_assert_eq!(chunk.get_local(local), Some(chunk.blocks[d.flatten(local)]));
        }}}
    }

    // contains_world agrees with get_world on the faces just inside and just outside
    #[test]
    fn contains_world_and_get_world_agree(cx in small_i32(), cy in small_i32(), cz in small_i32(), sx in dim(), sy in dim(), sz in dim()) {
        let d = ChunkDims::new(sx, sy, sz);
        let o = IVec3::new(cx * sx, cy * sy, cz * sz);
        let chunk = Chunk::filled(o, d, BlockType::Stone);
        let candidates = [
            o,
            o + IVec3::new(sx - 1, sy - 1, sz - 1),
            o - IVec3::X,
            o + IVec3::new(sx, 0, 0),
            o - IVec3::Y,
            o + IVec3::new(0, sy, 0),
            o - IVec3::Z,
            o + IVec3::new(0, 0, sz),
        ];
        for p in candidates {
            let inside = chunk.contains_world(p);
            prop_assert_eq!(chunk.get_world(p).is_some(), inside);
        }
        prop_assert!(chunk.contains_world(o));
        prop_assert!(!chunk.contains_world(o - IVec3::X));
    }

    // from_blocks resizes or preserves to exact length, health starts at baseline
    #[test]
    fn from_blocks_resizes(sx in dim(), sy in dim(), sz in dim(), delta in -3i32..=3) {
        let d = ChunkDims::new(sx, sy, sz);
        let len = (d.volume() as i32 + delta).max(0) as usize;
        let chunk = Chunk::from_blocks(IVec3::ZERO, d, vec![BlockType::Dirt; len]);
        prop_assert_eq!(chunk.blocks.len(), d.volume());
        prop_assert_eq!(chunk.health.len(), d.volume());
        prop_assert!(chunk.health.iter().all(|h| *h == BlockType::BASELINE));
    }
}

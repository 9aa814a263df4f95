use terrace_chunk::{BlockAddress, ChunkRegistry, Unreachable};
use terrace_geom::{IVec3, Vec3};

/// Which side of the hit surface an action addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitAction {
    /// The voxel that was hit.
    Break,
    /// The empty voxel in front of the hit face.
    Place,
}

/// Maps a surface hit inside the chunk at `origin` to a voxel address.
pub fn resolve_hit(
    reg: &ChunkRegistry,
    point: Vec3,
    normal: Vec3,
    origin: IVec3,
    action: HitAction,
) -> Result<BlockAddress, Unreachable> {
    let offset = normal / 2.0;
    let probe = match action {
        HitAction::Break => point - offset,
        HitAction::Place => point + offset,
    };
    let local = probe.round() - origin;
    reg.locate(local, origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrace_blocks::BlockType;
    use terrace_chunk::Chunk;
    use terrace_world::ChunkDims;

    #[test]
    fn break_goes_inward_place_goes_outward() {
        let d = ChunkDims::cube(4);
        let mut reg = ChunkRegistry::new(d);
        reg.insert(Chunk::filled(IVec3::ZERO, d, BlockType::Dirt)).unwrap();
        reg.insert(Chunk::filled(IVec3::new(0, 4, 0), d, BlockType::Air)).unwrap();
        // Top face of the voxel at (2, 3, 1).
        let point = Vec3::new(2.1, 3.5, 0.8);
        let up = Vec3::new(0.0, 1.0, 0.0);
        let hit = resolve_hit(&reg, point, up, IVec3::ZERO, HitAction::Break).unwrap();
        assert_eq!(reg.world_pos(hit), IVec3::new(2, 3, 1));
        let put = resolve_hit(&reg, point, up, IVec3::ZERO, HitAction::Place).unwrap();
        assert_eq!(put.origin, IVec3::new(0, 4, 0));
        assert_eq!(reg.world_pos(put), IVec3::new(2, 4, 1));
    }
}

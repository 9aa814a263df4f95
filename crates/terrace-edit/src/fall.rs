use terrace_blocks::BlockType;
use terrace_chunk::{BlockAddress, ChunkRegistry};
use terrace_geom::IVec3;

/// Spread order for fluid reaching solid ground.
pub const FLOW_DIRECTIONS: [IVec3; 4] = [
    IVec3::new(1, 0, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(0, 0, -1),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropStep {
    /// Material moved from `from` down into `to`; `above` sat over the source.
    Fell {
        from: BlockAddress,
        to: BlockAddress,
        above: Option<BlockAddress>,
    },
    /// Landed on something solid and may spread sideways.
    Spread,
    /// Landed on something solid.
    Rested,
    /// Cursor no longer holds droppable material, or nothing below is streamed.
    Stopped,
}

/// One gravity step for the voxel at `at`.
pub fn drop_step(reg: &mut ChunkRegistry, at: BlockAddress) -> DropStep {
    let Some(material) = reg.block(at) else {
        return DropStep::Stopped;
    };
    if !material.can_drop() {
        return DropStep::Stopped;
    }
    let Ok(below) = reg.neighbor(at, -IVec3::Y) else {
        return DropStep::Stopped;
    };
    if reg.block(below) != Some(BlockType::Air) {
        return if material.can_flow() {
            DropStep::Spread
        } else {
            DropStep::Rested
        };
    }
    if let Some(chunk) = reg.get_mut(below.origin) {
        chunk.blocks[below.index] = material;
        chunk.health[below.index] = BlockType::BASELINE;
    }
    if let Some(chunk) = reg.get_mut(at.origin) {
        chunk.blocks[at.index] = BlockType::Air;
    }
    let above = reg.neighbor(at, IVec3::Y).ok();
    log::trace!(
        target: "edit",
        "{:?} fell {:?} -> {:?}",
        material,
        reg.world_pos(at),
        reg.world_pos(below)
    );
    DropStep::Fell {
        from: at,
        to: below,
        above,
    }
}

/// Copies the fluid at `from` into the neighbour in `dir` if it is empty.
/// Returns the new voxel and the strength its own drop continues with;
/// nothing happens once strength is spent.
pub fn flow_into_neighbor(
    reg: &mut ChunkRegistry,
    from: BlockAddress,
    dir: IVec3,
    strength: u32,
) -> Option<(BlockAddress, u32)> {
    let strength = strength.saturating_sub(1);
    if strength == 0 {
        return None;
    }
    let material = reg.block(from)?;
    let target = reg.neighbor(from, dir).ok()?;
    if reg.block(target) != Some(BlockType::Air) {
        return None;
    }
    let chunk = reg.get_mut(target.origin)?;
    chunk.blocks[target.index] = material;
    chunk.health[target.index] = BlockType::BASELINE;
    log::trace!(target: "edit", "{:?} flowed to {:?} ({})", material, reg.world_pos(target), strength);
    Some((target, strength))
}

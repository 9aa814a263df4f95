//! Block mutation units: break, heal, place, gravity drop and fluid flow.
//!
//! Each function applies one atomic change to the registry and reports what
//! it touched, so the caller can request redraws and schedule follow-up work.
#![forbid(unsafe_code)]

mod fall;
mod target;

pub use fall::{DropStep, FLOW_DIRECTIONS, drop_step, flow_into_neighbor};
pub use target::{HitAction, resolve_hit};

use terrace_blocks::BlockType;
use terrace_chunk::{BlockAddress, ChunkRegistry};
use terrace_geom::IVec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreakOutcome {
    /// Unbreakable voxel, chunk not resident or index outside the chunk.
    Ignored,
    /// Crack stage advanced. `start_heal` is set on the first hit from baseline.
    Damaged { start_heal: bool, stage: BlockType },
    /// Voxel emptied. `above` is the voxel to re-check for gravity, if streamed.
    Broken { above: Option<BlockAddress> },
}

/// One primary-action hit on a voxel.
pub fn break_block(reg: &mut ChunkRegistry, at: BlockAddress) -> BreakOutcome {
    let Some(chunk) = reg.get_mut(at.origin) else {
        return BreakOutcome::Ignored;
    };
    let Some(&block) = chunk.blocks.get(at.index) else {
        return BreakOutcome::Ignored;
    };
    let Some(threshold) = block.break_threshold() else {
        return BreakOutcome::Ignored;
    };
    let health = chunk.health[at.index];
    let start_heal = health == BlockType::BASELINE;
    let stage = health.next_crack();
    if stage.crack_level() >= threshold {
        chunk.blocks[at.index] = BlockType::Air;
        chunk.health[at.index] = BlockType::BASELINE;
        let above = reg.neighbor(at, IVec3::Y).ok();
        log::debug!(target: "edit", "broke {:?} at {:?}", block, reg.world_pos(at));
        BreakOutcome::Broken { above }
    } else {
        chunk.health[at.index] = stage;
        log::trace!(target: "edit", "{:?} at {:?} cracked to {:?}", block, at, stage);
        BreakOutcome::Damaged { start_heal, stage }
    }
}

/// Heal timer expiry: resets crack stage unless the voxel has been emptied.
/// Returns true when the chunk needs a redraw.
pub fn heal(reg: &mut ChunkRegistry, at: BlockAddress) -> bool {
    match reg.get_mut(at.origin) {
        Some(chunk) if chunk.blocks.get(at.index).is_some_and(|b| !b.is_air()) => {
            chunk.health[at.index] = BlockType::BASELINE;
            true
        }
        _ => false,
    }
}

/// Writes `block` into the voxel with fresh health. Returns false when the
/// chunk is not resident or the index is outside it.
pub fn place_block(reg: &mut ChunkRegistry, at: BlockAddress, block: BlockType) -> bool {
    let Some(chunk) = reg.get_mut(at.origin).filter(|c| at.index < c.blocks.len()) else {
        return false;
    };
    chunk.blocks[at.index] = block;
    chunk.health[at.index] = BlockType::BASELINE;
    log::debug!(target: "edit", "placed {:?} in {:?}#{}", block, at.origin, at.index);
    true
}

use terrace_chunk::BlockAddress;
use terrace_geom::IVec2;

/// Unit of deferred work. Each variant carries the state needed to resume it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Job {
    /// Builds the visible world one column per step, z outer, x inner.
    BuildWorld { next: i32 },
    /// Builds the hidden backdrop ring in two passes.
    BuildExtraWorld { pass: u8, next: i32 },
    /// Periodic check of how far the observer has moved since the last build.
    WatchObserver,
    /// Builds the four neighbours of `center`, queueing each with one less radius.
    BuildRecursive { center: IVec2, radius: u32, dir: u8 },
    /// Hides every known column at or beyond the draw radius from `center`.
    HideColumns { center: IVec2 },
    /// Restores crack stage after the heal delay.
    Heal { at: BlockAddress },
    /// Gravity for one voxel; fluids spread with `strength` when they land.
    Drop { at: BlockAddress, strength: u32 },
}

impl Job {
    /// Log-friendly name.
    pub fn name(&self) -> &'static str {
        match self {
            Job::BuildWorld { .. } => "build_world",
            Job::BuildExtraWorld { .. } => "build_extra_world",
            Job::WatchObserver => "watch_observer",
            Job::BuildRecursive { .. } => "build_recursive",
            Job::HideColumns { .. } => "hide_columns",
            Job::Heal { .. } => "heal",
            Job::Drop { .. } => "drop",
        }
    }
}

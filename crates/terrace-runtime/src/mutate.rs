use terrace_chunk::{BlockAddress, MeshBuilder};
use terrace_edit::{BreakOutcome, DropStep, FLOW_DIRECTIONS};
use terrace_world::NoiseField;

use crate::engine::Engine;
use crate::job::Job;
use crate::scheduler::Step;

impl<N: NoiseField, M: MeshBuilder> Engine<N, M> {
    /// Hits the voxel once: cracks it, and empties it at its break threshold.
    pub fn on_primary_action(&mut self, at: BlockAddress) {
        match terrace_edit::break_block(&mut self.registry, at) {
            BreakOutcome::Ignored => return,
            BreakOutcome::Damaged { start_heal, .. } => {
                if start_heal {
                    self.sched.start_after(self.cfg.heal_delay, Job::Heal { at });
                }
            }
            BreakOutcome::Broken { above } => {
                if let Some(above) = above {
                    self.start_drop(above, self.cfg.flow_strength);
                }
            }
        }
        self.redraw(at.origin);
    }

    /// Places the selected build type into the voxel and lets it settle.
    pub fn on_secondary_action(&mut self, at: BlockAddress) {
        let block = self.build_type();
        if terrace_edit::place_block(&mut self.registry, at, block) {
            self.start_drop(at, self.cfg.flow_strength);
            self.redraw(at.origin);
        }
    }

    /// Starts gravity on a voxel if its material is affected by it.
    pub(crate) fn start_drop(&mut self, at: BlockAddress, strength: u32) {
        match self.registry.block(at) {
            Some(b) if b.can_drop() => {
                self.sched
                    .start_after(self.cfg.drop_delay, Job::Drop { at, strength });
            }
            _ => {}
        }
    }

    pub(crate) fn step_drop(&mut self, at: BlockAddress, strength: u32) -> Step<Job> {
        match terrace_edit::drop_step(&mut self.registry, at) {
            DropStep::Fell { from, to, above } => {
                if let Some(above) = above {
                    self.start_drop(above, self.cfg.flow_strength);
                }
                self.redraw(from.origin);
                if to.origin != from.origin {
                    self.redraw(to.origin);
                }
                Step::Sleep(
                    self.sched.now() + self.cfg.drop_delay,
                    Job::Drop { at: to, strength },
                )
            }
            DropStep::Spread => {
                for dir in FLOW_DIRECTIONS {
                    let spread = strength.saturating_sub(1);
                    if let Some((next, left)) =
                        terrace_edit::flow_into_neighbor(&mut self.registry, at, dir, spread)
                    {
                        self.redraw(next.origin);
                        self.start_drop(next, left);
                    }
                }
                Step::Done
            }
            DropStep::Rested | DropStep::Stopped => Step::Done,
        }
    }
}

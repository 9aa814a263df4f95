use terrace_chunk::{MeshBuilder, generate_chunk};
use terrace_geom::{IVec2, IVec3, Vec3};
use terrace_world::{NoiseField, TerrainGenerator};

use crate::engine::Engine;
use crate::job::Job;
use crate::scheduler::Step;

/// How a column build treats chunks that already exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ColumnMode {
    /// Create missing chunks and show every chunk of the column.
    Show,
    /// Create missing chunks hidden; leave existing ones alone.
    Backdrop,
}

impl<N: NoiseField, M: MeshBuilder> Engine<N, M> {
    /// One chunk per vertical slot, generated on first request.
    pub(crate) fn build_column(&mut self, column: IVec2, mode: ColumnMode) {
        let dims = self.cfg.chunk;
        for slot in 0..self.cfg.world.y {
            let origin = dims.column_slot(column, slot);
            let created = !self.registry.contains(origin);
            if created {
                let mut chunk = generate_chunk(&self.cfg, &self.noise, origin);
                chunk.visible = mode == ColumnMode::Show;
                if let Err(e) = self.registry.insert(chunk) {
                    log::warn!(target: "stream", "dropping generated chunk: {e}");
                    continue;
                }
            }
            let changed = match (mode, self.registry.get_mut(origin)) {
                (ColumnMode::Show, Some(chunk)) if !chunk.visible => {
                    chunk.visible = true;
                    true
                }
                _ => false,
            };
            if created || changed {
                self.redraw(origin);
            }
        }
        if self.registry.add_column(column) {
            log::debug!(target: "stream", "column {},{} built ({:?})", column.x, column.z, mode);
        }
    }

    fn column_at(&self, x: i32, z: i32) -> IVec2 {
        IVec2::new(x * self.cfg.chunk.x, z * self.cfg.chunk.z)
    }

    pub(crate) fn step_build_world(&mut self, next: i32) -> Step<Job> {
        let (wx, wz) = (self.cfg.world.x, self.cfg.world.z);
        if next < wx * wz {
            let column = self.column_at(next % wx, next / wx);
            self.build_column(column, ColumnMode::Show);
            return Step::Yield(Job::BuildWorld { next: next + 1 });
        }

        let (ex, ez) = self.cfg.world_extent_xz();
        let (x, z) = (ex / 2, ez / 2);
        let y = TerrainGenerator::new(&self.cfg.terrain, &self.noise).surface_height(x, z) + 10;
        self.observer = IVec3::new(x, y, z).as_vec3();
        self.last_build = self.observer.ceil();
        log::info!(
            "world built: {} chunks, observer at {},{},{}",
            self.registry.len(),
            x,
            y,
            z
        );
        self.sched.start_coordinator();
        self.sched.start(Job::BuildExtraWorld { pass: 0, next: 0 });
        self.sched.start(Job::WatchObserver);
        Step::Done
    }

    /// Column ranges of the two backdrop passes: `(x_start, x_end, z_start, z_end)`.
    fn extra_pass_bounds(&self, pass: u8) -> Option<(i32, i32, i32, i32)> {
        let w = self.cfg.world;
        let e = self.cfg.extra_world;
        match pass {
            0 => Some((0, w.x + e.x, w.z - 1, w.z + e.z)),
            1 => Some((w.x - 1, w.x + e.x, 0, w.z + e.z)),
            _ => None,
        }
    }

    pub(crate) fn step_build_extra(&mut self, pass: u8, next: i32) -> Step<Job> {
        let Some((x0, x1, z0, z1)) = self.extra_pass_bounds(pass) else {
            log::debug!(target: "stream", "backdrop ring done");
            return Step::Done;
        };
        let width = x1 - x0;
        if width <= 0 || next >= width * (z1 - z0) {
            return self.step_build_extra(pass + 1, 0);
        }
        let column = self.column_at(x0 + next % width, z0 + next / width);
        self.build_column(column, ColumnMode::Backdrop);
        Step::Yield(Job::BuildExtraWorld {
            pass,
            next: next + 1,
        })
    }

    pub(crate) fn step_watch_observer(&mut self) -> Step<Job> {
        let moved = (self.last_build.as_vec3() - self.observer).length();
        if moved > self.cfg.chunk.x as f32 {
            self.last_build = self.observer.ceil();
            let center = self.snap_to_column(self.observer);
            log::debug!(
                target: "stream",
                "observer moved {:.1}; rebuilding around {},{}",
                moved,
                center.x,
                center.z
            );
            self.sched.enqueue(Job::BuildRecursive {
                center,
                radius: self.cfg.draw_radius,
                dir: 0,
            });
            self.sched.enqueue(Job::HideColumns { center });
        }
        Step::Sleep(
            self.sched.now() + self.cfg.update_interval,
            Job::WatchObserver,
        )
    }

    /// Column of the observer, truncating toward zero.
    fn snap_to_column(&self, pos: Vec3) -> IVec2 {
        let d = self.cfg.chunk;
        IVec2::new(
            (pos.x / d.x as f32) as i32 * d.x,
            (pos.z / d.z as f32) as i32 * d.z,
        )
    }

    pub(crate) fn step_build_recursive(&mut self, center: IVec2, radius: u32, dir: u8) -> Step<Job> {
        let d = self.cfg.chunk;
        let offsets = [
            IVec2::new(0, d.z),
            IVec2::new(0, -d.z),
            IVec2::new(d.x, 0),
            IVec2::new(-d.x, 0),
        ];
        let Some(offset) = offsets.get(dir as usize) else {
            return Step::Done;
        };
        if radius == 0 {
            return Step::Done;
        }
        let column = IVec2::new(center.x + offset.x, center.z + offset.z);
        self.build_column(column, ColumnMode::Show);
        self.sched.enqueue(Job::BuildRecursive {
            center: column,
            radius: radius - 1,
            dir: 0,
        });
        Step::Yield(Job::BuildRecursive {
            center,
            radius,
            dir: dir + 1,
        })
    }

    pub(crate) fn hide_columns(&mut self, center: IVec2) {
        let limit = (self.cfg.draw_radius as i32 * self.cfg.chunk.x) as f32;
        let far: Vec<IVec2> = self
            .registry
            .columns()
            .filter(|c| c.distance(center) >= limit)
            .collect();
        let mut hidden = 0;
        for column in far {
            for origin in self.registry.set_column_visible(column, self.cfg.world.y, false) {
                self.redraw(origin);
                hidden += 1;
            }
        }
        log::debug!(target: "stream", "hid {} chunks beyond {} of {},{}", hidden, limit, center.x, center.z);
    }
}

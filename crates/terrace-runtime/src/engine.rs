use std::path::{Path, PathBuf};
use std::time::Duration;

use terrace_blocks::BlockType;
use terrace_chunk::{BlockAddress, ChunkRegistry, MeshBuilder, Unreachable};
use terrace_edit::HitAction;
use terrace_geom::{IVec3, Vec3};
use terrace_io::PersistenceError;
use terrace_world::{NoiseField, WorldConfig};

use crate::job::Job;
use crate::scheduler::{Scheduler, Step};

/// Result of [`Engine::load`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Restored { chunks: usize },
    /// No usable record; a fresh build was started instead.
    FreshBuild,
}

/// Owns the world and drives every job from the host tick.
pub struct Engine<N: NoiseField, M: MeshBuilder> {
    pub(crate) cfg: WorldConfig,
    pub(crate) noise: N,
    pub(crate) mesher: M,
    pub(crate) registry: ChunkRegistry,
    pub(crate) sched: Scheduler<Job>,
    pub(crate) observer: Vec3,
    pub(crate) last_build: IVec3,
    build_type: BlockType,
    save_path: PathBuf,
}

impl<N: NoiseField, M: MeshBuilder> Engine<N, M> {
    pub fn new(cfg: WorldConfig, noise: N, mesher: M, save_path: impl Into<PathBuf>) -> Self {
        let registry = ChunkRegistry::new(cfg.chunk);
        Self::with_registry(cfg, noise, mesher, save_path, registry)
    }

    /// Engine around an existing registry. Nothing is scheduled.
    pub fn with_registry(
        cfg: WorldConfig,
        noise: N,
        mesher: M,
        save_path: impl Into<PathBuf>,
        registry: ChunkRegistry,
    ) -> Self {
        let build_type = cfg.build_type;
        Self {
            cfg,
            noise,
            mesher,
            registry,
            sched: Scheduler::new(),
            observer: Vec3::ZERO,
            last_build: IVec3::ZERO,
            build_type,
            save_path: save_path.into(),
        }
    }

    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.cfg
    }

    #[inline]
    pub fn registry(&self) -> &ChunkRegistry {
        &self.registry
    }

    #[inline]
    pub fn mesher(&self) -> &M {
        &self.mesher
    }

    #[inline]
    pub fn scheduler(&self) -> &Scheduler<Job> {
        &self.sched
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.sched.now()
    }

    #[inline]
    pub fn observer(&self) -> Vec3 {
        self.observer
    }

    pub fn set_observer_position(&mut self, pos: Vec3) {
        self.observer = pos;
    }

    #[inline]
    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    #[inline]
    pub fn build_type(&self) -> BlockType {
        self.build_type
    }

    pub fn set_build_type(&mut self, block: BlockType) {
        log::debug!(target: "edit", "build type set to {}", block);
        self.build_type = block;
    }

    /// Starts a fresh procedural build of the world.
    pub fn start(&mut self) {
        log::info!(
            "building world {}x{}x{} chunks of {:?}",
            self.cfg.world.x,
            self.cfg.world.y,
            self.cfg.world.z,
            self.cfg.chunk
        );
        self.sched.start(Job::BuildWorld { next: 0 });
    }

    pub fn save(&self) -> Result<(), PersistenceError> {
        let rec = terrace_io::snapshot(&self.registry, self.observer);
        terrace_io::save(&self.save_path, &rec)
    }

    /// Restores the saved world, or starts a fresh build when there is no
    /// usable record.
    pub fn load(&mut self) -> LoadOutcome {
        let restored = terrace_io::load(&self.save_path).and_then(|rec| match rec {
            Some(rec) => terrace_io::restore(&rec, self.cfg.chunk).map(Some),
            None => Ok(None),
        });
        match restored {
            Ok(Some((registry, observer))) => {
                self.registry = registry;
                let mut origins: Vec<IVec3> = self.registry.origins().collect();
                origins.sort_unstable();
                for origin in origins {
                    self.redraw(origin);
                }
                self.observer = observer;
                self.last_build = observer.ceil();
                self.sched.start_coordinator();
                self.sched.start(Job::WatchObserver);
                let chunks = self.registry.len();
                log::info!("loaded {} chunks from {}", chunks, self.save_path.display());
                LoadOutcome::Restored { chunks }
            }
            Ok(None) => {
                log::warn!("no save at {}; building a new world", self.save_path.display());
                self.start();
                LoadOutcome::FreshBuild
            }
            Err(e) => {
                log::warn!("could not load {}: {e}; building a new world", self.save_path.display());
                self.start();
                LoadOutcome::FreshBuild
            }
        }
    }

    /// Maps a surface hit to the voxel an action addresses.
    pub fn resolve_hit(
        &self,
        point: Vec3,
        normal: Vec3,
        chunk_origin: IVec3,
        action: HitAction,
    ) -> Result<BlockAddress, Unreachable> {
        terrace_edit::resolve_hit(&self.registry, point, normal, chunk_origin, action)
    }

    /// Advances the clock by `dt` and runs one tick of every lane.
    pub fn advance(&mut self, dt: Duration) {
        self.sched.begin_tick(dt);
        self.run_started();
        self.run_coordinator();
        // Jobs started by build steps run this tick too.
        self.run_started();
        self.sched.end_tick();
    }

    fn run_started(&mut self) {
        while let Some(job) = self.sched.next_started() {
            let step = self.step(job);
            self.sched.park(step);
        }
    }

    fn run_coordinator(&mut self) {
        while let Some(job) = self.sched.next_build() {
            let step = self.step(job);
            if !self.sched.park_build(step) {
                break;
            }
        }
    }

    fn step(&mut self, job: Job) -> Step<Job> {
        log::trace!(target: "stream", "t={:?} step {}", self.sched.now(), job.name());
        match job {
            Job::BuildWorld { next } => self.step_build_world(next),
            Job::BuildExtraWorld { pass, next } => self.step_build_extra(pass, next),
            Job::WatchObserver => self.step_watch_observer(),
            Job::BuildRecursive {
                center,
                radius,
                dir,
            } => self.step_build_recursive(center, radius, dir),
            Job::HideColumns { center } => {
                self.hide_columns(center);
                Step::Done
            }
            Job::Heal { at } => {
                if terrace_edit::heal(&mut self.registry, at) {
                    self.redraw(at.origin);
                }
                Step::Done
            }
            Job::Drop { at, strength } => self.step_drop(at, strength),
        }
    }

    pub(crate) fn redraw(&mut self, origin: IVec3) {
        if let Some(chunk) = self.registry.get(origin) {
            self.mesher.rebuild(chunk);
        }
    }
}

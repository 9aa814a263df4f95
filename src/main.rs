mod mesher;

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use terrace_blocks::BlockType;
use terrace_geom::Vec3;
use terrace_runtime::{Engine, LoadOutcome};
use terrace_world::{PerlinField, WorldConfig};

use crate::mesher::LoggingMesher;

/// Headless host for the chunk streaming and mutation engine.
#[derive(Parser, Debug)]
#[command(name = "terrace", version, about)]
struct Args {
    /// World configuration (TOML). Built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save record location.
    #[arg(long, default_value = "saves/world.dat")]
    save_file: PathBuf,

    /// Restore the save record instead of building a new world.
    #[arg(long)]
    load: bool,

    /// Write the save record before exiting.
    #[arg(long)]
    save: bool,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Walk the observer along +x at this many blocks per second.
    #[arg(long)]
    walk: Option<f32>,

    /// Block placed by the secondary action, overriding `[mutation] build_type`.
    #[arg(long, value_parser = parse_block)]
    build_type: Option<BlockType>,
}

fn parse_block(name: &str) -> Result<BlockType, String> {
    match BlockType::by_name(name) {
        Some(b) if !b.is_air() && !b.is_crack_stage() => Ok(b),
        Some(b) => Err(format!("{b} cannot be placed")),
        None => Err(format!("unknown block {name:?}")),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => WorldConfig::load_from_path(path)?,
        None => WorldConfig::default(),
    };
    let noise = PerlinField::new(cfg.terrain.seed);
    let mut engine = Engine::new(cfg, noise, LoggingMesher::default(), args.save_file.clone());
    if let Some(block) = args.build_type {
        engine.set_build_type(block);
    }

    if args.load {
        match engine.load() {
            LoadOutcome::Restored { chunks } => log::info!("resumed with {chunks} chunks"),
            LoadOutcome::FreshBuild => log::info!("starting a fresh world"),
        }
    } else {
        engine.start();
    }

    let dt = Duration::from_millis(args.tick_ms);
    for tick in 0..args.ticks {
        if let Some(speed) = args.walk {
            let step = speed * dt.as_secs_f32();
            let pos = engine.observer() + Vec3::new(step, 0.0, 0.0);
            engine.set_observer_position(pos);
        }
        engine.advance(dt);
        if tick % 100 == 99 {
            let sched = engine.scheduler();
            log::info!(
                "t={:.1}s chunks={} columns={} started={} queued={} rebuilds={}",
                engine.now().as_secs_f32(),
                engine.registry().len(),
                engine.registry().column_count(),
                sched.started_len(),
                sched.queued_len(),
                engine.mesher().total()
            );
        }
    }

    let visible = engine.registry().iter().filter(|c| c.visible).count();
    log::info!(
        "done: {} chunks ({} visible), {} distinct chunks redrawn",
        engine.registry().len(),
        visible,
        engine.mesher().distinct()
    );
    if args.save {
        engine.save()?;
    }
    Ok(())
}

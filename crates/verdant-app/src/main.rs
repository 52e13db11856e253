//! `verdant`: run a level headless, either as fast as possible or in real
//! time on the game loop thread.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use verdant_app::host;
use verdant_app::runner::{self, RunOptions};
use verdant_app::state::AppState;
use verdant_core::commands::PlayerCommand;
use verdant_core::enums::GamePhase;
use verdant_core::state::{GameStateSnapshot, Lifecycle};
use verdant_levels::{builtin_levels, LevelConfig, Progress};
use verdant_sim::{SimConfig, SimulationEngine};

#[derive(Parser, Debug)]
#[command(name = "verdant")]
#[command(about = "Headless lane-defense simulation")]
struct Args {
    /// Level id to play
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// RNG seed, overriding the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Level catalog (JSON array); defaults to the built-in levels
    #[arg(long)]
    levels: Option<PathBuf>,

    /// Progress file, read at start and rewritten when a level is completed
    #[arg(long)]
    progress: Option<PathBuf>,

    /// Step budget for the fixed-step run
    #[arg(long, default_value_t = 10_800)]
    ticks: u64,

    /// Run on the game loop thread against the wall clock for this many seconds
    #[arg(long)]
    realtime: Option<f64>,

    /// Collect every pickup as soon as it appears
    #[arg(long)]
    auto_collect: bool,

    /// Write the final snapshot as JSON ("-" for stdout)
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let config = load_config(args.config.as_deref(), args.seed)?;
    let levels = load_levels(args.levels.as_deref())?;
    let progress = load_progress(args.progress.as_deref())?;
    if !progress.is_level_unlocked(args.level) {
        warn!(level = args.level, unlocked = progress.unlocked_level, "level is still locked, playing anyway");
    }

    let snapshot = match args.realtime {
        Some(secs) => run_realtime(&args, config, levels, progress, secs)?,
        None => run_fixed(&args, config, levels, progress)?,
    };

    if let Some(path) = &args.dump {
        dump_snapshot(path, &snapshot)?;
    }
    Ok(())
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<SimConfig> {
    let mut config = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            SimConfig::from_json(&json).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    info!(seed = config.seed, step_secs = config.step_secs, "config loaded");
    Ok(config)
}

fn load_levels(path: Option<&Path>) -> Result<Vec<LevelConfig>> {
    let Some(path) = path else {
        return Ok(builtin_levels());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading levels {}", path.display()))?;
    let levels = LevelConfig::list_from_json(&json)
        .with_context(|| format!("parsing levels {}", path.display()))?;
    if levels.is_empty() {
        bail!("{} defines no levels", path.display());
    }
    Ok(levels)
}

fn load_progress(path: Option<&Path>) -> Result<Progress> {
    match path {
        Some(path) if path.exists() => {
            Progress::load(path).with_context(|| format!("reading progress {}", path.display()))
        }
        _ => Ok(Progress::default()),
    }
}

fn run_fixed(
    args: &Args,
    config: SimConfig,
    levels: Vec<LevelConfig>,
    mut progress: Progress,
) -> Result<GameStateSnapshot> {
    let mut engine = SimulationEngine::new(config)
        .with_levels(levels.clone())
        .with_progress(progress.clone());
    let options = RunOptions {
        max_ticks: args.ticks,
        auto_collect: args.auto_collect,
    };
    let (summary, snapshot) = runner::run_level(&mut engine, args.level, options)
        .with_context(|| format!("running level {}", args.level))?;

    println!("{}", serde_json::to_string_pretty(&summary)?);

    if summary.phase == GamePhase::Won {
        progress.record_completion(args.level, &levels);
        if let Some(path) = &args.progress {
            progress
                .save(path)
                .with_context(|| format!("writing progress {}", path.display()))?;
            info!(path = %path.display(), "progress saved");
        }
    }
    Ok(snapshot)
}

fn run_realtime(
    args: &Args,
    config: SimConfig,
    levels: Vec<LevelConfig>,
    progress: Progress,
    secs: f64,
) -> Result<GameStateSnapshot> {
    let duration = Duration::try_from_secs_f64(secs)
        .with_context(|| format!("invalid --realtime duration {secs}"))?;

    let state = AppState::with_progress(progress, args.progress.clone());
    host::start_simulation(&state, config, levels)?;
    host::send_command(&state, PlayerCommand::StartLevel { level_id: args.level })?;

    let deadline = Instant::now() + duration;
    let mut last_phase = None;
    while Instant::now() < deadline {
        thread::sleep(Duration::from_millis(50));
        let Some(snapshot) = host::get_snapshot(&state)? else {
            continue;
        };
        if last_phase != Some(snapshot.phase) {
            info!(phase = ?snapshot.phase, tick = snapshot.time.tick, "phase");
            last_phase = Some(snapshot.phase);
        }
        if snapshot.phase.is_terminal() {
            break;
        }
        if args.auto_collect {
            for view in snapshot.entities.iter().filter(|view| {
                view.alive && matches!(view.lifecycle, Lifecycle::Pickup { collected: false, .. })
            }) {
                host::send_command(&state, PlayerCommand::CollectResource { entity: view.id })?;
            }
        }
    }

    host::stop_simulation(&state)?;
    host::get_snapshot(&state)?.context("game loop produced no snapshot")
}

fn dump_snapshot(path: &Path, snapshot: &GameStateSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    if path == Path::new("-") {
        println!("{json}");
    } else {
        std::fs::write(path, json).with_context(|| format!("writing snapshot {}", path.display()))?;
        info!(path = %path.display(), "snapshot written");
    }
    Ok(())
}

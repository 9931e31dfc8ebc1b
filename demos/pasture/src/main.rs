//! pasture — a flock of sheep arbitrating goals around a wandering shepherd.
//!
//! Every sheep is a mob with the usual sheep goals (panic, tempt, graze,
//! stroll, look around) in its goal selector and an alert goal in its
//! target selector.  The shepherd circles the pasture, holds up wheat every
//! other ten seconds, and now and then startles a sheep.  Sheep outside
//! `--activation-range` of the shepherd drop to the throttled inactive path.
//!
//! ```text
//! RUST_LOG=info cargo run -p pasture -- --sheep 40 --ticks 2400 --stats-csv stats.csv
//! ```

mod goals;
mod output;
mod sheep;

use std::f64::consts::TAU;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use mob_core::{MobRng, SimRng, Tick};
use mob_sim::{MobBuilder, Sim, SimConfig, SimObserver};
use tracing::{info, warn};

use goals::{
    AlertGoal, EatGrassGoal, LookAtShepherdGoal, PanicGoal, RandomLookAroundGoal,
    RandomStrollGoal, TemptGoal,
};
use output::{Report, StatsCsv};
use sheep::{Sheep, Vec2};

// ── Constants ─────────────────────────────────────────────────────────────────

const PASTURE_RADIUS:       f64 = 30.0;
const SHEPHERD_ORBIT:       f64 = 20.0;
/// Ticks for one lap of the shepherd around the pasture.
const SHEPHERD_LAP_TICKS:   u64 = 1_200;
const TEMPT_PERIOD_SECS:    f64 = 10.0;
const STARTLE_CHANCE:       u32 = 80;
const FRIGHT_SECS:          f64 = 3.0;
/// Every `TETHER_EVERY`th sheep starts tethered.
const TETHER_EVERY:         u32 = 8;

// Each goal rolls its own stream; salts keep them apart.
const PANIC_SALT:  u64 = 0x01;
const GRAZE_SALT:  u64 = 0x02;
const STROLL_SALT: u64 = 0x03;
const LOOK_SALT:   u64 = 0x04;
const GLANCE_SALT: u64 = 0x05;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "pasture", about = "Simulate a flock of sheep driven by goal selectors")]
struct Args {
    /// Number of sheep.
    #[arg(long, default_value_t = 24)]
    sheep: u32,

    /// Ticks to simulate (overrides the config file).
    #[arg(long)]
    ticks: Option<u64>,

    /// Master seed (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,

    /// JSON `SimConfig`; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write per-tick population stats to this CSV file.
    #[arg(long)]
    stats_csv: Option<PathBuf>,

    /// Sheep farther than this from the shepherd run the inactive path.
    #[arg(long, default_value_t = 32.0)]
    activation_range: f64,
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening config {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(ticks) = args.ticks {
        config.total_ticks = ticks;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

// ── World ─────────────────────────────────────────────────────────────────────

fn shepherd_at(tick: Tick) -> Vec2 {
    let angle = TAU * (tick.0 % SHEPHERD_LAP_TICKS) as f64 / SHEPHERD_LAP_TICKS as f64;
    Vec2::from_angle(angle) * SHEPHERD_ORBIT
}

fn spawn_flock(sim: &mut Sim<Sheep>, count: u32, rng: &mut SimRng) -> Result<()> {
    let seed = sim.config.seed;
    for _ in 0..count {
        let angle = rng.gen_range(0.0..TAU);
        let radius = PASTURE_RADIUS * rng.gen_range(0.0f64..1.0).sqrt();
        let pos = Vec2::from_angle(angle) * radius;

        sim.spawn(|id| {
            let mut state = Sheep::new(pos);
            state.tethered = id.0 % TETHER_EVERY == 0;
            MobBuilder::new(state)
                .goal(1, PanicGoal::new(1.25, MobRng::new(seed ^ PANIC_SALT, id)))
                .goal(3, TemptGoal::new(1.1, 10.0))
                .goal(5, EatGrassGoal::new(400, MobRng::new(seed ^ GRAZE_SALT, id)))
                .goal(6, RandomStrollGoal::new(1.0, 120, MobRng::new(seed ^ STROLL_SALT, id)))
                .goal(7, LookAtShepherdGoal::new(6.0, MobRng::new(seed ^ LOOK_SALT, id)))
                .goal(8, RandomLookAroundGoal::new(MobRng::new(seed ^ GLANCE_SALT, id)))
                .target_goal(1, AlertGoal::new(16.0))
        })?;
    }
    Ok(())
}

/// Move the shepherd, update what every sheep perceives, and advance the
/// sheep's bodies by one tick.
fn update_world(sim: &mut Sim<Sheep>, rng: &mut SimRng, fright_ticks: u64, untether_at: Tick) {
    let now = sim.clock.current_tick;
    let shepherd = shepherd_at(now);
    let tempt_ticks = sim.clock.ticks_for_secs(TEMPT_PERIOD_SECS).max(1);
    let tempting = (now.0 / tempt_ticks) % 2 == 1;

    let startled = if rng.gen_range(0..STARTLE_CHANCE) == 0 && !sim.is_empty() {
        Some(rng.gen_range(0..sim.len()))
    } else {
        None
    };

    for (slot, mob) in sim.mobs_mut().iter_mut().enumerate() {
        let sheep = &mut mob.state;
        sheep.shepherd = shepherd;
        sheep.tempting = tempting;
        if startled == Some(slot) {
            sheep.scared_ticks = fright_ticks;
        }
        if now == untether_at {
            sheep.tethered = false;
        }
        sheep.physics();
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    println!("=== pasture — mob_ai goal arbitration ===");
    println!(
        "Sheep: {}  |  Ticks: {}  |  Seed: {}  |  Activation range: {}",
        args.sheep, config.total_ticks, config.seed, args.activation_range
    );
    println!();

    let mut rng = SimRng::new(config.seed);
    let total_ticks = config.total_ticks;
    let mut sim = Sim::new(config)?;
    spawn_flock(&mut sim, args.sheep, &mut rng)?;

    let csv = match &args.stats_csv {
        Some(path) => Some(StatsCsv::create(path)?),
        None => None,
    };
    let mut report = Report::new(csv);

    let fright_ticks = sim.clock.ticks_for_secs(FRIGHT_SECS);
    let untether_at = Tick(total_ticks / 4);
    let range = args.activation_range;

    let t0 = Instant::now();
    while sim.clock.current_tick < Tick(total_ticks) {
        update_world(&mut sim, &mut rng, fright_ticks, untether_at);
        let shepherd = shepherd_at(sim.clock.current_tick);
        sim.update_activation(|mob| mob.state.pos.distance(shepherd) <= range);
        sim.step(&mut report);
    }
    report.on_sim_end(sim.clock.current_tick);
    let elapsed = t0.elapsed();

    if let Some(e) = report.take_error() {
        warn!("output error: {e:#}");
    }
    info!(ticks = total_ticks, secs = elapsed.as_secs_f64(), "run complete");

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  snapshots            : {}", report.snapshots());
    println!("  peak running goals   : {}", report.peak_running());
    if let Some(rows) = report.csv_rows() {
        println!("  stats rows written   : {rows}");
    }
    println!();

    println!("{:<6} {:<7} {:<14} {:<7} {}", "Sheep", "Active", "Position", "Grazed", "Running");
    println!("{}", "-".repeat(60));
    for mob in sim.mobs() {
        let running: Vec<_> = mob
            .goal_selector
            .running_goals()
            .chain(mob.target_selector.running_goals())
            .map(|g| g.name())
            .collect();
        println!(
            "{:<6} {:<7} {:<14} {:<7} {}",
            mob.id().0,
            if mob.is_active() { "yes" } else { "no" },
            mob.state.pos.to_string(),
            mob.state.grass_eaten,
            if running.is_empty() { "-".to_string() } else { running.join(", ") },
        );
    }

    Ok(())
}

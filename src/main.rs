mod display;
mod terminal;

use std::fs::File;
use std::io::{stdout, BufWriter};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal as term,
    ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use star_shooter::compute::{run, Exit, Pacing, RunSummary, Simulation, DEFAULT_FPS};
use star_shooter::dice::RngDice;
use star_shooter::input::Idle;
use star_shooter::render::NullRenderer;

use crate::display::TerminalRenderer;
use crate::terminal::{wait_for_key, TerminalInput};

/// Frame limit for headless runs when none is given.
const HEADLESS_FRAMES: u64 = 3600;

#[derive(Parser, Debug)]
#[command(name = "star_shooter")]
#[command(about = "Vertical scrolling shooter in the terminal")]
struct Args {
    /// Seed for enemy spawns and attacks; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Frame-rate cap
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Run the simulation without a terminal (no input, no drawing)
    #[arg(long)]
    headless: bool,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Draw hitbox corners
    #[arg(long)]
    show_hitboxes: bool,

    /// Attacks fly and draw but never hit
    #[arg(long)]
    no_collisions: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // The terminal belongs to the game screen, so logs never go to stdout.
    match (&args.log_file, args.headless) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        (None, true) => builder.with_writer(std::io::stderr).init(),
        (None, false) => builder.with_writer(std::io::sink).init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut dice = RngDice(StdRng::seed_from_u64(seed));

    let mut sim = Simulation::new();
    sim.show_hitboxes = args.show_hitboxes;
    sim.attacks.set_collisions(!args.no_collisions);

    info!(seed, headless = args.headless, fps = args.fps, "starting run");

    let summary = if args.headless {
        let pacing = Pacing::unthrottled()
            .with_max_frames(Some(args.frames.unwrap_or(HEADLESS_FRAMES)));
        run(&mut sim, &mut Idle, &mut NullRenderer, &mut dice, pacing)?
    } else {
        let pacing = Pacing::realtime(args.fps).with_max_frames(args.frames);
        play(&mut sim, &mut dice, pacing)?
    };

    info!(
        exit = ?summary.exit,
        frames = summary.frames,
        energy = sim.ship.energy,
        shield = sim.ship.shield_level,
        enemies = sim.enemies.len(),
        attacks = sim.attacks.len(),
        "run finished"
    );
    if args.headless {
        println!(
            "{:?} after {} frames (seed {seed})",
            summary.exit, summary.frames
        );
    }
    Ok(())
}

// ── Terminal session ──────────────────────────────────────────────────────────

fn play(sim: &mut Simulation, dice: &mut RngDice<StdRng>, pacing: Pacing) -> Result<RunSummary> {
    let mut out = BufWriter::new(stdout());

    term::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(term::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = term::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    let result = session(&mut out, sim, dice, pacing, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(term::LeaveAlternateScreen);
    let _ = term::disable_raw_mode();

    result
}

fn session(
    out: &mut BufWriter<std::io::Stdout>,
    sim: &mut Simulation,
    dice: &mut RngDice<StdRng>,
    pacing: Pacing,
    keyboard_enhanced: bool,
) -> Result<RunSummary> {
    let mut renderer = TerminalRenderer::new(out).context("failed to query terminal size")?;
    let mut input = TerminalInput::new(keyboard_enhanced);

    let summary = run(sim, &mut input, &mut renderer, dice, pacing)?;
    if summary.exit == Exit::Destroyed {
        renderer.draw_game_over(sim.distance_traveled)?;
        wait_for_key()?;
    }
    Ok(summary)
}

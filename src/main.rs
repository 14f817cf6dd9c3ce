mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use road_dodger::compute::{frame, init_state, restart, FrameOutcome};
use road_dodger::config::Config;
use road_dodger::entities::GameState;
use road_dodger::input::{Command, InputTracker};
use road_dodger::render::render_frame;

use display::TerminalCanvas;

/// Dodge the road blocks, grab the coins.
#[derive(Debug, Parser)]
#[command(name = "road_dodger", version)]
struct Cli {
    /// TOML file overriding any of the default tuning values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Frames per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Write logs here (the screen belongs to the game).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drives frames at a fixed rate until the player quits.
///
/// While running, each iteration drains pending input, samples the movement
/// intents once, advances one frame and renders it.  Once the session is
/// over no more frames are simulated; the loop only redraws the final screen
/// and waits for restart or quit.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    frame_time: Duration,
) -> anyhow::Result<()> {
    let (columns, _) = terminal::size().context("failed to query terminal size")?;
    let mut input = InputTracker::new(columns);
    let mut tick: u64 = 0;

    loop {
        let frame_start = Instant::now();
        tick += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match input.handle(&ev, tick) {
                Some(Command::Quit) => {
                    tracing::info!(score = state.score, "Quit");
                    return Ok(());
                }
                Some(Command::Restart) if state.is_over() => {
                    state = restart(&state);
                    input.clear();
                }
                _ => {}
            }
        }

        if !state.is_over() {
            let (next, outcome) = frame(&state, input.intents(tick), rng);
            state = next;
            if let FrameOutcome::GameOver { score } = outcome {
                tracing::info!(score, frames = state.frame, "Final score");
            }
        }

        let (columns, rows) = terminal::size().context("failed to query terminal size")?;
        let mut canvas = TerminalCanvas::new(out, columns, rows, state.config);
        render_frame(&mut canvas, &state).context("failed to draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::new(),
    };
    // Validate before touching the terminal so errors print normally.
    let state = init_state(config).context("invalid configuration")?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(cli.fps));

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Input thread stopped");
                break;
            }
        }
    });

    let result = game_loop(&mut out, state, &rx, &mut rng, frame_time);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use space_invader::input::{InputSampler, KeyLevels};
use space_invader::{tick, GameConfig, InputState, Lifecycle, SimulationContext};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// Longest frame the simulation is allowed to see; a stalled terminal must
/// not teleport every enemy down the screen.
const MAX_FRAME_DT: Duration = Duration::from_millis(100);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

const CONFIG_ENV: &str = "SPACE_INVADER_CONFIG";

#[derive(Parser, Debug)]
#[command(name = "space_invader")]
#[command(about = "Dodge the invaders, shoot them down, grab what they drop")]
struct Cli {
    /// JSON file overriding any subset of the game constants
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for enemy placement and drops (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Run the built-in autopilot without a terminal UI and print the final
    /// snapshot as JSON
    #[arg(long)]
    headless: bool,
    /// Number of frames to simulate in headless mode
    #[arg(long, default_value_t = 3_600)]
    frames: u64,
    /// Where logs go while the terminal UI owns the screen
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let path = cli
        .config
        .clone()
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    if cli.config.is_none() {
        info!("using config from {CONFIG_ENV}: {}", path.display());
    }
    GameConfig::from_json_file(&path)
        .with_context(|| format!("loading config {}", path.display()))
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

// ── Headless autopilot ────────────────────────────────────────────────────────

/// Fixed 60 Hz step used when no real frame clock exists.
const HEADLESS_DT: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Frames between autopilot shots; the trigger is released in between.
const AUTOPILOT_FIRE_EVERY: u64 = 12;

/// Trivial bot: start the game, drift under the lowest enemy, fire regularly.
fn autopilot_input(ctx: &SimulationContext, frame: u64) -> InputState {
    let mut input = InputState {
        start: ctx.state.lifecycle() == Lifecycle::Title,
        fire: frame % AUTOPILOT_FIRE_EVERY == 0,
        ..InputState::default()
    };
    let target = ctx
        .store
        .enemies()
        .iter()
        .max_by(|a, b| a.y.total_cmp(&b.y))
        .map(|e| e.x);
    if let Some(target) = target {
        let dx = target - ctx.player.x;
        if dx.abs() > ctx.config.player_speed {
            input.move_left = dx < 0.0;
            input.move_right = dx > 0.0;
        }
    }
    input
}

fn run_headless(config: GameConfig, frames: u64, seed: u64) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ctx = SimulationContext::try_new(config).context("invalid game config")?;
    let mut snapshot = ctx.snapshot();

    for frame in 0..frames {
        let input = autopilot_input(&ctx, frame);
        snapshot = tick(&mut ctx, &input, HEADLESS_DT, &mut rng);
        if snapshot.lifecycle == Lifecycle::GameOver {
            info!(frame, score = snapshot.score, "autopilot run ended");
            break;
        }
    }

    let json = serde_json::to_string_pretty(&snapshot).context("serializing snapshot")?;
    println!("{json}");
    Ok(())
}

// ── Interactive game loop ─────────────────────────────────────────────────────

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Input model: instead of acting on each key event individually, we keep a
/// `key_frame` map with the frame number of the last press/repeat event of
/// every key.  Each frame the fresh keys become [`KeyLevels`], and the
/// [`InputSampler`] turns the action keys into one-shot edges, so holding
/// Space fires once and a new shot needs a new press.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events.  Keys expire after
///   `HOLD_WINDOW` frames of silence.
fn game_loop<W: Write>(
    out: &mut W,
    ctx: &mut SimulationContext,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> Result<()> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut sampler = InputSampler::default();
    let mut frame: u64 = 0;
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }
                    let code = match code {
                        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
                        other => other,
                    };
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let held = |keys: &[KeyCode]| any_held(&key_frame, keys, frame);
        let keys = KeyLevels {
            left: held(&[KeyCode::Left, KeyCode::Char('a')]),
            right: held(&[KeyCode::Right, KeyCode::Char('d')]),
            fire: held(&[KeyCode::Char(' ')]),
            pause: held(&[KeyCode::Char('p')]),
            start: held(&[KeyCode::Enter]),
            restart: held(&[KeyCode::Char('r')]),
            quit: held(&[KeyCode::Esc, KeyCode::Char('q')]),
        };
        let input = sampler.sample(keys);

        // Quitting from the title screen leaves the program.
        if input.quit && ctx.state.lifecycle() == Lifecycle::Title {
            return Ok(());
        }

        let dt = frame_start.duration_since(last_frame).min(MAX_FRAME_DT);
        last_frame = frame_start;

        let before = ctx.state.lifecycle();
        let snapshot = tick(ctx, &input, dt, rng);
        if snapshot.lifecycle != before {
            info!(from = ?before, to = ?snapshot.lifecycle, score = snapshot.score, "state changed");
        }

        display::render(out, &snapshot).context("rendering frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

fn run_terminal(config: GameConfig, seed: Option<u64>) -> Result<()> {
    let mut ctx = SimulationContext::try_new(config).context("invalid game config")?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !keyboard_enhanced {
        warn!("terminal lacks key-release events, falling back to hold window");
    }

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut rng = make_rng(seed);
    let result = game_loop(&mut out, &mut ctx, &rx, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(score = ctx.state.score(), "exiting");
    result
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.headless || cli.dump_config {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
    } else {
        // The UI owns stdout, so logs go to a file.
        let path = cli
            .log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("space_invader.log"));
        let file = File::create(&path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let config = load_config(&cli)?;

    if cli.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if cli.headless {
        return run_headless(config, cli.frames, cli.seed.unwrap_or(0));
    }

    run_terminal(config, cli.seed)
}

mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::{debug, info, warn};

use plane_battle::assets::SpriteSheet;
use plane_battle::config::{self, RuntimeConfig};
use plane_battle::entities::{Direction, PlayerSlot};
use plane_battle::game::{Command, Game};
use plane_battle::ports::{Audio, Sound};
use plane_battle::tuning::Tuning;

use display::TerminalRenderer;

// ── Held-key input ────────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate refreshes the entry before it expires.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: KeyCode, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|&k| is_held(key_frame, k, frame))
}

/// Direction bitmask for one player from the currently held keys.
fn held_direction(
    key_frame: &HashMap<KeyCode, u64>,
    frame: u64,
    [up, down, left, right]: [&[KeyCode]; 4],
) -> Direction {
    let mut direction = Direction::NONE;
    if any_held(key_frame, up, frame) {
        direction |= Direction::FORWARD;
    }
    if any_held(key_frame, down, frame) {
        direction |= Direction::BACKWARD;
    }
    if any_held(key_frame, left, frame) {
        direction |= Direction::LEFT;
    }
    if any_held(key_frame, right, frame) {
        direction |= Direction::RIGHT;
    }
    direction
}

const P1_KEYS: [&[KeyCode]; 4] = [&[KeyCode::Up], &[KeyCode::Down], &[KeyCode::Left], &[KeyCode::Right]];
const P2_KEYS: [&[KeyCode]; 4] = [
    &[KeyCode::Char('w'), KeyCode::Char('W')],
    &[KeyCode::Char('s'), KeyCode::Char('S')],
    &[KeyCode::Char('a'), KeyCode::Char('A')],
    &[KeyCode::Char('d'), KeyCode::Char('D')],
];
const P1_FIRE: &[KeyCode] = &[KeyCode::Char(' ')];
const P2_FIRE: &[KeyCode] = &[KeyCode::Char('f'), KeyCode::Char('F')];

/// One-shot command bound to a key press, if any.
fn command_for(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Enter => Some(Command::SelfDestruct(PlayerSlot::One)),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::SelfDestruct(PlayerSlot::Two)),
        KeyCode::F(1) => Some(Command::Save),
        KeyCode::F(2) => Some(Command::Load),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        _ => None,
    }
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// Terminals have no mixer; sound requests only show up in the log.
struct LoggedAudio;

impl Audio for LoggedAudio {
    fn play(&mut self, sound: Sound) -> io::Result<()> {
        debug!(?sound, "sound requested");
        Ok(())
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame the keys that are still
/// "fresh" become the two players' direction masks, so both players can
/// steer and fire at the same time.
fn game_loop<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
    runtime: &RuntimeConfig,
) -> io::Result<()> {
    let mut audio = LoggedAudio;
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            match event {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Esc => return Ok(()),
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            _ => {}
                        }
                        if let Some(command) = command_for(code) {
                            if let Err(error) = game.command(command, &mut audio) {
                                warn!(?command, %error, "command failed");
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(cols, rows) => renderer.resize(cols, rows),
                _ => {}
            }
        }

        // ── Held fire buttons; the weapon cooldown does the throttling ────────
        for (slot, keys) in [(PlayerSlot::One, P1_FIRE), (PlayerSlot::Two, P2_FIRE)] {
            if any_held(&key_frame, keys, frame) {
                game.players[slot].shoot(&mut game.world.bullets);
            }
        }

        let directions = [
            held_direction(&key_frame, frame, P1_KEYS),
            held_direction(&key_frame, frame, P2_KEYS),
        ];
        let dt = last.elapsed();
        last = Instant::now();
        game.frame(directions, dt, &mut audio);
        game.draw(renderer);

        let elapsed = frame_start.elapsed();
        if elapsed < runtime.tick_interval {
            thread::sleep(runtime.tick_interval - elapsed);
        }
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode, so logs go to a file.
fn init_tracing() -> anyhow::Result<()> {
    let path = config::log_file();
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        builder.json().with_current_span(true).init();
    } else {
        builder.compact().init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
        // Enhancement flags may not have been pushed; terminals ignore a
        // stray pop.
        restore_terminal(&mut stdout(), true);
    }));
    Ok(())
}

// ── Terminal ──────────────────────────────────────────────────────────────────

/// Leave raw mode and the alternate screen.  Best effort: errors are ignored.
fn restore_terminal<W: Write>(out: &mut W, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing()?;

    let runtime = RuntimeConfig::from_env();
    let sheet = match &runtime.data_dir {
        Some(dir) => SpriteSheet::load(dir)
            .with_context(|| format!("failed to load sprites from {}", dir.display()))?,
        None => SpriteSheet::default(),
    };
    let tuning = Tuning::default();
    let mut game = Game::new(
        sheet,
        tuning,
        runtime.explosion_interval,
        runtime.save_file.clone(),
    );
    info!(?runtime, "starting");

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the game loop never
    // blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let (cols, rows) = terminal::size()?;
    let mut renderer = TerminalRenderer::new(out, cols, rows, tuning.arena);
    let result = game_loop(&mut renderer, &mut game, &rx, &runtime);

    // Always restore the terminal
    restore_terminal(renderer.writer(), keyboard_enhanced);

    info!("bye");
    result.context("game loop failed")
}

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
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use tracing_subscriber::EnvFilter;

use dragon_flight::audio::{Audio, Mixer, Sound};
use dragon_flight::config::DEFAULT_SEED;
use dragon_flight::input::Touch;
use dragon_flight::surface::DrawMode;
use dragon_flight::{GameConfig, GameEngine, GameView};

use display::{TerminalSurface, CELL_H, CELL_W};

/// Repaint at most this often (≈30 FPS); ticks still run every render
/// interval in between.
const FRAME: Duration = Duration::from_millis(33);

#[derive(Parser)]
#[command(name = "dragon_flight")]
#[command(about = "Steer a dragon through a storm of fireballs")]
struct Args {
    /// Seed for the fireball pattern; the same seed flies the same level
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Draw entities as plain boxes instead of sprites
    #[arg(long)]
    rectangles: bool,

    /// Fireball speed in playfield pixels per tick
    #[arg(long)]
    fireball_speed: Option<i32>,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Sound ─────────────────────────────────────────────────────────────────────

/// The terminal has no mixer: playback is only tracked, and the blast rings
/// the bell.
struct BellAudio {
    mixer: Mixer,
}

impl Audio for BellAudio {
    fn play(&mut self, sound: Sound) {
        self.mixer.play(sound);
        if sound == Sound::Blast {
            let mut out = stdout();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
    }

    fn pause(&mut self, sound: Sound) {
        self.mixer.pause(sound);
    }

    fn resume(&mut self, sound: Sound) {
        self.mixer.resume(sound);
    }

    fn stop(&mut self, sound: Sound) {
        self.mixer.stop(sound);
    }
}

// ── Input translation ─────────────────────────────────────────────────────────

/// Left-button mouse events stand in for a finger on the screen.  The touch
/// point is the centre of the cell under the pointer.
fn mouse_to_touch(mouse: &MouseEvent) -> Option<Touch> {
    let x = (mouse.column as i32 * CELL_W + CELL_W / 2) as f32;
    let y = (mouse.row as i32 * CELL_H + CELL_H / 2) as f32;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Touch::Press { x, y }),
        MouseEventKind::Drag(MouseButton::Left) => Some(Touch::Move { x, y }),
        MouseEventKind::Up(MouseButton::Left) => Some(Touch::Release),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
fn game_loop<W: Write>(
    surface: &mut TerminalSurface<W>,
    view: &mut GameView<BellAudio>,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let tick = view.engine().config().render_interval;
    let mut last = Instant::now();
    let mut last_draw: Option<Instant> = None;

    loop {
        let mut dirty = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => {
                            view.toggle_pause();
                            dirty = true;
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            view.toggle_draw_mode();
                            dirty = true;
                        }
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(touch) = mouse_to_touch(&mouse) {
                        view.on_touch(touch);
                    }
                }
                // The playfield is fixed for the session; a resize only
                // changes how much of it is visible.
                _ => {}
            }
        }

        let now = Instant::now();
        let ticks = view.advance(now - last);
        last = now;

        let due = last_draw.map_or(true, |t| now - t >= FRAME);
        if (ticks > 0 || dirty) && due {
            surface.begin_frame()?;
            view.draw(surface)?;
            surface.end_frame(view.engine().phase())?;
            last_draw = Some(now);
        }

        thread::sleep(tick);
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn build_view(args: &Args, cols: u16, rows: u16) -> anyhow::Result<GameView<BellAudio>> {
    let mut config = GameConfig {
        seed: args.seed,
        ..GameConfig::default()
    };
    if let Some(speed) = args.fireball_speed {
        config.fireball_speed = speed;
    }

    // The last row is reserved for the controls hint.
    let width = cols as i32 * CELL_W;
    let height = rows.saturating_sub(1) as i32 * CELL_H;
    let audio = BellAudio { mixer: Mixer::new() };
    let engine = GameEngine::new(config, width, height, audio)
        .with_context(|| format!("cannot fit the game into a {cols}x{rows} terminal"))?;

    let mut view = GameView::new(engine);
    if args.rectangles {
        view.set_draw_mode(DrawMode::Rectangle);
    }
    Ok(view)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let (cols, rows) = terminal::size().context("cannot read terminal size")?;
    let mut view = build_view(&args, cols, rows)?;
    tracing::info!(seed = args.seed, cols, rows, "session starting");

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

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

    let mut surface = TerminalSurface::new(out, cols, rows);
    view.start();
    let result = game_loop(&mut surface, &mut view, &rx);

    // Always restore the terminal
    let mut out = stdout();
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    view.engine_mut().stop_game();
    tracing::info!(best = view.engine().max_distance(), "session over");
    result.context("terminal I/O failed")
}

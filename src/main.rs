use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;

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
use tracing::{error, info, Level};

use sisters_quest::clock::TickClock;
use sisters_quest::config::GameConfig;
use sisters_quest::display::{self, InputTracker, SpriteAtlas, TerminalAudio, TerminalRenderer};
use sisters_quest::input::InputEvent;
use sisters_quest::render::Renderer;
use sisters_quest::{GameError, GameSession};

#[derive(Parser, Debug)]
#[command(name = "sisters_quest", about = "Dodge, dash and collect your way back to your sister")]
struct Cli {
    /// Seed for the game's random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation ticks per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Start at the menu instead of the opening crawl
    #[arg(long)]
    skip_intro: bool,

    /// Where log output goes (the terminal belongs to the game)
    #[arg(long, default_value = "sisters_quest.log")]
    log_file: PathBuf,

    /// Log per-tick events as well
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(cli: &Cli) -> std::io::Result<()> {
    let file = File::create(&cli.log_file)?;
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let atlas = SpriteAtlas::builtin();
    let (cols, rows) = terminal::size()?;
    let (width, height) = display::logical_size(cols, rows);
    let config = GameConfig { screen_width: width, screen_height: height, fps: cli.fps, ..GameConfig::default() };

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = GameSession::from_store(config, &atlas, rng).map_err(|e| {
        error!(error = %e, "failed to load assets");
        e
    })?;
    if cli.skip_intro {
        session.skip_to_menu();
    }
    info!(cols, rows, fps = cli.fps, seed = ?cli.seed, "starting");

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
        .is_ok();

    // Blocking reads live on their own thread so the tick loop never waits
    // on input.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &atlas, &mut session, &rx, cli.fps, (cols, rows));

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match &result {
        Ok(()) => info!(score = session.score(), "quit"),
        Err(e) => error!(error = %e, "terminal failure"),
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    atlas: &SpriteAtlas,
    session: &mut GameSession<StdRng>,
    rx: &mpsc::Receiver<Event>,
    fps: u32,
    (cols, rows): (u16, u16),
) -> Result<(), GameError> {
    let mut renderer = TerminalRenderer::new(&mut *out, atlas, cols, rows);
    let mut audio = TerminalAudio::new(stdout());
    let mut input = InputTracker::new();
    let mut clock = TickClock::new(fps);

    loop {
        let now = clock.begin_tick();
        input.begin_frame();

        // ── Drain all pending terminal events (non-blocking) ──────────────────
        while let Ok(ev) = rx.try_recv() {
            input.handle(&ev);
        }
        for event in input.drain_events() {
            if let InputEvent::Resize { width, height } = event {
                renderer.resize_logical(width, height);
            }
            if !session.handle_event(&event, &mut audio) {
                return Ok(());
            }
        }

        session.update(&input.snapshot(), now, &mut audio);
        session.draw(&mut renderer, now);
        renderer.present()?;

        clock.end_tick();
    }
}

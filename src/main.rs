//! Terminal Emoji Crush runner (default binary).
//!
//! Uses crossterm for input and a line-based renderer. The session is driven
//! by a fixed-timestep loop; settle windows and the countdown both advance on
//! the same tick.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use emoji_crush::core::EngineConfig;
use emoji_crush::engine::Session;
use emoji_crush::input::{handle_key_event, should_quit, Cursor};
use emoji_crush::term::{GameView, Hud, TerminalRenderer};
use emoji_crush::types::{GAME_DURATION_SECS, KIND_COUNT, MIN_KIND_COUNT, TICK_MS};

/// Environment variable naming the log file; logging is off when unset.
const LOG_ENV: &str = "EMOJI_CRUSH_LOG";

#[derive(Debug, Parser)]
#[command(author, version, about = "Match-3 emoji puzzle in the terminal", long_about = None)]
struct Args {
    /// Board seed; defaults to the current time
    #[arg(long, value_name = "SEED")]
    seed: Option<u32>,

    /// Number of token kinds in play
    #[arg(
        long,
        value_name = "COUNT",
        default_value_t = KIND_COUNT,
        value_parser = clap::value_parser!(u8).range(MIN_KIND_COUNT as i64..=KIND_COUNT as i64)
    )]
    kinds: u8,

    /// Round length in seconds
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = GAME_DURATION_SECS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    duration: u32,

    /// Skip the settle pauses between cascade steps
    #[arg(long)]
    instant: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    let mut config = if args.instant {
        EngineConfig::instant()
    } else {
        EngineConfig::default()
    };
    config = config
        .with_kind_count(args.kinds)
        .with_game_duration_secs(args.duration);

    let seed = args.seed.unwrap_or_else(seed_from_clock);
    let session = Session::new(config, seed)?;
    info!(seed, kinds = args.kinds, duration = args.duration, "starting session");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var(LOG_ENV) else {
        return Ok(());
    };
    let log_file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, mut session: Session) -> Result<()> {
    let view = GameView::new();
    let mut cursor = Cursor::default();
    let mut snap = session.snapshot();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        session.snapshot_into(&mut snap);
        let hud = Hud {
            score: session.score(),
            time_left: session.time_left(),
            cursor: cursor.position(),
        };
        term.draw(&view.render(&snap, &hud))?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!(score = session.score(), "quit");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key).and_then(|c| cursor.apply(c)) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS);
            // Score is already folded into the session.
            session.drain_events();
        }
    }
}

//! Letter Arcade entry point
//!
//! Headless runner: builds a round, lets the autopilot play it on a virtual
//! (or real) clock and prints a JSON summary when the round ends.

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use letter_arcade::audio::cues_for;
use letter_arcade::config::{self, ShooterConfig, SnakeConfig};
use letter_arcade::platform::{RealtimeClock, Scheduler, Session, VirtualClock};
use letter_arcade::sim::{Game, ShooterRound, SnakeRound, shooter_intents, snake_intents};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GameKind {
    /// Plain snake on a 20x20 board
    Classic,
    /// Spell each answer by eating its letters in order
    Spelling,
    /// Shoot the falling letters of each answer
    Shooter,
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long, value_enum, default_value_t = GameKind::Spelling)]
    game: GameKind,
    /// Overrides the seed from the config file
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks even if the round is still going
    #[arg(long, default_value_t = 20_000)]
    max_ticks: u64,
    /// JSON config for the selected game
    #[arg(long)]
    config: Option<PathBuf>,
    /// Sleep between ticks instead of running as fast as possible
    #[arg(long)]
    realtime: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    game: String,
    ticks: u64,
    #[serde(rename = "elapsedMs")]
    elapsed_ms: u64,
    phase: String,
    score: i64,
    level: u32,
    #[serde(rename = "final")]
    snapshot: serde_json::Value,
}

/// Drive `session` until the round ends or `max_ticks` is reached.
/// `wait` blocks (or jumps) to the scheduler's deadline.
fn drive<G, S, F, W>(
    session: &mut Session<G, S>,
    mut intents: F,
    mut wait: W,
    max_ticks: u64,
) -> Result<u64, Box<dyn Error>>
where
    G: Game,
    S: Scheduler,
    F: FnMut(&G) -> G::Input,
    W: FnMut(&mut S) -> bool,
{
    session.start();
    let mut ticks = 0;
    while ticks < max_ticks && session.is_running() {
        if !wait(session.scheduler_mut()) {
            break;
        }
        session.set_input(intents(session.game()));
        let Some(report) = session.fire()? else {
            break;
        };
        ticks = report.tick;
        for event in &report.events {
            log::debug!("tick {}: {}", report.tick, event.tag());
        }
        for cue in cues_for(&report.events) {
            log::info!("tick {}: cue {}", report.tick, cue.as_str());
        }
    }
    session.stop();
    Ok(ticks)
}

fn run<G, F>(
    name: &str,
    game: G,
    intents: F,
    cli: &Cli,
) -> Result<RunSummary, Box<dyn Error>>
where
    G: Game + Serialize,
    F: FnMut(&G) -> G::Input,
{
    let (game, ticks, elapsed) = if cli.realtime {
        let started = std::time::Instant::now();
        let mut session = Session::new(game, RealtimeClock::new());
        let ticks = drive(&mut session, intents, |clock| clock.wait(), cli.max_ticks)?;
        (session.snapshot(), ticks, started.elapsed())
    } else {
        let mut session = Session::new(game, VirtualClock::new());
        let ticks = drive(
            &mut session,
            intents,
            |clock| clock.advance_to_deadline().is_some(),
            cli.max_ticks,
        )?;
        let elapsed: Duration = session.scheduler().now();
        (session.snapshot(), ticks, elapsed)
    };

    Ok(RunSummary {
        game: name.to_string(),
        ticks,
        elapsed_ms: elapsed.as_millis() as u64,
        phase: game.phase().as_str().to_string(),
        score: game.score(),
        level: game.level(),
        snapshot: serde_json::to_value(&game)?,
    })
}

fn snake_config(cli: &Cli) -> Result<SnakeConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => config::load::<SnakeConfig>(path)?,
        None if cli.game == GameKind::Classic => SnakeConfig::classic(),
        None => SnakeConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn shooter_config(cli: &Cli) -> Result<ShooterConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => config::load::<ShooterConfig>(path)?,
        None => ShooterConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Letter Arcade starting ({:?})...", cli.game);

    let summary = match cli.game {
        GameKind::Classic | GameKind::Spelling => {
            let round = SnakeRound::new(snake_config(&cli)?)?;
            let name = round.mode.as_str();
            run(name, round, snake_intents, &cli)?
        }
        GameKind::Shooter => {
            let round = ShooterRound::new(shooter_config(&cli)?)?;
            run("shooter", round, shooter_intents, &cli)?
        }
    };

    log::info!(
        "Finished after {} ticks: {} with score {}",
        summary.ticks,
        summary.phase,
        summary.score
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

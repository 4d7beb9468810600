//! Headless replay runner (default binary).
//!
//! Starts a seeded session, feeds it a script of steps and prints the final
//! board. The same seed and script always produce the same output, which
//! makes it handy for reproducing bugs and for checking engine changes.
//!
//! Script steps are separated by whitespace or commas:
//!
//! - any command name (`moveLeft`, `rotate`, `hardDrop`, `moveToColumn:5`, ...)
//! - `tick:<ms>` to advance the drop cadence
//! - `pause`, `resume`, `restart`

use std::fmt::Write as _;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{debug, info, Level};
use tracing_subscriber::prelude::*;

use blockfall::core::{EngineConfig, Session, SessionSnapshot};
use blockfall::types::{Command, SessionState};

#[derive(Parser, Debug)]
#[command(name = "blockfall", version, about = "Replay a seeded blockfall session headlessly")]
struct Cli {
    /// Seed for the piece factory
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Playfield columns (overrides BLOCKFALL_COLUMNS)
    #[arg(long)]
    columns: Option<u16>,

    /// Playfield rows (overrides BLOCKFALL_ROWS)
    #[arg(long)]
    rows: Option<u16>,

    /// Initial drop interval in ms (overrides BLOCKFALL_DROP_MS)
    #[arg(long = "drop-ms")]
    drop_ms: Option<u32>,

    /// Steps to replay after the game starts
    #[arg(long, default_value = "")]
    script: String,

    /// Drop steps to run after the script, stopping early on game over
    #[arg(long, default_value_t = 0)]
    ticks: u32,

    /// Print the final snapshot as JSON instead of a text board
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScriptStep {
    Command(Command),
    Tick(u32),
    Pause,
    Resume,
    Restart,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = resolve_config(&cli)?;
    let steps = parse_script(&cli.script)?;

    let mut session = Session::new(config, cli.seed).context("failed to build session")?;
    session.go_to(SessionState::Running);
    info!(seed = cli.seed, steps = steps.len(), "replaying");

    for step in &steps {
        let accepted = run_step(&mut session, *step);
        debug!(?step, accepted, "step");
    }
    for _ in 0..cli.ticks {
        if !session.drop_tick() {
            break;
        }
    }

    let snapshot = session.snapshot();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render_text(&snapshot)?);
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
}

fn resolve_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = EngineConfig::from_env().context("invalid BLOCKFALL_* environment")?;
    if let Some(columns) = cli.columns {
        config.columns = columns;
    }
    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(drop_ms) = cli.drop_ms {
        config.drop_interval_ms = drop_ms;
    }
    config.validate().context("invalid engine configuration")?;
    Ok(config)
}

fn parse_script(script: &str) -> Result<Vec<ScriptStep>> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(parse_step)
        .collect()
}

fn parse_step(token: &str) -> Result<ScriptStep> {
    if let Some(ms) = token.strip_prefix("tick:") {
        let ms = ms
            .parse()
            .with_context(|| format!("bad tick duration in {token:?}"))?;
        return Ok(ScriptStep::Tick(ms));
    }
    match token {
        "pause" => Ok(ScriptStep::Pause),
        "resume" => Ok(ScriptStep::Resume),
        "restart" => Ok(ScriptStep::Restart),
        _ => Command::from_str(token)
            .map(ScriptStep::Command)
            .ok_or_else(|| anyhow!("unknown script step {token:?}")),
    }
}

fn run_step(session: &mut Session, step: ScriptStep) -> bool {
    match step {
        ScriptStep::Command(command) => session.apply(command),
        ScriptStep::Tick(ms) => session.tick(ms),
        ScriptStep::Pause => session.pause(),
        ScriptStep::Resume => session.resume(),
        ScriptStep::Restart => session.go_to(SessionState::Running),
    }
}

fn render_text(snapshot: &SessionSnapshot) -> Result<String> {
    let mut out = String::new();
    writeln!(
        out,
        "state: {}  score: {}  pieces: {}{}",
        snapshot.state.as_str(),
        snapshot.score,
        snapshot.pieces_locked,
        if snapshot.paused { "  (paused)" } else { "" }
    )?;

    let border = "-".repeat(snapshot.columns as usize);
    writeln!(out, "+{border}+")?;
    for row in 0..snapshot.rows as i32 {
        out.push('|');
        for column in 0..snapshot.columns as i32 {
            let glyph = snapshot
                .color_at(column, row)
                .map(|c| c.glyph())
                .unwrap_or('.');
            out.push(glyph);
        }
        out.push_str("|\n");
    }
    writeln!(out, "+{border}+")?;

    if let Some(next) = &snapshot.next {
        writeln!(out, "next: {} ({})", next.shape.as_str(), next.color.as_str())?;
    }
    Ok(out)
}

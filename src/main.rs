use std::fs::read_to_string;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::event;
use crossterm::event::Event;
use crossterm::event::KeyEventKind;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use torus_life::Engine;
use torus_life::Grid;
use torus_life::RuleSet;

/// Glider-like seed on a 7x7 grid.
const SEED: [&str; 7] = [
    "       ",
    "       ",
    "   #   ",
    "  ###  ",
    "   #   ",
    "       ",
    "       ",
];

#[derive(Parser)]
#[command(name = "torus-life")]
#[command(about = "Conway's Game of Life on a wrapping grid")]
struct Cli {
    /// Birth/survival rule
    ///
    /// See: https://conwaylife.com/wiki/Rulestring
    #[arg(short, long, default_value = "B3/S23")]
    rule: String,

    /// Number of generations to print
    #[arg(short, long, default_value_t = 4)]
    generations: usize,

    /// Plaintext pattern file, one row per line. A space is a dead cell, anything else is alive
    #[arg(short, long)]
    pattern: Option<PathBuf>,

    /// Exit without waiting for a keypress
    #[arg(long)]
    no_wait: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let rule: RuleSet = cli
        .rule
        .parse()
        .with_context(|| format!("Failed to parse rule {:?}", cli.rule))?;

    let grid = match &cli.pattern {
        Some(path) => {
            info!(path = %path.display(), "Loading pattern");

            read_to_string(path)
                .with_context(|| format!("Failed to open {}", path.display()))?
                .parse::<Grid>()
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => torus_life::grid::parse_grid(&SEED).context("Failed to parse seed")?,
    };

    let mut engine = Engine::with_grid(rule, grid);

    for _ in 0..cli.generations {
        engine.advance_generation();
        println!("{engine}");
    }

    if !cli.no_wait {
        wait_for_key().context("Failed to read keypress")?;
    }

    Ok(())
}

/// Blocks until any key is pressed
fn wait_for_key() -> io::Result<()> {
    terminal::enable_raw_mode()?;

    let res = loop {
        match event::read() {
            Ok(Event::Key(key_event)) if key_event.kind == KeyEventKind::Press => break Ok(()),
            Ok(_) => {}
            Err(e) => break Err(e),
        }
    };

    terminal::disable_raw_mode()?;

    res
}

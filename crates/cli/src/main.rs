//! Cache-trace simulator CLI.
//!
//! Replays a Valgrind-style memory trace against a modeled set-associative
//! cache and reports hit, miss, and eviction totals. It performs:
//! 1. **Geometry resolution:** `-s/-E/-b` flags, optionally seeded from a JSON
//!    file via `--config` (flags win).
//! 2. **Replay:** every data record goes through the cache engine; instruction
//!    fetches are carried but never touch the cache.
//! 3. **Reporting:** per-record outcome lines under `-v`, then the summary
//!    `hits:<n> misses:<n> evictions:<n>` on stdout.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use cachetrace_core::{AccessOutcome, CacheConfig, Response, Session, TraceReader, TraceRecord};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    version,
    about = "Set-associative cache simulator for Valgrind memory traces",
    long_about = "Replay a Valgrind memory trace against a hypothetical cache and count\n\
                  hits, misses, and evictions.\n\n\
                  Examples:\n  \
                  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  \
                  csim -v -s 8 -E 2 -b 6 -t traces/long.trace\n  \
                  csim --config l1d.json -t traces/yi.trace"
)]
struct Cli {
    /// Number of set-index bits (the cache has 2^s sets).
    #[arg(short = 's', value_name = "num")]
    set_bits: Option<u32>,

    /// Associativity: number of lines per set.
    #[arg(short = 'E', value_name = "num")]
    ways: Option<usize>,

    /// Number of block-offset bits.
    #[arg(short = 'b', value_name = "num")]
    block_bits: Option<u32>,

    /// Trace file to replay.
    #[arg(short = 't', value_name = "file")]
    trace: PathBuf,

    /// Print the outcome of every data record as it is processed.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// JSON file with the cache geometry; explicit flags take precedence.
    #[arg(long, value_name = "file")]
    config: Option<PathBuf>,
}

/// Cache geometry as carried by a `--config` JSON file.
#[derive(Debug, Deserialize)]
struct Geometry {
    set_bits: u32,
    ways: usize,
    block_bits: u32,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(msg) => fail(&msg),
    };
    let reader = match TraceReader::open(&cli.trace) {
        Ok(reader) => reader,
        Err(e) => fail(&e.to_string()),
    };

    let mut session = Session::new(config);

    if cli.verbose {
        for record in reader {
            match record {
                Ok(record) => {
                    let response = session.process(&record);
                    report(&record, response);
                }
                Err(e) => fail(&e.to_string()),
            }
        }
    } else if let Err(e) = session.run(reader) {
        fail(&e.to_string());
    }

    println!("{}", session.stats());
}

/// Builds the cache geometry from flags, falling back to `--config` fields.
///
/// Each of `s`, `E`, and `b` must come from somewhere; validation of the
/// combined geometry happens in [`CacheConfig::new`].
fn resolve_config(cli: &Cli) -> Result<CacheConfig, String> {
    let file = match &cli.config {
        Some(path) => Some(load_geometry(path)?),
        None => None,
    };

    let set_bits = cli
        .set_bits
        .or_else(|| file.as_ref().map(|g| g.set_bits))
        .ok_or_else(|| String::from("set-index bits not specified (use -s or --config)"))?;
    let ways = cli
        .ways
        .or_else(|| file.as_ref().map(|g| g.ways))
        .ok_or_else(|| String::from("associativity not specified (use -E or --config)"))?;
    let block_bits = cli
        .block_bits
        .or_else(|| file.as_ref().map(|g| g.block_bits))
        .ok_or_else(|| String::from("block-offset bits not specified (use -b or --config)"))?;

    CacheConfig::new(set_bits, ways, block_bits).map_err(|e| e.to_string())
}

/// Reads and parses a `--config` geometry file.
fn load_geometry(path: &Path) -> Result<Geometry, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read config file '{}': {e}", path.display()))?;
    serde_json::from_str(&text)
        .map_err(|e| format!("invalid config file '{}': {e}", path.display()))
}

/// Prints one verbose outcome line for a data record.
///
/// Instruction fetches print nothing: they never touched the cache.
fn report(record: &TraceRecord, response: Response) {
    match response {
        Response::Ignored => {}
        Response::One(outcome) => println!(
            "{} {:x},{} {}",
            record.op,
            record.addr,
            record.size,
            label(outcome)
        ),
        Response::Two(read, write) => println!(
            "{} {:x},{} {} {}",
            record.op,
            record.addr,
            record.size,
            label(read),
            label(write)
        ),
    }
}

/// The verbose-mode label for an outcome.
const fn label(outcome: AccessOutcome) -> &'static str {
    match outcome {
        AccessOutcome::Hit => "hit",
        AccessOutcome::Miss => "miss",
        AccessOutcome::MissWithEviction => "miss eviction",
    }
}

/// Reports a fatal error and exits.
fn fail(msg: &str) -> ! {
    eprintln!("csim: {msg}");
    process::exit(1);
}

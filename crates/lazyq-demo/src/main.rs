//! lazyq demo CLI.
//!
//! Walks through the classic query examples on top of lazyq's deferred
//! pipeline: filtering accounts, deferred versus materialized execution,
//! projection, skip/take windows, multi-key ordering, grouping and
//! dictionary lookups.
//!
//! # Quick Start
//!
//! ```bash
//! lazyq-demo negatives
//! lazyq-demo deferred
//! lazyq-demo deferred --materialize
//! lazyq-demo --format json remainders --divisor 3
//! RUST_LOG=lazyq=trace lazyq-demo digits
//! ```

mod account;
mod demos;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lazyq::Dir;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::account::{load_accounts, sample_accounts, Account};
use crate::output::{Format, Report};

/// lazyq-demo - deferred query pipeline walkthrough.
#[derive(Parser)]
#[command(name = "lazyq-demo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// JSON file with an array of accounts (defaults to built-in samples).
    #[arg(long, global = true)]
    accounts: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log pipeline internals at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Customers with a negative balance.
    Negatives,

    /// Consume a counting selector twice.
    Deferred {
        /// Collect the series once and replay the list.
        #[arg(long)]
        materialize: bool,
    },

    /// Names of overdrawn accounts.
    Overdrawn {
        /// Only names starting with this prefix.
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Upper- and lower-case forms of each word.
    Words {
        /// Words to convert.
        #[arg(default_values_t = ["aPPLE".to_string(), "BlUeBeRrY".to_string(), "cHeRry".to_string()])]
        words: Vec<String>,
    },

    /// A skip/take window over an integer range.
    Window {
        /// First value of the range.
        #[arg(long, default_value_t = 1)]
        start: i64,

        /// Number of values in the range.
        #[arg(long, default_value_t = 20)]
        count: usize,

        /// Values to skip.
        #[arg(long, default_value_t = 5)]
        skip: usize,

        /// Values to take after skipping.
        #[arg(long, default_value_t = 5)]
        take: usize,
    },

    /// Digit names ordered by length, then alphabetically.
    Digits {
        /// Direction of the length ordering.
        #[arg(long, value_enum, default_value_t = Direction::Asc)]
        dir: Direction,
    },

    /// Numbers grouped by remainder.
    Remainders {
        /// Divisor for the remainder.
        #[arg(long, default_value_t = 5)]
        divisor: i64,
    },

    /// Accounts grouped by holder name.
    Households,

    /// Score of a participant, looked up by name.
    Score {
        /// Participant name.
        name: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    Asc,
    Desc,
}

impl From<Direction> for Dir {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Asc => Dir::Asc,
            Direction::Desc => Dir::Desc,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, &directives))
        .with_writer(std::io::stderr)
        .init();

    let report = run(&cli)?;
    let rendered = report.render(cli.format)?;
    println!("{rendered}");
    Ok(())
}

/// Builds the log filter from `RUST_LOG` directives.
///
/// The default level applies only when the directives name no global level:
/// `warn`, or `debug` with `--verbose`.
fn log_filter(verbose: bool, directives: &str) -> EnvFilter {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse_lossy(directives)
}

fn accounts(cli: &Cli) -> Result<Vec<Account>> {
    match &cli.accounts {
        Some(path) => Ok(load_accounts(path)?),
        None => Ok(sample_accounts()),
    }
}

fn run(cli: &Cli) -> Result<Report> {
    let report = match &cli.command {
        Commands::Negatives => Report::Customers(
            demos::negative_balances(&accounts(cli)?).context("negative balance query failed")?,
        ),
        Commands::Deferred { materialize } => {
            Report::Deferred(demos::deferred_runs(*materialize).context("deferred demo failed")?)
        }
        Commands::Overdrawn { prefix } => Report::Names(
            demos::overdrawn_names(&accounts(cli)?, prefix.as_deref())
                .context("overdrawn query failed")?,
        ),
        Commands::Words { words } => {
            Report::Words(demos::case_pairs(words).context("word projection failed")?)
        }
        Commands::Window {
            start,
            count,
            skip,
            take,
        } => Report::Numbers(
            demos::window(*start, *count, *skip, *take).context("window query failed")?,
        ),
        Commands::Digits { dir } => Report::Names(
            demos::sorted_digits((*dir).into())
                .context("digit ordering failed")?
                .into_iter()
                .map(String::from)
                .collect(),
        ),
        Commands::Remainders { divisor } => Report::Remainders(
            demos::remainder_groups(*divisor).context("remainder grouping failed")?,
        ),
        Commands::Households => Report::Households(
            demos::households(&accounts(cli)?).context("household grouping failed")?,
        ),
        Commands::Score { name } => Report::Score {
            name: name.clone(),
            score: demos::score_of(name)
                .with_context(|| format!("no score for {name}"))?,
        },
    };
    Ok(report)
}

//! `payoff` - command-line front end for the payoff core
//!
//! Reads instruments from a JSON array and prints metrics, plans,
//! comparisons or amortization schedules as JSON on stdout. Logs go to
//! stderr and are controlled by `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use payoff_core_rs::{
    amortization, comparator, metrics, planner, DebtInstrument, PayoffPolicy, Strategy,
};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum StrategyArg {
    Avalanche,
    Snowball,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Avalanche => Strategy::Avalanche,
            StrategyArg::Snowball => Strategy::Snowball,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "payoff", version, about = "Credit-card debt payoff planner")]
struct Cli {
    /// Policy JSON file (defaults apply to missing fields)
    #[arg(long, global = true)]
    policy: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate exposure across instruments
    Metrics {
        /// Instruments JSON file ("-" for stdin)
        #[arg(short = 'i', long)]
        instruments: PathBuf,
    },

    /// Payment plan for one strategy
    Plan {
        #[arg(short = 'i', long)]
        instruments: PathBuf,

        /// Monthly budget in cents
        #[arg(short = 'b', long)]
        budget: i64,

        #[arg(short = 's', long, value_enum, default_value = "avalanche")]
        strategy: StrategyArg,
    },

    /// Avalanche vs snowball with a recommendation
    Compare {
        #[arg(short = 'i', long)]
        instruments: PathBuf,

        #[arg(short = 'b', long)]
        budget: i64,
    },

    /// Month-by-month schedule for a single balance
    Schedule {
        /// Balance in cents
        #[arg(long)]
        balance: i64,

        /// Monthly payment in cents
        #[arg(long)]
        payment: i64,

        /// Annual rate in percent
        #[arg(long)]
        rate: f64,

        #[arg(long, default_value_t = 600)]
        max_months: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let policy = load_policy(cli.policy.as_deref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Metrics { instruments } => {
            let instruments = load_instruments(&instruments)?;
            let result = metrics::aggregate_with_policy(&instruments, &policy);
            write_json(&mut out, &result, cli.pretty)?;
        }
        Command::Plan {
            instruments,
            budget,
            strategy,
        } => {
            let instruments = load_instruments(&instruments)?;
            let plan =
                planner::generate_plan_with_policy(&instruments, budget, strategy.into(), &policy);
            if plan.summary.is_underfunded() {
                info!(
                    requested = plan.summary.requested_budget,
                    effective = plan.summary.total_monthly_payment,
                    "budget raised to cover minimum payments"
                );
            }
            write_json(&mut out, &plan, cli.pretty)?;
        }
        Command::Compare {
            instruments,
            budget,
        } => {
            let instruments = load_instruments(&instruments)?;
            let comparison = comparator::compare_with_policy(&instruments, budget, &policy);
            write_json(&mut out, &comparison, cli.pretty)?;
        }
        Command::Schedule {
            balance,
            payment,
            rate,
            max_months,
        } => {
            let rows =
                amortization::checked_amortization_schedule(balance, payment, rate, max_months)?;
            write_json(&mut out, &rows, cli.pretty)?;
        }
    }

    out.flush().context("failed to flush stdout")
}

fn load_policy(path: Option<&Path>) -> Result<PayoffPolicy> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read policy {}", path.display()))?;
            let policy = PayoffPolicy::from_json(&json)
                .with_context(|| format!("invalid policy {}", path.display()))?;
            debug!(?policy, "loaded policy");
            Ok(policy)
        }
        None => Ok(PayoffPolicy::default()),
    }
}

fn load_instruments(path: &Path) -> Result<Vec<DebtInstrument>> {
    let json = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read instruments from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read instruments {}", path.display()))?
    };

    let instruments: Vec<DebtInstrument> =
        serde_json::from_str(&json).context("instruments must be a JSON array")?;
    for instrument in &instruments {
        instrument
            .validate()
            .with_context(|| format!("invalid instrument '{}'", instrument.id()))?;
    }
    debug!(count = instruments.len(), "loaded instruments");
    Ok(instruments)
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

//! Message order check CLI
//!
//! Verifies that a page of messages is sorted by `internal_date`:
//! - Default: newest first, each record compared with the one before it
//! - Checks the bundled sample page unless `--input` names a JSON file
//! - CI mode (`--fail-on-violation`): exit status 1 when out of order

mod config;
mod logging;
mod output;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use order_check_core::{Baseline, Direction, MessagePage, OrderChecker};

use crate::config::CheckConfig;
use crate::output::cli::RunInfo;
use crate::output::{CliOutput, OutputLevel};

// ═══════════════════════════════════════════════════════════════════════════════
// CLI Arguments
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "order-check")]
#[command(about = "Check that a message page is sorted by internal_date")]
#[command(version)]
struct Args {
    /// Path to a message page JSON file (defaults to the bundled sample)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    // ─────────────────────────────────────────────────────────────────────────
    // Check Mode
    // ─────────────────────────────────────────────────────────────────────────
    /// Expected order: descending (newest first) or ascending
    #[arg(long)]
    direction: Option<Direction>,

    /// Compare against the previous record (adjacent) or the tightest bound so far (running)
    #[arg(long)]
    baseline: Option<Baseline>,

    /// Exit with status 1 if any violation is found
    #[arg(long)]
    fail_on_violation: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Output Mode
    // ─────────────────────────────────────────────────────────────────────────
    /// Quiet mode: completion marker and summary only
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode: record ids and times for each violation, plus a summary
    #[arg(short, long)]
    verbose: bool,
}

/// Effective settings after merging flags over the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Settings {
    checker: OrderChecker,
    fail_on_violation: bool,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Main
// ═══════════════════════════════════════════════════════════════════════════════

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init();

    let config = match &args.config {
        Some(path) => CheckConfig::load(path)?,
        None => CheckConfig::default(),
    };
    let settings = resolve_settings(&args, &config);

    let (page, source) = match &args.input {
        Some(path) => (MessagePage::load(path)?, path.display().to_string()),
        None => (MessagePage::bundled()?, "bundled dataset".to_string()),
    };
    tracing::info!(
        source = %source,
        records = page.len(),
        direction = ?settings.checker.direction,
        baseline = ?settings.checker.baseline,
        "Checking message order"
    );

    let mut cli = CliOutput::stdout(output_level(&args));
    let violations = run_check(&settings.checker, &page, &mut cli)?;

    if cli.level() != OutputLevel::Normal {
        cli.print_summary(&RunInfo {
            source: &source,
            records_scanned: page.len(),
            checker: settings.checker,
        });
    }

    if settings.fail_on_violation && violations > 0 {
        tracing::warn!(violations, "Message page is out of order");
        std::process::exit(1);
    }

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// Scan the page, writing each violation as it is found, then the marker
fn run_check<W: Write>(
    checker: &OrderChecker,
    page: &MessagePage,
    cli: &mut CliOutput<W>,
) -> std::io::Result<usize> {
    for violation in checker.check(&page.messages) {
        cli.violation(&violation)?;
    }
    cli.complete()?;
    Ok(cli.violation_count())
}

fn output_level(args: &Args) -> OutputLevel {
    if args.quiet {
        OutputLevel::Quiet
    } else if args.verbose {
        OutputLevel::Verbose
    } else {
        OutputLevel::Normal
    }
}

fn resolve_settings(args: &Args, config: &CheckConfig) -> Settings {
    let file = &config.check;
    Settings {
        checker: OrderChecker::new(
            args.direction.or(file.direction).unwrap_or_default(),
            args.baseline.or(file.baseline).unwrap_or_default(),
        ),
        fail_on_violation: args.fail_on_violation || file.fail_on_violation.unwrap_or(false),
    }
}

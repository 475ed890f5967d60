//! snaprotate CLI
//!
//! One evaluation pass per invocation: load the retention policy, list
//! the project's disk snapshots, decide which ones rotate out, and
//! (unless `--dry-run`) delete them through the provider.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use snaprotate::{GcpProvider, RetentionPolicy, RotationRunResult, SnapshotRotator, config};

#[derive(Parser, Debug)]
#[command(author, version, about = "Tiered retention and rotation for GCE disk snapshots", long_about = None)]
struct Args {
    /// Configuration file path (defaults to ./snaprotate.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Google Cloud project containing the snapshots
    #[arg(long)]
    project: String,

    /// Optional filter expression for the snapshot listing
    #[arg(long)]
    filter: Option<String>,

    /// Compute and report the decision without deleting anything
    #[arg(long)]
    dry_run: bool,

    /// Verbose output: full retained/deleted name lists, debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: warnings only
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(args: &Args) {
    let level = if args.quiet {
        "warn"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_report(result: &RotationRunResult, dry_run: bool, verbose: bool) {
    println!("Snapshots evaluated:  {}", result.total);
    println!("Marked for deletion:  {}", result.gate.marked);
    println!("Retained:             {}", result.gate.retained);

    if result.deleted {
        println!("Deleted {} snapshots", result.delete_names.len());
    } else if result.gate.allowed && dry_run {
        println!("[DRY RUN] deletion authorized but suppressed");
    } else if result.gate.marked > 0 {
        println!(
            "Deletion blocked: only {} snapshots would remain (minimum {})",
            result.gate.retained, result.gate.minimum
        );
    }

    if verbose {
        for name in &result.delete_names {
            println!("  delete: {name}");
        }
        for name in &result.retained_names {
            println!("  retain: {name}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let config = config::load_or_default(args.config.as_deref());
    let policy = match RetentionPolicy::from_config(&config) {
        Ok(policy) => policy,
        Err(e) => {
            warn!(error = %e, "invalid rotation settings, using built-in defaults");
            RetentionPolicy::default()
        }
    };

    let provider = GcpProvider::new(&args.project, args.filter.clone());
    let rotator = SnapshotRotator::new(provider, policy, args.dry_run);

    let result = rotator.run().await?;
    print_report(&result, args.dry_run, args.verbose);

    Ok(())
}

//! Streams sequential `u32` values through an estimator and reports the estimate.
//!
//! ```text
//! cargo run --release --example estimator -- --precision 14 --count 1000000000
//! ```
use std::time::Instant;

use clap::Parser;
use sip_hyperloglog::CardinalityEstimator;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Estimate the number of distinct u32 values in 0..count")]
struct Args {
    /// Number of hash bits used for register indices, in [4..16]
    #[arg(short, long, default_value_t = 14)]
    precision: u8,

    /// Number of sequential values to insert
    #[arg(short, long, default_value_t = 1_000_000_000)]
    count: u32,

    /// Log the running estimate every `report_every` values (0 disables)
    #[arg(short, long, default_value_t = 100_000_000)]
    report_every: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut estimator = CardinalityEstimator::new(args.precision)?;

    let start = Instant::now();
    for i in 0..args.count {
        estimator.insert(&i.to_le_bytes());
        if args.report_every > 0 && (i + 1) % args.report_every == 0 {
            info!(inserted = i + 1, estimate = estimator.estimate(), "progress");
        }
    }

    let estimate = estimator.estimate();
    let relative_error = if args.count == 0 {
        0.0
    } else {
        (estimate - f64::from(args.count)).abs() / f64::from(args.count)
    };
    println!("precision         = {}", estimator.precision());
    println!("distinct values   = {}", args.count);
    println!("estimate          = {estimate:.0}");
    println!(
        "relative error    = {:.4} (expected {:.4})",
        relative_error,
        estimator.precision().standard_error()
    );
    println!("elapsed           = {:?}", start.elapsed());
    println!("estimator size    = {} bytes", estimator.size_of());

    Ok(())
}

//! ratewatch CLI - currency conversion and rate reports from the terminal
//!
//! ## Example Usage
//!
//! ```bash
//! # Convert 100 USD to EUR
//! ratewatch convert 100 --from USD --to EUR
//!
//! # 7-day trend chart
//! ratewatch weekly --from USD --to EUR
//!
//! # 12-month report with reproducible jitter
//! ratewatch yearly --from USD --to RUB --year 2024 --seed 42
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratewatch::chart::{ChartData, ChartSlot, TermChart};
use ratewatch::currency::Currency;
use ratewatch::format;
use ratewatch::rates::ExchangeRateApiSource;
use ratewatch::series::MONTHLY_PERIODS;
use ratewatch::session::{ConverterSession, Report};
use ratewatch::stats::compute_stats;
use chrono::{Datelike, Utc};
use std::process;

/// ratewatch: currency conversion and exchange-rate reports
#[derive(Parser)]
#[command(name = "ratewatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Currency conversion and exchange-rate reports", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert (negative input clamps to 0)
        #[arg(value_name = "AMOUNT")]
        amount: f64,

        /// Base currency code
        #[arg(short = 'f', long, default_value = "USD")]
        from: String,

        /// Target currency code
        #[arg(short = 't', long, default_value = "EUR")]
        to: String,

        /// Swap base and target before converting
        #[arg(long)]
        swap: bool,
    },

    /// Show the 7-day rate trend with statistics
    Weekly {
        /// Base currency code
        #[arg(short = 'f', long, default_value = "USD")]
        from: String,

        /// Target currency code
        #[arg(short = 't', long, default_value = "EUR")]
        to: String,
    },

    /// Show the 12-month yearly report with statistics
    Yearly {
        /// Base currency code
        #[arg(short = 'f', long, default_value = "USD")]
        from: String,

        /// Target currency code
        #[arg(short = 't', long, default_value = "EUR")]
        to: String,

        /// Report year (defaults to the current year)
        #[arg(short = 'y', long)]
        year: Option<i32>,

        /// Seed for the synthetic month-to-month jitter
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            amount,
            from,
            to,
            swap,
        } => run_convert(amount, &from, &to, swap, cli.verbose).await,

        Commands::Weekly { from, to } => run_weekly(&from, &to).await,

        Commands::Yearly {
            from,
            to,
            year,
            seed,
        } => run_yearly(&from, &to, year, seed).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn parse_pair(from: &str, to: &str) -> Result<(Currency, Currency)> {
    Ok((Currency::from_code(from)?, Currency::from_code(to)?))
}

async fn run_convert(amount: f64, from: &str, to: &str, swap: bool, verbose: bool) -> Result<()> {
    let (base, quote) = parse_pair(from, to)?;
    let source = ExchangeRateApiSource::new()?;
    let mut session = ConverterSession::new(base, quote);

    if swap {
        session.swap_currencies();
    }
    session.set_amount(amount);
    session.load_rates(&source).await?;

    let conversion = session.convert()?;

    if verbose {
        println!(
            "  {} {} {} → {} {}",
            "Pair:".bold(),
            session.base().flag(),
            session.base(),
            session.quote().flag(),
            session.quote()
        );
    }

    println!(
        "{} {} = {} {}",
        format::format_amount(conversion.amount),
        conversion.base.code().bold(),
        format::format_amount(conversion.converted).green().bold(),
        conversion.quote.code().bold()
    );
    println!(
        "{}",
        format::format_unit_rate(conversion.base, conversion.quote, conversion.rate).dimmed()
    );
    println!("{}", format::format_updated_at(conversion.fetched_at).dimmed());

    Ok(())
}

async fn run_weekly(from: &str, to: &str) -> Result<()> {
    let (base, quote) = parse_pair(from, to)?;
    let source = ExchangeRateApiSource::new()?;
    let session = ConverterSession::new(base, quote);

    println!("{}", "Loading 7-day trend...".cyan().bold());
    let report = session.weekly_report(&source).await?;

    print_report(&report, "7-Day Statistics");
    Ok(())
}

async fn run_yearly(from: &str, to: &str, year: Option<i32>, seed: Option<u64>) -> Result<()> {
    let (base, quote) = parse_pair(from, to)?;
    let year = year.unwrap_or_else(|| Utc::now().year());
    let source = ExchangeRateApiSource::new()?;
    let session = ConverterSession::new(base, quote);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let pb = ProgressBar::new(MONTHLY_PERIODS as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message(format!("Sampling {} months of {}", MONTHLY_PERIODS, year));

    let progress = pb.clone();
    let builder = session
        .monthly_series(year)?
        .on_progress(move |done, _total| progress.set_position(done as u64));

    // Clear the bar whether or not the load succeeded.
    let result = builder.build(&source, &mut rng).await;
    pb.finish_and_clear();
    let series = result?;

    let stats = compute_stats(&series)?;
    let report = Report { series, stats };

    print_report(&report, &format!("Yearly Report ({})", year));
    Ok(())
}

fn print_report(report: &Report, heading: &str) {
    // One owned chart per slot; replacing disposes the previous instance.
    let mut slot: ChartSlot<ChartData> = ChartSlot::new();
    let data = slot.replace(ChartData::from_series(&report.series));
    println!();
    println!("{}", TermChart::new().render(data));

    println!("{}", heading.green().bold());
    println!("{}", "=".repeat(heading.len()).green());
    match &report.stats {
        Some(stats) => print!("{}", format::render_stats_panel(stats)),
        None => println!("{}", "  No valid samples for this period.".dimmed()),
    }
}

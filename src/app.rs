//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging
//! - parses CLI arguments
//! - loads records (CSV or demo batch)
//! - runs the harmonize/forecast pipeline
//! - prints reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, InspectArgs, RunArgs};
use crate::config::SharedConfig;
use crate::data::generate_demo_records;
use crate::domain::{EngineConfig, RawRecord};
use crate::error::AppError;
use crate::forecast::{Forecaster, GrowthForecaster};
use crate::harmonize::RuleBasedHarmonizer;
use crate::io::{write_batch_json, write_report_txt, CsvRecordSource, RecordSource};

pub mod pipeline;

/// Demo seed used when the user did not provide one.
const DEFAULT_DEMO_SEED: u64 = 42;

/// Entry point for the `opsf` binary.
pub fn run() -> Result<(), AppError> {
    init_tracing();

    // We want bare `opsf` (and `opsf -f data.csv`) to behave like
    // `opsf menu ...`. Clap requires a subcommand name, so we do a small,
    // explicit rewrite of the argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Menu(args) => crate::cli::menu::run_menu(&args),
        Command::Run(args) => handle_run(&args),
        Command::Inspect(args) => handle_inspect(&args),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

fn handle_run(args: &RunArgs) -> Result<(), AppError> {
    let records = load_records(args.file.as_deref(), args.demo_count, args.seed);

    let config = SharedConfig::new(EngineConfig {
        growth_factor: args.growth_factor,
        simulated_delay_ms: args.delay_ms.unwrap_or(0),
    });
    let harmonizer = RuleBasedHarmonizer::new();
    let mut forecaster: Box<dyn Forecaster> = match args.seed {
        Some(seed) => Box::new(GrowthForecaster::with_seed(config.clone(), seed)),
        None => Box::new(GrowthForecaster::new(config.clone())),
    };

    // An empty source is valid input: the summary reports 0 / 0.
    let batch = pipeline::run_batch(&records, &harmonizer, forecaster.as_mut(), &config);

    for (record, prediction) in records.iter().zip(&batch.results) {
        print!("{}", crate::report::format_prediction_block(record, prediction));
    }
    print!("{}", crate::report::format_run_summary(&batch));

    // Optional exports.
    if let Some(path) = &args.report {
        write_report_txt(path, &records, &batch.results)?;
        println!(">>> [OK] Report saved to {}.", path.display());
    }
    if let Some(path) = &args.export_json {
        write_batch_json(path, &batch)?;
        println!(">>> [OK] Batch JSON saved to {}.", path.display());
    }

    Ok(())
}

fn handle_inspect(args: &InspectArgs) -> Result<(), AppError> {
    let records = load_records(args.file.as_deref(), args.demo_count, args.seed);
    print!("{}", crate::report::format_raw_inspection(&records, args.top));
    Ok(())
}

fn load_records(
    file: Option<&std::path::Path>,
    demo_count: usize,
    seed: Option<u64>,
) -> Vec<RawRecord> {
    match file {
        Some(path) => CsvRecordSource::new().load(&path.to_string_lossy()),
        None => generate_demo_records(demo_count, seed.unwrap_or(DEFAULT_DEMO_SEED)),
    }
}

/// Rewrite argv so `opsf` defaults to `opsf menu`.
///
/// Rules:
/// - `opsf`                    -> `opsf menu`
/// - `opsf -f data.csv ...`    -> `opsf menu -f data.csv ...`
/// - `opsf --help/--version`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("menu".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "menu" | "run" | "inspect");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "menu flags".
    if arg1.starts_with('-') {
        argv.insert(1, "menu".to_string());
        return argv;
    }

    // Otherwise, leave as-is (clap will produce the usage error).
    argv
}

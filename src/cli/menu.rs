//! Interactive analyst menu.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the menu provides the "run `opsf` and explore" UX
//!
//! The menu is a two-state loop (no data loaded / data in memory), mirrors
//! its state in the option list, and talks to the pipeline exclusively
//! through the same seams the one-shot CLI uses.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::app::pipeline;
use crate::cli::RunArgs;
use crate::config::SharedConfig;
use crate::data::generate_demo_records;
use crate::domain::{BatchResult, EngineConfig, RawRecord};
use crate::error::AppError;
use crate::forecast::{Forecaster, GrowthForecaster};
use crate::harmonize::RuleBasedHarmonizer;
use crate::io::{default_report_path, write_report_txt, CsvRecordSource, RecordSource};
use crate::report;

/// Demo seed used when the user did not provide one.
const DEFAULT_DEMO_SEED: u64 = 42;

/// Rows shown by the inspection option.
const INSPECT_LIMIT: usize = 5;

/// Run the interactive menu until the user quits (or stdin closes).
pub fn run_menu(args: &RunArgs) -> Result<(), AppError> {
    let config = SharedConfig::new(EngineConfig {
        growth_factor: args.growth_factor,
        simulated_delay_ms: args
            .delay_ms
            .unwrap_or(EngineConfig::default().simulated_delay_ms),
    });

    let harmonizer = RuleBasedHarmonizer::new();
    let mut forecaster: Box<dyn Forecaster> = match args.seed {
        Some(seed) => Box::new(GrowthForecaster::with_seed(config.clone(), seed)),
        None => Box::new(GrowthForecaster::new(config.clone())),
    };
    let source = CsvRecordSource::new();

    let mut records: Vec<RawRecord> = Vec::new();
    // Records and results of the most recent analysis, kept together so a
    // later reload cannot desync the exported report.
    let mut last_analysis: Option<(Vec<RawRecord>, BatchResult)> = None;

    print_header();

    loop {
        let has_data = !records.is_empty();
        print_menu(has_data);

        let Some(input) = prompt_line("\n>> Select option: ")? else {
            break; // stdin closed
        };

        if !has_data {
            match input.as_str() {
                "1" => {
                    if let Some(loaded) = load_from_csv(args, &source)? {
                        records = loaded;
                        report_load(&records);
                    }
                }
                "2" => {
                    records = load_demo(args);
                    report_load(&records);
                }
                "3" => break,
                _ => println!(" [X] Invalid option."),
            }
        } else {
            match input.as_str() {
                "1" => print!("{}", report::format_raw_inspection(&records, INSPECT_LIMIT)),
                "2" => {
                    if let Some(loaded) = load_from_csv(args, &source)? {
                        records = loaded;
                        report_load(&records);
                    }
                }
                "3" => {
                    let batch =
                        pipeline::run_batch(&records, &harmonizer, forecaster.as_mut(), &config);
                    for (record, prediction) in records.iter().zip(&batch.results) {
                        print!("{}", report::format_prediction_block(record, prediction));
                    }
                    print!("{}", report::format_run_summary(&batch));
                    last_analysis = Some((records.clone(), batch));
                }
                "4" => update_settings(&config)?,
                "5" => export_last_report(&last_analysis)?,
                "6" => break,
                _ => println!(" [X] Invalid option."),
            }
        }
    }

    println!("\n=== SESSION CLOSED ===");
    Ok(())
}

fn print_header() {
    println!("==================================================");
    println!("    ops-forecast - predictive record analysis");
    println!("==================================================");
}

fn print_menu(has_data: bool) {
    println!();
    if !has_data {
        println!("STATUS: waiting for data");
        println!("  [1] Load records from CSV");
        println!("  [2] Generate demo batch");
        println!("  [3] Quit");
    } else {
        println!("STATUS: data in memory");
        println!("  [1] Inspect raw records (top {INSPECT_LIMIT})");
        println!("  [2] Reload records");
        println!("  [3] Run analysis");
        println!("  [4] Update settings");
        println!("  [5] Export last report");
        println!("  [6] Quit");
    }
}

/// Load from the flag-provided CSV, or prompt for a path.
///
/// Returns `Ok(None)` when the user cancels. An unreadable file is not an
/// error here — ingestion logs it and yields an empty batch, and the menu
/// simply stays in the no-data state.
fn load_from_csv(args: &RunArgs, source: &CsvRecordSource) -> Result<Option<Vec<RawRecord>>, AppError> {
    let path: PathBuf = match &args.file {
        Some(path) => path.clone(),
        None => {
            let Some(input) = prompt_line("CSV path (empty to cancel): ")? else {
                return Ok(None);
            };
            if input.is_empty() {
                return Ok(None);
            }
            PathBuf::from(input)
        }
    };

    Ok(Some(source.load(&path.to_string_lossy())))
}

fn load_demo(args: &RunArgs) -> Vec<RawRecord> {
    generate_demo_records(args.demo_count, args.seed.unwrap_or(DEFAULT_DEMO_SEED))
}

fn report_load(records: &[RawRecord]) {
    if records.is_empty() {
        println!(" [!] Source is empty - nothing was loaded.");
    } else {
        println!(" [OK] {} record(s) in memory.", records.len());
    }
}

/// One settings round: growth factor, then pacing delay.
///
/// Empty input keeps the current value. Each submitted value results in
/// exactly one setter call on the shared store; a rejected growth factor
/// leaves the prior configuration in place.
fn update_settings(config: &SharedConfig) -> Result<(), AppError> {
    let current = config.snapshot();
    println!(
        "Current settings: growth_factor={} | delay_ms={}",
        current.growth_factor, current.simulated_delay_ms
    );

    if let Some(input) = prompt_line("New growth factor (empty to keep): ")? {
        if !input.is_empty() {
            match input.parse::<f64>() {
                Ok(value) => {
                    if config.set_growth_factor(value) {
                        println!(" [OK] Growth factor set to {value}x.");
                    } else {
                        println!(" [X] Rejected: growth factor must be >= 0. Keeping previous value.");
                    }
                }
                Err(_) => println!(" [X] Not a number: {input}"),
            }
        }
    }

    if let Some(input) = prompt_line("New delay in ms (empty to keep): ")? {
        if !input.is_empty() {
            match input.parse::<u64>() {
                Ok(ms) => {
                    config.set_simulated_delay(ms);
                    println!(" [OK] Delay set to {ms}ms.");
                }
                Err(_) => println!(" [X] Not a non-negative integer: {input}"),
            }
        }
    }

    Ok(())
}

fn export_last_report(last_analysis: &Option<(Vec<RawRecord>, BatchResult)>) -> Result<(), AppError> {
    let Some((records, batch)) = last_analysis else {
        println!(" [!] No analysis to export yet - run one first.");
        return Ok(());
    };

    let path = default_report_path();
    write_report_txt(&path, records, &batch.results)?;
    println!(" [OK] Report saved to {}.", path.display());
    Ok(())
}

/// Print a prompt and read one trimmed line; `None` means stdin closed.
fn prompt_line(prompt: &str) -> Result<Option<String>, AppError> {
    print!("{prompt}");
    io::stdout()
        .flush()
        .map_err(|e| AppError::usage(format!("Failed to write prompt: {e}")))?;

    let mut input = String::new();
    let bytes = io::stdin()
        .read_line(&mut input)
        .map_err(|e| AppError::usage(format!("Failed to read input: {e}")))?;

    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

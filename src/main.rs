/*!
# Autodiary - A Gap-Free Personal Diary

This file contains the main application flow: it sets up logging, loads the
configuration, and dispatches each subcommand to the library operations.

## Usage

```text
autodiary [OPTIONS] <COMMAND>

Commands:
  init           Create an empty diary table
  update         Record today's entry, catching up on any missed days first
  status         Show the last entry and any missing days
  search         Find entries whose summary mentions a keyword
  stats          Show totals and write the statistics report for every complete year
  year           Show the statistics of a single year
  import         Summarize a headerless export file and optionally write it as a new diary
  scrub          Remove a piece of text from every summary
  rename-person  Find and replace text inside people's names

Options:
  -v, --verbose              Enable debug logging
      --log-format <FORMAT>  Log output format [default: text] [possible values: text, json]
```

## Configuration

- `AUTODIARY_DIR`: Directory holding the diary table (defaults to ~/Documents/diary)
- `AUTODIARY_FILE`: File name of the diary table (defaults to diary-data.csv)
- `AUTODIARY_REPORTS_DIR`: Directory for report files (defaults to AUTODIARY_DIR)
- `AUTODIARY_PARTIAL_YEAR`: Year excluded from statistics as incomplete
*/

use autodiary::cli::{CliArgs, Command};
use autodiary::config::Config;
use autodiary::constants::{
    DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
    VERBOSE_LOG_LEVEL,
};
use autodiary::diary_core::format_table_date;
use autodiary::errors::AppResult;
use autodiary::ops::{self, YearStatistics};
use autodiary::prompt::TerminalPrompt;
use autodiary::store::DiaryStore;
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use std::fs;
use std::path::Path;
use std::process;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

fn main() {
    let args = CliArgs::parse();
    init_tracing(args.verbose, &args.log_format);

    let correlation_id = Uuid::new_v4().to_string();
    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    debug!("CLI arguments: {:?}", args);

    if let Err(e) = run(args.command) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Initializes the tracing subscriber on stderr.
///
/// `RUST_LOG` takes precedence over the level implied by `--verbose`.
fn init_tracing(verbose: bool, log_format: &str) {
    let default_level = if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .with_target(false);

    if log_format == LOG_FORMAT_JSON {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Loads configuration and runs one subcommand.
fn run(command: Command) -> AppResult<()> {
    let config = Config::load()?;
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let local_today = Local::now().date_naive();

    match command {
        Command::Init => init(&config),
        Command::Update { today } => update(&config, today.unwrap_or(local_today)),
        Command::Status { today } => status(&config, today.unwrap_or(local_today)),
        Command::Search { keyword } => search(&config, &keyword),
        Command::Stats { json, today } => stats(&config, json, today.unwrap_or(local_today)),
        Command::Year { year, json } => show_year(&config, year, json),
        Command::Import { file, write } => import(&file, write.as_deref()),
        Command::Scrub { text } => {
            let mut store = DiaryStore::load(&config.table_path())?;
            let changed = store.remove_from_summaries(&text)?;
            println!("Removed '{}' from {} summaries", text, changed);
            Ok(())
        }
        Command::RenamePerson { find, replace } => {
            let mut store = DiaryStore::load(&config.table_path())?;
            let changed = store.rename_person(&find, &replace)?;
            println!("Renamed '{}' to '{}' in {} entries", find, replace, changed);
            Ok(())
        }
    }
}

fn init(config: &Config) -> AppResult<()> {
    fs::create_dir_all(&config.diary_dir)?;
    let store = DiaryStore::create(&config.table_path())?;
    println!("Created an empty diary at {}", store.path().display());
    Ok(())
}

fn update(config: &Config, today: NaiveDate) -> AppResult<()> {
    let mut store = DiaryStore::load(&config.table_path())?;
    let mut prompt = TerminalPrompt::stdio();
    let report = ops::update_diary(&mut store, &mut prompt, today)?;

    if report.already_up_to_date {
        println!("Today's entry is already recorded.");
        return Ok(());
    }
    for date in &report.recorded {
        println!("Recorded {}", format_table_date(*date));
    }
    if report.skipped_today {
        println!("Caught up; today was skipped.");
    }
    Ok(())
}

fn status(config: &Config, today: NaiveDate) -> AppResult<()> {
    let store = DiaryStore::load(&config.table_path())?;
    let status = ops::diary_status(&store, today)?;

    println!("Entries: {}", store.len());
    match status.last_date {
        Some(last) => println!("Last entry: {}", format_table_date(last)),
        None => println!("Last entry: none"),
    }
    println!("Missing days: {}", status.missing.len());
    for date in &status.missing {
        println!("  {}", format_table_date(*date));
    }
    println!(
        "Today recorded: {}",
        if status.today_recorded { "yes" } else { "no" }
    );
    Ok(())
}

fn search(config: &Config, keyword: &str) -> AppResult<()> {
    let store = DiaryStore::load(&config.table_path())?;
    let matches = ops::search(&store, keyword);

    if matches.is_empty() {
        println!("No results");
        return Ok(());
    }

    for entry in &matches {
        println!(
            "{}: {}",
            format_table_date(entry.date),
            entry.summary.as_deref().unwrap_or_default()
        );
    }
    if let Some(path) = ops::write_search_report(&config.reports_dir, keyword, &matches)? {
        println!("{} results written to {}", matches.len(), path.display());
    }
    Ok(())
}

fn stats(config: &Config, json: bool, today: NaiveDate) -> AppResult<()> {
    let store = DiaryStore::load(&config.table_path())?;
    let summary = ops::summarize(&store, today.year(), config.partial_year);

    if summary.years.is_empty() {
        info!("No complete years yet, statistics report not written");
    } else {
        let path = ops::write_statistics_report(&config.reports_dir, &summary.years)?;
        debug!("Statistics report at {:?}", path);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Total entries: {}", summary.totals.entries);
        println!("Total recordings: {}", summary.totals.recordings);
        println!("Total length: {}", summary.totals.total_duration);
        if !summary.years.is_empty() {
            println!(
                "Statistics for {} complete years written to {}",
                summary.years.len(),
                config.reports_dir.display()
            );
        }
    }
    Ok(())
}

fn show_year(config: &Config, year: i32, json: bool) -> AppResult<()> {
    let store = DiaryStore::load(&config.table_path())?;
    let stats = ops::aggregate(&store, year);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_year(&stats);
    }
    Ok(())
}

fn print_year(stats: &YearStatistics) {
    let mean = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v));

    println!("{} ({} entries)", stats.year, stats.entries);
    println!("Mean happiness: {}", mean(stats.mean_happiness));
    println!("Months:");
    for rank in &stats.months {
        println!("  {:<10} {}", rank.label, mean(rank.mean));
    }
    println!("Weekdays:");
    for rank in &stats.weekdays {
        println!("  {:<10} {}", rank.label, mean(rank.mean));
    }
    println!("People:");
    for person in &stats.people {
        println!("  {:<24} {}", person.name, person.mentions);
    }
}

fn import(file: &Path, write: Option<&Path>) -> AppResult<()> {
    let imported = ops::import_csv(file)?;

    println!("Imported {} entries", imported.len());
    for (year, entries) in imported.by_year() {
        println!("  {}: {} entries", year, entries.len());
    }
    let duplicates = imported.duplicates();
    if !duplicates.is_empty() {
        println!("Duplicated dates: {}", duplicates.len());
        for date in &duplicates {
            println!("  {}", format_table_date(*date));
        }
    }

    if let Some(path) = write {
        let store = imported.write_store(path)?;
        println!("Wrote {} entries to {}", store.len(), store.path().display());
    }
    Ok(())
}

use serde::Serialize;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::analyzers::{
    group_extremes, latest_year, raw_view, year_snapshot, DashboardReport, IndexSummary,
};
use crate::cli::args::{Cli, Commands, OutputFormat};
use crate::config::DashboardConfig;
use crate::error::{AnalysisError, Result};
use crate::models::{CleaningRule, Table};
use crate::readers::{DatasetCache, DatasetReader};
use crate::utils::format::{format_signed_percent, format_thousands};
use crate::utils::progress::ProgressReporter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when run() is called twice in one process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn load_table(input: &Path, rule: CleaningRule, silent: bool) -> Result<Table> {
    let message = format!("Loading {}...", input.display());
    let progress = ProgressReporter::new_spinner(&message, silent);
    let table = DatasetReader::new(rule).load(input)?;
    progress.finish_and_clear();
    Ok(table)
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let output = match cli.command {
        Commands::Report { config, format } => report(config.as_deref(), format)?,
        Commands::Groups {
            input,
            group_column,
            value_column,
            rule,
            period,
            format,
        } => groups(&input, &group_column, &value_column, rule, period.as_deref(), format)?,
        Commands::Index {
            input,
            period,
            base_year,
            format,
        } => index(&input, &period, base_year, format)?,
        Commands::Snapshot {
            input,
            group_column,
            year,
            rule,
            format,
        } => snapshot(&input, &group_column, year, rule, format)?,
        Commands::Show {
            input,
            rule,
            columns,
            sort_by,
            limit,
        } => show(&input, rule, &columns, &sort_by, limit)?,
    };

    println!("{}", output.trim_end());
    Ok(())
}

fn report(config: Option<&Path>, format: OutputFormat) -> Result<String> {
    let config = DashboardConfig::load(config)?;
    debug!("Using configuration: {:?}", config);

    let progress =
        ProgressReporter::new_spinner("Loading datasets...", format == OutputFormat::Json);
    let mut cache = DatasetCache::with_delimiter(config.delimiter_byte()?);
    let report = DashboardReport::build(&config, &mut cache)?;
    progress.finish_and_clear();

    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Text => report.summary(),
    }
}

fn groups(
    input: &Path,
    group_column: &str,
    value_column: &str,
    rule: CleaningRule,
    period: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let mut table = load_table(input, rule, format == OutputFormat::Json)?;
    if let Some(period) = period {
        table = table.filter_period(period)?;
    }

    let report = group_extremes(&table, group_column, value_column)?;
    if format == OutputFormat::Json {
        return to_json(&report);
    }

    let mut out = format!(
        "{} groups by {} ({} rows, {} rule)\n",
        report.len(),
        group_column,
        table.len(),
        table.rule()
    );
    for group in &report {
        let growth = match group.growth_percent() {
            Ok(growth) => format_signed_percent(growth),
            Err(AnalysisError::Division) => "n/a".to_string(),
            Err(e) => return Err(e),
        };
        out.push_str(&format!(
            "- {}: latest {} ({}), earliest {} ({}), change {}, ",
            group.group,
            format_thousands(group.latest, 2),
            group.latest_year,
            format_thousands(group.earliest, 2),
            group.earliest_year,
            growth
        ));
        out.push_str(&format!(
            "max {} in {}, min {} in {}\n",
            format_thousands(group.max, 2),
            group.year_of_max,
            format_thousands(group.min, 2),
            group.year_of_min
        ));
    }
    Ok(out)
}

fn index(input: &Path, period: &str, base_year: i32, format: OutputFormat) -> Result<String> {
    let table = load_table(input, CleaningRule::Coercive, format == OutputFormat::Json)?
        .filter_period(period)?;
    let summary = IndexSummary::from_table(&table, base_year)?;

    match format {
        OutputFormat::Json => to_json(&summary),
        OutputFormat::Text => summary.summary(),
    }
}

fn snapshot(
    input: &Path,
    group_column: &str,
    year: Option<i32>,
    rule: CleaningRule,
    format: OutputFormat,
) -> Result<String> {
    let table = load_table(input, rule, format == OutputFormat::Json)?;
    let year = year.or_else(|| latest_year(&table)).ok_or_else(|| {
        AnalysisError::InvalidFormat(format!("{} has no data rows", input.display()))
    })?;

    let snapshot = year_snapshot(&table, group_column, year)?;
    if format == OutputFormat::Json {
        return to_json(&snapshot);
    }

    let mut out = format!("{} by {} in {}:\n", table.origin(), group_column, year);
    for entry in &snapshot {
        out.push_str(&format!(
            "{:>3}. {} {}\n",
            entry.rank,
            entry.group,
            format_thousands(entry.value, 2)
        ));
    }
    Ok(out)
}

fn show(
    input: &Path,
    rule: CleaningRule,
    columns: &[String],
    sort_by: &[String],
    limit: usize,
) -> Result<String> {
    let table = load_table(input, rule, false)?;
    let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
    let sort_by: Vec<&str> = sort_by.iter().map(String::as_str).collect();

    let view = raw_view(&table, &columns, &sort_by)?;
    Ok(view.render(limit))
}

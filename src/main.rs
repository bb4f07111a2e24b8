//! sales-dash: print the dashboard's chart views for a dataset and selection.
//!
//! Records come from `--data`, the config file's `[data] path`, or the
//! bundled sample. The initial selection is the config's lookback window
//! ending today; `--start`, `--end` and `--category` override it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;

use sales_dash::config::DashboardConfig;
use sales_dash::data::loader;
use sales_dash::data::model::{parse_iso_date, CategorySelection, FilterCriteria};
use sales_dash::state::DashboardState;
use sales_dash::DashboardError;

/// Sales analytics dashboard: filter sales records and print chart views as JSON
#[derive(Parser, Debug)]
#[command(name = "sales-dash", version, about)]
struct Args {
    /// Path to TOML configuration file (default: ./sales-dash.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON or CSV dataset (default: config `[data] path`, else bundled sample)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// First day of the range, YYYY-MM-DD (inclusive)
    #[arg(short, long)]
    start: Option<String>,

    /// Last day of the range, YYYY-MM-DD (inclusive)
    #[arg(short, long)]
    end: Option<String>,

    /// Category to show, or "All"
    #[arg(short = 'k', long)]
    category: Option<String>,

    /// Reference date for the default range (default: today)
    #[arg(long)]
    today: Option<String>,

    /// Print label/value chart projections instead of view models
    #[arg(long)]
    charts: bool,

    /// Print category selector options and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config =
        DashboardConfig::load_or_default(args.config.as_deref()).context("loading configuration")?;

    let records = match args.data.as_ref().or(config.data.path.as_ref()) {
        Some(path) => loader::load_file(path)?,
        None => {
            log::info!("No dataset given, using bundled sample");
            loader::sample_records()?
        }
    };

    let criteria = resolve_criteria(&args, &config)?;
    log::info!("Selection: {} / {}", criteria.range, criteria.category);

    let mut state = DashboardState::new(criteria);
    let refreshed = state.set_records(records).map(|_| ());

    // Selector options only need the records, not a valid selection.
    if args.list_categories {
        let options = state.category_options(&config.filter.categories);
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    if let Err(e) = refreshed {
        log::error!("Failed to build views: {e}");
        return Err(e).context("building chart views");
    }

    let Some(views) = state.views() else {
        anyhow::bail!("no views available");
    };
    let json = if args.charts {
        serde_json::to_string_pretty(&views.charts())?
    } else {
        serde_json::to_string_pretty(views)?
    };
    println!("{json}");

    log::info!(
        "{} records loaded, {} visible",
        state.records().len(),
        state.visible_count()
    );
    Ok(())
}

/// Config defaults with command-line overrides applied.
fn resolve_criteria(args: &Args, config: &DashboardConfig) -> Result<FilterCriteria> {
    let today = match &args.today {
        Some(s) => parse_arg_date("today", s)?,
        None => Local::now().date_naive(),
    };

    let mut criteria = config.default_criteria(today);
    if let Some(s) = &args.start {
        criteria.range.start = parse_arg_date("start", s)?;
    }
    if let Some(s) = &args.end {
        criteria.range.end = parse_arg_date("end", s)?;
    }
    if let Some(category) = &args.category {
        criteria.category = CategorySelection::from_selector(category);
    }
    Ok(criteria)
}

fn parse_arg_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    parse_iso_date(value).ok_or_else(|| {
        DashboardError::InvalidCriteria {
            field,
            value: value.to_string(),
        }
        .into()
    })
}

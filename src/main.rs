//! # Cabin-dl CLI
//!
//! Command-line interface for the cabin-dl library.
//! Fetches the DNT cabin list, exports it and prints a few statistics.

use std::path::PathBuf;

use cabin_dl::{ApiConfig, CabinTable, Column, PipelineOptions, PipelineReport, Result, SortOrder};
use clap::Parser;
use log::error;

mod cli;

/// Command-line interface for cabin-dl
#[derive(Parser)]
#[command(name = "cabin-dl")]
#[command(about = "Downloads the DNT cabin list from ut.no and exports it as CSV, GPX and web maps")]
#[command(long_about = "Downloads the DNT cabin list from ut.no and exports it:
  cabin-dl                         # Fetch all pages into ./data/ and export
  cabin-dl --offline               # Reuse the page dumps already in ./data/
  cabin-dl --data-dir ~/hytter     # Use another data directory

Outputs (inside the data directory):
  hytter_<n>.json                  # Raw API pages
  alle_hytter.csv                  # Cabins with overnight stay, sorted by area
  map_norway.html                  # Web map of all of Norway
  map_vestlandet.html              # Web map of western Norway
  points.gpx                       # One waypoint per cabin")]
#[command(version = env!("CABIN_DL_VERSION"))]
struct Cli {
    /// Directory for page dumps and exports
    #[arg(long, default_value = cabin_dl::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Skip the API and reuse the page dumps in the data directory
    #[arg(long)]
    offline: bool,

    /// Cabins requested per page
    #[arg(long, default_value_t = cabin_dl::DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Stop with an error if the server reports more pages than this
    #[arg(long, default_value_t = cabin_dl::DEFAULT_MAX_PAGES)]
    max_pages: usize,

    /// GraphQL endpoint
    #[arg(long, default_value = cabin_dl::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// User-Agent header sent to the API
    #[arg(long, default_value = cabin_dl::DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Per-request timeout in seconds (no timeout if unset)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Number of areas shown in the region statistics
    #[arg(long, default_value_t = 20)]
    top: usize,

    /// Only print statistics for this column (repeatable): serviceLevel,
    /// areaName, dntCabin, ownername, dntKey
    #[arg(long = "column", value_name = "NAME")]
    columns: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("❌ Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let default_filter = if cli.verbose { "warn,cabin_dl=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    if cli.verbose {
        eprintln!("🏔️  Cabin-dl v{} starting...", env!("CABIN_DL_VERSION"));
    }

    let columns = if cli.columns.is_empty() {
        Column::ALL.to_vec()
    } else {
        cli.columns
            .iter()
            .map(|name| name.parse::<Column>())
            .collect::<Result<Vec<Column>>>()?
    };

    let progress = if cli.offline {
        eprintln!("📂 Reusing cached pages in {}", cli.data_dir.display());
        None
    } else {
        Some(cli::ProgressManager::new(&format!(
            "🌐 Fetching cabins from {}",
            cli.endpoint
        )))
    };

    let options = PipelineOptions {
        data_dir: cli.data_dir.clone(),
        offline: cli.offline,
        api: ApiConfig {
            endpoint: cli.endpoint.clone(),
            page_size: cli.page_size,
            user_agent: cli.user_agent.clone(),
            max_pages: cli.max_pages,
            timeout_secs: cli.timeout_secs,
            ..Default::default()
        },
        progress: progress.as_ref().map(|p| p.callback()),
        ..Default::default()
    };

    let result = cabin_dl::run(&options).await;
    if let Some(progress) = &progress {
        progress.finish();
    }
    let report = result?;

    print_summary(&report);
    print_statistics(&report.table, &columns, cli.top);

    Ok(())
}

/// What was fetched and written
fn print_summary(report: &PipelineReport) {
    if let Some(fetch) = &report.fetch {
        eprintln!("✅ Fetched {} cabins in {} pages", fetch.edges, fetch.pages);
    }
    eprintln!(
        "🏠 {} of {} cabins offer an overnight stay",
        report.table.len(),
        report.loaded
    );

    let exports = &report.exports;
    eprintln!("📁 {} ({} rows)", exports.listing.display(), exports.listing_rows);
    for map in &exports.maps {
        eprintln!("📁 {}", map.display());
    }
    eprintln!(
        "📁 {} ({} waypoints)",
        exports.waypoints.display(),
        exports.waypoint_count
    );
}

/// Frequency tables over the kept cabins
fn print_statistics(table: &CabinTable, columns: &[Column], top: usize) {
    for &column in columns {
        let mut counts = table.value_counts(column, SortOrder::Descending);
        if column == Column::AreaName {
            counts = counts.head(top);
        }
        println!("\n## {} ({column})\n", section_title(column));
        print!("{counts}");
    }
}

fn section_title(column: Column) -> &'static str {
    match column {
        Column::ServiceLevel => "Service level",
        Column::AreaName => "Region",
        Column::DntCabin => "Owned by DNT",
        Column::OwnerName => "Owner",
        Column::DntKey => "DNT key needed",
    }
}

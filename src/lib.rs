//! # Cabin-dl Library
//!
//! Downloads the cabin list of the Norwegian Trekking Association (DNT) from the
//! ut.no GraphQL API and turns it into files you can use on a hike.
//!
//! ## Features
//!
//! - **Paginated fetching**: every page is dumped as-is into a data directory
//! - **Offline mode**: rerun the pipeline on the cached page dumps
//! - **Overnight filter**: drops emergency shelters, food-service-only and closed cabins
//! - **Exports**: CSV listing sorted by area, two Leaflet web maps, GPX waypoints
//! - **Reports**: frequency tables over service level, area, owner and key requirement
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Fetch, filter and export into ./data/
//!     let report = cabin_dl::run(&cabin_dl::PipelineOptions::default()).await?;
//!     println!("{} of {} cabins kept", report.table.len(), report.loaded);
//!     Ok(())
//! }
//! ```
//!
//! ## Working on cached pages
//!
//! ```rust,no_run
//! use cabin_dl::{CabinTable, Column, SortOrder};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let edges = cabin_dl::load_edges(Path::new("./data/"))?;
//! let table = CabinTable::from_edges(&edges).retain_overnight();
//! print!("{}", table.value_counts(Column::AreaName, SortOrder::Descending).head(20));
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

// Re-export core types that users might need
pub use crate::core::error::{Error, Result};
pub use crate::core::fetcher::{page_file_name, FetchSummary, Fetcher, Page, ProgressCallback};
pub use crate::core::filter::{is_overnight_service_level, EXCLUDED_SERVICE_LEVELS};
pub use crate::core::loader::{load_edges, read_page_file};
pub use crate::core::page::{Edge, PageResponse};
pub use crate::core::query::{
    ApiConfig, DEFAULT_ENDPOINT, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE, DEFAULT_USER_AGENT,
};
pub use crate::core::record::CabinRecord;
pub use crate::core::report::{Column, CountTable, SortOrder};
pub use crate::core::table::CabinTable;

// Internal modules
mod core;

pub mod export;

use crate::export::MapView;

/// Where cached pages and exports live unless told otherwise
pub const DEFAULT_DATA_DIR: &str = "./data/";

/// Options for a full pipeline run
pub struct PipelineOptions {
    /// Directory holding page dumps and exports
    pub data_dir: PathBuf,

    /// Skip the network fetch and reuse the page dumps already in `data_dir`
    pub offline: bool,

    /// API settings for the fetch stage
    pub api: ApiConfig,

    /// Map views to render
    pub map_views: Vec<MapView>,

    /// Optional fetch progress callback
    pub progress: Option<ProgressCallback>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            offline: false,
            api: ApiConfig::default(),
            map_views: export::DEFAULT_VIEWS.to_vec(),
            progress: None,
        }
    }
}

/// Files written by [`export_all`]
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub listing: PathBuf,
    pub listing_rows: usize,
    pub maps: Vec<PathBuf>,
    pub waypoints: PathBuf,
    pub waypoint_count: usize,
}

/// Outcome of a full pipeline run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// `None` when the run reused cached pages
    pub fetch: Option<FetchSummary>,

    /// Cabins loaded before filtering
    pub loaded: usize,

    /// Cabins kept after filtering
    pub table: CabinTable,

    pub exports: ExportSummary,
}

/// Fetches all pages into `data_dir` and drops dumps left over from longer runs
pub async fn fetch(
    api: &ApiConfig,
    data_dir: &Path,
    progress: Option<&ProgressCallback>,
) -> Result<FetchSummary> {
    let fetcher = Fetcher::with_config(api.clone())?;
    let summary = fetcher.fetch_to_dir(data_dir, progress).await?;

    for stale in crate::core::loader::stale_page_files(data_dir, summary.pages)? {
        warn!("removing stale page dump {}", stale.display());
        fs::remove_file(&stale)?;
    }

    Ok(summary)
}

/// Loads every cached page in `data_dir` into a normalized table
pub fn load_table(data_dir: &Path) -> Result<CabinTable> {
    let edges = load_edges(data_dir)?;
    Ok(CabinTable::from_edges(&edges))
}

/// Writes the CSV listing, the web maps and the GPX file into `data_dir`
pub fn export_all(table: &CabinTable, data_dir: &Path, views: &[MapView]) -> Result<ExportSummary> {
    fs::create_dir_all(data_dir)?;

    let listing = data_dir.join(export::LISTING_FILE);
    let listing_rows = export::write_listing(table, &listing)?;
    info!("wrote {} rows to {}", listing_rows, listing.display());

    let maps = export::write_maps(table, data_dir, views)?;
    for map in &maps {
        info!("wrote map {}", map.display());
    }

    let waypoints = data_dir.join(export::WAYPOINTS_FILE);
    let waypoint_count = export::write_waypoints(table, &waypoints)?;
    info!("wrote {} waypoints to {}", waypoint_count, waypoints.display());

    Ok(ExportSummary {
        listing,
        listing_rows,
        maps,
        waypoints,
        waypoint_count,
    })
}

/// Runs fetch (unless offline), load, filter and export
pub async fn run(options: &PipelineOptions) -> Result<PipelineReport> {
    let fetch_summary = if options.offline {
        info!("offline: reusing cached pages in {}", options.data_dir.display());
        None
    } else {
        Some(fetch(&options.api, &options.data_dir, options.progress.as_ref()).await?)
    };

    let all = load_table(&options.data_dir)?;
    let loaded = all.len();
    let table = all.retain_overnight();
    info!("{} of {} cabins offer an overnight stay", table.len(), loaded);

    let exports = export_all(&table, &options.data_dir, &options.map_views)?;

    Ok(PipelineReport {
        fetch: fetch_summary,
        loaded,
        table,
        exports,
    })
}

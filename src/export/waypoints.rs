//! GPX waypoint export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use geo_types::Point;
use gpx::{Gpx, GpxVersion, Waypoint};

use crate::core::error::Result;
use crate::core::table::CabinTable;

/// Default GPX file name inside the data directory
pub const WAYPOINTS_FILE: &str = "points.gpx";

const CREATOR: &str = concat!("cabin-dl/", env!("CABIN_DL_VERSION"));

/// One waypoint per cabin, named after it, with its elevation
pub fn build_gpx(table: &CabinTable) -> Gpx {
    let waypoints = table
        .records()
        .iter()
        .map(|record| {
            // GPX points are (x = longitude, y = latitude)
            let mut waypoint = Waypoint::new(Point::new(record.longitude, record.latitude));
            waypoint.elevation = Some(record.height);
            waypoint.name = Some(record.name.clone());
            waypoint
        })
        .collect();

    Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(CREATOR.to_string()),
        waypoints,
        ..Default::default()
    }
}

/// Writes the waypoint file to `path`, returning the number of waypoints
pub fn write_waypoints(table: &CabinTable, path: &Path) -> Result<usize> {
    let mut writer = BufWriter::new(File::create(path)?);
    let count = write_gpx(table, &mut writer)?;
    writer.flush()?;
    Ok(count)
}

/// Serializes the waypoint document into `writer`
pub fn write_gpx<W: Write>(table: &CabinTable, writer: W) -> Result<usize> {
    let gpx = build_gpx(table);
    gpx::write(&gpx, writer)?;
    Ok(gpx.waypoints.len())
}

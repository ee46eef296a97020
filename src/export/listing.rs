//! CSV listing of all cabins, sorted by area

use std::io::Write;
use std::path::Path;

use crate::core::error::Result;
use crate::core::report::format_bool;
use crate::core::table::CabinTable;

/// Default listing file name inside the data directory
pub const LISTING_FILE: &str = "alle_hytter.csv";

/// First column is the row index and has no name
const HEADER: [&str; 14] = [
    "",
    "id",
    "name",
    "serviceLevel",
    "dntCabin",
    "ownername",
    "latitude",
    "longitude",
    "height",
    "areaName",
    "dntKey",
    "bedsStaffed",
    "bedsNoService",
    "bedsSelfService",
];

/// Writes the listing to `path`, returning the number of rows
pub fn write_listing(table: &CabinTable, path: &Path) -> Result<usize> {
    let writer = csv::Writer::from_path(path)?;
    write_rows(table, writer)
}

/// Writes the listing to any writer, returning the number of rows
pub fn write_rows<W: Write>(table: &CabinTable, mut writer: csv::Writer<W>) -> Result<usize> {
    writer.write_record(HEADER)?;

    let sorted = table.sorted_by_area();
    for record in &sorted {
        writer.write_record([
            record.index.to_string(),
            record.id.clone(),
            record.name.clone(),
            record.service_level.clone(),
            format_bool(record.dnt_cabin).to_string(),
            record.owner_name.clone(),
            record.latitude.to_string(),
            record.longitude.to_string(),
            record.height.to_string(),
            record.area_name.clone(),
            record.dnt_key.clone(),
            record.beds_staffed.to_string(),
            record.beds_no_service.to_string(),
            record.beds_self_service.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(sorted.len())
}

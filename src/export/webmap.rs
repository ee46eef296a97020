//! Interactive web maps
//!
//! Each map is a standalone HTML document that loads Leaflet from a CDN and
//! places one marker per cabin. Marker data is embedded as JSON and inserted as
//! text nodes, so cabin names never end up parsed as markup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::error::Result;
use crate::core::table::CabinTable;

/// Center and zoom of one rendered map
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub title: &'static str,
    pub file_name: &'static str,
    pub center: (f64, f64),
    pub zoom: u8,
}

/// The whole country
pub const NORWAY: MapView = MapView {
    title: "Norway",
    file_name: "map_norway.html",
    center: (60.472, 8.468),
    zoom: 6,
};

/// Western Norway, where most cabins are
pub const VESTLANDET: MapView = MapView {
    title: "Vestlandet",
    file_name: "map_vestlandet.html",
    center: (60.170, 6.971),
    zoom: 8,
};

pub const DEFAULT_VIEWS: [MapView; 2] = [NORWAY, VESTLANDET];

#[derive(Serialize)]
struct Marker<'a> {
    lat: f64,
    lon: f64,
    popup: &'a str,
    tooltip: String,
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<title>{{TITLE}}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map").setView([{{LAT}}, {{LON}}], {{ZOOM}});
L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
  maxZoom: 19,
  attribution: "&copy; OpenStreetMap contributors"
}).addTo(map);
var markers = {{MARKERS}};
markers.forEach(function (m) {
  L.marker([m.lat, m.lon])
    .bindPopup(document.createTextNode(m.popup))
    .bindTooltip(document.createTextNode(m.tooltip))
    .addTo(map);
});
</script>
</body>
</html>
"#;

/// Tooltip text for a cabin at `height` meters
pub fn tooltip(height: f64) -> String {
    format!("Height: {height} meters")
}

/// Renders the HTML document for one view
pub fn render_map(table: &CabinTable, view: &MapView) -> Result<String> {
    let markers: Vec<Marker> = table
        .records()
        .iter()
        .map(|record| Marker {
            lat: record.latitude,
            lon: record.longitude,
            popup: &record.name,
            tooltip: tooltip(record.height),
        })
        .collect();

    // "</" inside a script block would close it early
    let markers_json = serde_json::to_string(&markers)?.replace("</", "<\\/");

    Ok(TEMPLATE
        .replace("{{TITLE}}", &format!("Cabins - {}", view.title))
        .replace("{{LAT}}", &view.center.0.to_string())
        .replace("{{LON}}", &view.center.1.to_string())
        .replace("{{ZOOM}}", &view.zoom.to_string())
        .replace("{{MARKERS}}", &markers_json))
}

/// Writes one HTML map per view into `dir`, returning the written paths
pub fn write_maps(table: &CabinTable, dir: &Path, views: &[MapView]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(views.len());
    for view in views {
        let path = dir.join(view.file_name);
        fs::write(&path, render_map(table, view)?)?;
        written.push(path);
    }
    Ok(written)
}

//! Flat cabin records
//!
//! Maps one API edge onto a fixed set of fields. Optional nested values
//! (area, opening hours, owner, bed counts) fall back to empty/zero defaults.

use crate::core::page::Edge;

/// One cabin, flattened for export
#[derive(Debug, Clone, PartialEq)]
pub struct CabinRecord {
    /// Position in the normalized sequence, kept through filtering and sorting
    pub index: usize,
    pub id: String,
    pub name: String,
    pub service_level: String,
    pub dnt_cabin: bool,
    pub owner_name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in meters
    pub height: f64,
    pub area_name: String,
    pub dnt_key: String,
    pub beds_staffed: u32,
    pub beds_no_service: u32,
    pub beds_self_service: u32,
}

impl CabinRecord {
    /// Normalizes one edge
    ///
    /// Coordinates arrive as `[lon, lat, elevation]`: element 1 becomes the
    /// latitude, element 0 the longitude, element 2 the height.
    pub fn from_edge(index: usize, edge: &Edge) -> Self {
        let node = &edge.node;
        let coords = node.geometry.coordinates();

        let area_name = node
            .areas
            .as_deref()
            .and_then(|areas| areas.first())
            .and_then(|area| area.name.clone())
            .unwrap_or_default();

        let dnt_key = node
            .opening_hours
            .as_deref()
            .and_then(|hours| hours.first())
            .and_then(|hours| hours.key.clone())
            .unwrap_or_default();

        Self {
            index,
            id: node.id.clone(),
            name: node.name.clone(),
            service_level: node.service_level.clone().unwrap_or_default(),
            dnt_cabin: node.dnt_cabin,
            owner_name: node
                .owner
                .as_ref()
                .and_then(|owner| owner.name.clone())
                .unwrap_or_default(),
            latitude: coords[1],
            longitude: coords[0],
            height: coords.get(2).copied().unwrap_or(0.0),
            area_name,
            dnt_key,
            beds_staffed: node.beds_staffed.unwrap_or(0),
            beds_no_service: node.beds_no_service.unwrap_or(0),
            beds_self_service: node.beds_self_service.unwrap_or(0),
        }
    }
}

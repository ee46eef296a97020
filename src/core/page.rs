//! Typed view of one `FindCabins` page response
//!
//! Only the fields the pipeline reads are modelled; everything else in the raw
//! page is ignored here and kept verbatim in the page dump.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::core::error::{Error, Result};

/// One page of the cabin search as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse {
    pub data: PageData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageData {
    #[serde(rename = "ntb_findCabins")]
    pub find_cabins: CabinConnection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CabinConnection {
    #[serde(default)]
    pub total_count: Option<u64>,
    pub page_info: PageInfo,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One entry of the result set, wrapping a single cabin
#[derive(Debug, Clone, Deserialize)]
pub struct Edge {
    pub node: CabinNode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CabinNode {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub service_level: Option<String>,
    pub dnt_cabin: bool,
    #[serde(default)]
    pub owner: Option<Owner>,
    pub geometry: Geometry,
    #[serde(default)]
    pub areas: Option<Vec<Area>>,
    #[serde(default)]
    pub opening_hours: Option<Vec<OpeningHours>>,
    #[serde(default)]
    pub beds_staffed: Option<u32>,
    #[serde(default)]
    pub beds_no_service: Option<u32>,
    #[serde(default)]
    pub beds_self_service: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Area {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub key: Option<String>,
}

/// GeoJSON point geometry: `[lon, lat]` or `[lon, lat, elevation]`
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawGeometry")]
pub struct Geometry {
    coordinates: Vec<f64>,
}

#[derive(Deserialize)]
struct RawGeometry {
    coordinates: Vec<f64>,
}

impl TryFrom<RawGeometry> for Geometry {
    type Error = String;

    fn try_from(raw: RawGeometry) -> std::result::Result<Self, Self::Error> {
        if raw.coordinates.len() < 2 {
            return Err(format!(
                "geometry needs at least 2 coordinates, got {}",
                raw.coordinates.len()
            ));
        }
        Ok(Self {
            coordinates: raw.coordinates,
        })
    }
}

impl Geometry {
    /// Raw coordinate triple as sent by the API
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }
}

/// Accepts ids sent either as JSON strings or numbers
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

impl PageResponse {
    /// Parses a raw page, keeping the raw value intact for dumping
    pub fn from_value(raw: &Value) -> Result<Self> {
        Self::deserialize(raw).map_err(Error::from)
    }

    pub fn page_info(&self) -> &PageInfo {
        &self.data.find_cabins.page_info
    }

    pub fn edges(&self) -> &[Edge] {
        &self.data.find_cabins.edges
    }

    pub fn into_edges(self) -> Vec<Edge> {
        self.data.find_cabins.edges
    }

    pub fn total_count(&self) -> Option<u64> {
        self.data.find_cabins.total_count
    }
}

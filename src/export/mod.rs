//! Output artifacts: CSV listing, web maps and GPX waypoints

pub mod listing;
pub mod waypoints;
pub mod webmap;

pub use listing::{write_listing, LISTING_FILE};
pub use waypoints::{write_waypoints, WAYPOINTS_FILE};
pub use webmap::{write_maps, MapView, DEFAULT_VIEWS};

//! Integration tests for cabin-dl
//!
//! The API is replaced by a local mock server, so these tests never touch
//! api.ut.no. Offline runs work on page dumps written into a temp directory.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::process::Command;

use cabin_dl::{ApiConfig, Error, PipelineOptions};
use serde_json::{json, Value};
use tempfile::tempdir;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERVICE_LEVELS: [&str; 6] = [
    "staffed",
    "self-service",
    "no-service",
    "closed",
    "emergency shelter",
    "food service",
];

const AREAS: [&str; 4] = ["Jotunheimen", "Finse", "Rondane", "Hardangervidda"];

fn edge(i: usize) -> Value {
    let owner = if i.is_multiple_of(3) {
        "DNT Oslo og Omegn"
    } else {
        "Bergen og Hordaland Turlag"
    };
    let opening_hours = if i.is_multiple_of(2) {
        json!([{"key": "dnt-key"}])
    } else {
        json!([])
    };
    let areas = if i.is_multiple_of(5) {
        json!([])
    } else {
        json!([{"name": AREAS[i % AREAS.len()]}])
    };
    let offset = i as f64 / 1000.0;

    json!({
        "node": {
            "id": format!("{i}"),
            "name": format!("Hytte {i}"),
            "serviceLevel": SERVICE_LEVELS[i % SERVICE_LEVELS.len()],
            "bedsStaffed": 10,
            "bedsNoService": 0,
            "bedsSelfService": 4,
            "dntCabin": true,
            "owner": {"name": owner},
            "openingHours": opening_hours,
            "geometry": {"type": "Point", "coordinates": [7.0 + offset, 60.0 + offset, 900 + i]},
            "areas": areas
        }
    })
}

fn page(range: std::ops::Range<usize>, has_next_page: bool, end_cursor: Option<&str>) -> Value {
    json!({
        "data": {
            "ntb_findCabins": {
                "totalCount": 645,
                "pageInfo": {"hasNextPage": has_next_page, "endCursor": end_cursor},
                "edges": range.map(edge).collect::<Vec<_>>()
            }
        }
    })
}

fn write_page(dir: &Path, number: usize, value: &Value) {
    fs::write(
        dir.join(cabin_dl::page_file_name(number)),
        serde_json::to_string_pretty(value).unwrap(),
    )
    .unwrap();
}

/// Cabins in `range` that offer an overnight stay
fn overnight_count(range: std::ops::Range<usize>) -> usize {
    range
        .filter(|i| {
            cabin_dl::is_overnight_service_level(SERVICE_LEVELS[i % SERVICE_LEVELS.len()])
        })
        .count()
}

fn assert_exports(dir: &Path, expected_rows: usize) {
    let mut reader = csv::Reader::from_path(dir.join("alle_hytter.csv")).unwrap();
    let areas: Vec<String> = reader
        .records()
        .map(|r| r.unwrap().get(9).unwrap().to_string())
        .collect();
    assert_eq!(areas.len(), expected_rows);
    assert!(areas.windows(2).all(|w| w[0] <= w[1]), "CSV not sorted by area");

    let file = File::open(dir.join("points.gpx")).unwrap();
    let gpx = gpx::read(BufReader::new(file)).unwrap();
    assert_eq!(gpx.waypoints.len(), expected_rows);

    assert!(dir.join("map_norway.html").exists());
    assert!(dir.join("map_vestlandet.html").exists());
}

#[tokio::test]
async fn test_full_pipeline_against_mock_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(
            json!({"variables": {"input": {"pageOptions": {"afterCursor": null}}}}),
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(0..500, true, Some("page-1"))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(
            json!({"variables": {"input": {"pageOptions": {"afterCursor": "page-1"}}}}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(500..645, false, None)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let options = PipelineOptions {
        data_dir: dir.path().to_path_buf(),
        api: ApiConfig {
            endpoint: server.uri(),
            ..Default::default()
        },
        ..Default::default()
    };

    let report = cabin_dl::run(&options).await.unwrap();

    let fetch = report.fetch.expect("fetch summary");
    assert_eq!(fetch.pages, 2);
    assert_eq!(fetch.edges, 645);
    assert_eq!(fetch.total_count, Some(645));
    assert!(dir.path().join("hytter_0.json").exists());
    assert!(dir.path().join("hytter_1.json").exists());

    assert_eq!(report.loaded, 645);
    assert_eq!(report.table.len(), overnight_count(0..645));
    assert_eq!(report.exports.listing_rows, report.table.len());
    assert_eq!(report.exports.waypoint_count, report.table.len());
    assert_exports(dir.path(), report.table.len());
}

#[tokio::test]
async fn test_offline_reuses_cached_pages() {
    let dir = tempdir().unwrap();
    write_page(dir.path(), 0, &page(0..500, true, Some("page-1")));
    write_page(dir.path(), 1, &page(500..645, false, None));

    let options = PipelineOptions {
        data_dir: dir.path().to_path_buf(),
        offline: true,
        // Unreachable endpoint: offline runs must not use it
        api: ApiConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        },
        ..Default::default()
    };

    let report = cabin_dl::run(&options).await.unwrap();
    assert!(report.fetch.is_none());
    assert_eq!(report.loaded, 645);
    assert!(report
        .table
        .records()
        .iter()
        .all(|r| cabin_dl::is_overnight_service_level(&r.service_level)));
    assert_exports(dir.path(), overnight_count(0..645));
}

#[tokio::test]
async fn test_offline_without_pages_fails() {
    let dir = tempdir().unwrap();
    let options = PipelineOptions {
        data_dir: dir.path().to_path_buf(),
        offline: true,
        ..Default::default()
    };

    match cabin_dl::run(&options).await {
        Err(Error::NoPageFiles(path)) => assert_eq!(path, dir.path()),
        other => panic!("Expected NoPageFiles, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_removes_stale_pages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0..10, false, None)))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    write_page(dir.path(), 1, &page(100..110, false, None));
    write_page(dir.path(), 2, &page(200..210, false, None));

    let api = ApiConfig {
        endpoint: server.uri(),
        ..Default::default()
    };
    let summary = cabin_dl::fetch(&api, dir.path(), None).await.unwrap();

    assert_eq!(summary.pages, 1);
    assert!(dir.path().join("hytter_0.json").exists());
    assert!(!dir.path().join("hytter_1.json").exists());
    assert!(!dir.path().join("hytter_2.json").exists());
    assert_eq!(cabin_dl::load_edges(dir.path()).unwrap().len(), 10);
}

#[tokio::test]
async fn test_non_json_page_stops_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html>down for maintenance</html>", "text/html"),
        )
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let options = PipelineOptions {
        data_dir: dir.path().to_path_buf(),
        api: ApiConfig {
            endpoint: server.uri(),
            ..Default::default()
        },
        ..Default::default()
    };

    let err = cabin_dl::run(&options).await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedContentType { page: 0, .. }), "{err}");
    assert!(!dir.path().join("alle_hytter.csv").exists());
}

#[test]
fn test_cli_offline_run() {
    let dir = tempdir().unwrap();
    write_page(dir.path(), 0, &page(0..60, false, None));

    let output = Command::new(env!("CARGO_BIN_EXE_cabin-dl"))
        .arg("--offline")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--top")
        .arg("3")
        .output()
        .expect("Failed to run cabin-dl");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "cabin-dl failed: {stderr}");

    assert!(stdout.contains("## Service level (serviceLevel)"), "{stdout}");
    assert!(stdout.contains("## Region (areaName)"));
    assert!(stdout.contains("## DNT key needed (dntKey)"));
    assert!(stderr.contains("Reusing cached pages"), "{stderr}");
    assert_exports(dir.path(), overnight_count(0..60));
}

#[test]
fn test_cli_offline_empty_dir_fails() {
    let dir = tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_cabin-dl"))
        .arg("--offline")
        .arg("--data-dir")
        .arg(dir.path())
        .output()
        .expect("Failed to run cabin-dl");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("No page files found"), "{stderr}");
}

#[test]
fn test_cli_selected_columns_only() {
    let dir = tempdir().unwrap();
    write_page(dir.path(), 0, &page(0..12, false, None));

    let output = Command::new(env!("CARGO_BIN_EXE_cabin-dl"))
        .arg("--offline")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--column")
        .arg("ownername")
        .output()
        .expect("Failed to run cabin-dl");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("## Owner (ownername)"), "{stdout}");
    assert!(stdout.contains("DNT Oslo og Omegn"));
    assert!(!stdout.contains("## Service level"));
    assert!(!stdout.contains("## Region"));
}

#[test]
fn test_cli_misspelled_column_suggests_name() {
    let dir = tempdir().unwrap();
    write_page(dir.path(), 0, &page(0..12, false, None));

    let output = Command::new(env!("CARGO_BIN_EXE_cabin-dl"))
        .arg("--offline")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--column")
        .arg("areaNmae")
        .output()
        .expect("Failed to run cabin-dl");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Did you mean 'areaName'?"), "{stderr}");
    assert!(!dir.path().join("alle_hytter.csv").exists());
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_cabin-dl"))
        .arg("--version")
        .output()
        .expect("Failed to run cabin-dl");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "{stdout}");
}

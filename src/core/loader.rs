//! Reads cached page dumps back from the data directory

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::core::error::{Error, Result};
use crate::core::page::{Edge, PageResponse};

/// File name prefix of page dumps (`hytter_<n>.json`)
pub const PAGE_PREFIX: &str = "hytter";

/// Lists the `.json` page files in `dir`, in page order
pub fn page_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort_by_cached_key(|path| page_sort_key(path));
    Ok(files)
}

/// Reads every page file in `dir` and concatenates their edges
pub fn load_edges(dir: &Path) -> Result<Vec<Edge>> {
    let files = page_files(dir)?;
    if files.is_empty() {
        return Err(Error::NoPageFiles(dir.to_path_buf()));
    }

    let mut combined = Vec::new();
    for file in &files {
        let edges = read_page_file(file)?.into_edges();
        debug!("{}: {} edges", file.display(), edges.len());
        combined.extend(edges);
    }
    Ok(combined)
}

/// Parses a single page dump
pub fn read_page_file(path: &Path) -> Result<PageResponse> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| Error::JsonError {
        file: Some(path.to_path_buf()),
        source,
    })
}

/// Page dumps numbered `keep` or higher, left over from an earlier, longer run
pub fn stale_page_files(dir: &Path, keep: usize) -> Result<Vec<PathBuf>> {
    Ok(page_files(dir)?
        .into_iter()
        .filter(|path| {
            page_number(path).is_some_and(|(prefix, n)| prefix == PAGE_PREFIX && n >= keep as u64)
        })
        .collect())
}

/// Orders `hytter_2.json` before `hytter_10.json`; names without a numeric
/// suffix sort by their stem
fn page_sort_key(path: &Path) -> (String, Option<u64>, OsString) {
    let file_name = path.file_name().map(OsString::from).unwrap_or_default();
    match page_number(path) {
        Some((prefix, n)) => (prefix.to_string(), Some(n), file_name),
        None => {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            (stem, None, file_name)
        }
    }
}

fn page_number(path: &Path) -> Option<(&str, u64)> {
    let stem = path.file_stem()?.to_str()?;
    let (prefix, digits) = stem.rsplit_once('_')?;
    Some((prefix, digits.parse().ok()?))
}

//! Error types for cabin-dl library
//!
//! Every stage of the pipeline fails fast: the first error ends the run.

use std::fmt;
use std::path::PathBuf;

use strsim::levenshtein;

/// Suggest the closest known name for a misspelled one
///
/// Matching is case-insensitive. Only names within a third of the input length
/// (at least 1, at most 3 edits) are considered a plausible typo.
pub fn suggest_correction(input: &str, candidates: &[&str]) -> Option<String> {
    let input_lower = input.to_lowercase();
    let max_distance = (input.len() / 3).clamp(1, 3);

    let mut best_match = None;
    let mut best_distance = usize::MAX;

    for candidate in candidates {
        let distance = levenshtein(&input_lower, &candidate.to_lowercase());

        // Same name, just a different case
        if distance == 0 {
            return Some(candidate.to_string());
        }

        if distance <= max_distance && distance < best_distance {
            best_distance = distance;
            best_match = Some(candidate.to_string());
        }
    }

    best_match
}

/// Main error type for cabin-dl operations
#[derive(Debug)]
pub enum Error {
    /// Server answered with a non-success status
    HttpError(String),

    /// Network connectivity issues (connect failures, timeouts)
    NetworkError(String),

    /// Server answered with something other than JSON
    UnexpectedContentType {
        content_type: Option<String>,
        page: usize,
    },

    /// JSON parsed but the page does not make sense (e.g. stuck cursor)
    InvalidResponse(String),

    /// More pages were requested than the configured safety bound allows
    PaginationLimit(usize),

    /// Malformed JSON or a page that does not match the expected shape
    JsonError {
        file: Option<PathBuf>,
        source: serde_json::Error,
    },

    /// Data directory holds no page files to load
    NoPageFiles(PathBuf),

    /// Report requested over a column that does not exist
    UnknownColumn {
        name: String,
        suggestion: Option<String>,
    },

    /// CSV export failure
    CsvError(csv::Error),

    /// GPX export failure
    GpxError(gpx::errors::GpxError),

    /// File I/O error
    IoError(std::io::Error),

    /// Invalid configuration or parameters
    InvalidInput(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::HttpError(msg) => {
                write!(f, "HTTP error: {}", msg)
            }
            Error::NetworkError(msg) => {
                write!(f, "Network error: {}", msg)
            }
            Error::UnexpectedContentType { content_type, page } => match content_type {
                Some(ct) => write!(f, "Page {} is not JSON (content-type: {})", page, ct),
                None => write!(f, "Page {} is not JSON (no content-type header)", page),
            },
            Error::InvalidResponse(msg) => {
                write!(f, "Invalid response: {}", msg)
            }
            Error::PaginationLimit(max_pages) => {
                write!(
                    f,
                    "Server still reports more pages after {} requests; raise --max-pages if this is expected",
                    max_pages
                )
            }
            Error::JsonError { file, source } => match file {
                Some(path) => write!(f, "JSON error in {}: {}", path.display(), source),
                None => write!(f, "JSON error: {}", source),
            },
            Error::NoPageFiles(dir) => {
                write!(
                    f,
                    "No page files found in {} (run without --offline to fetch them)",
                    dir.display()
                )
            }
            Error::UnknownColumn { name, suggestion } => match suggestion {
                Some(s) => write!(f, "Unknown column '{}'. Did you mean '{}'?", name, s),
                None => write!(f, "Unknown column '{}'", name),
            },
            Error::CsvError(err) => {
                write!(f, "CSV error: {}", err)
            }
            Error::GpxError(err) => {
                write!(f, "GPX error: {}", err)
            }
            Error::IoError(err) => {
                write!(f, "I/O error: {}", err)
            }
            Error::InvalidInput(msg) => {
                write!(f, "Invalid input: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::JsonError { source, .. } => Some(source),
            Error::CsvError(err) => Some(err),
            Error::GpxError(err) => Some(err),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Error::NetworkError(err.to_string())
        } else {
            Error::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonError {
            file: None,
            source: err,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::CsvError(err)
    }
}

impl From<gpx::errors::GpxError> for Error {
    fn from(err: gpx::errors::GpxError) -> Self {
        Error::GpxError(err)
    }
}

/// Convenience result type for cabin-dl operations
pub type Result<T> = std::result::Result<T, Error>;

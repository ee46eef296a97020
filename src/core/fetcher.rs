//! Paginated cabin fetching
//!
//! Pages are requested one at a time. Each request carries the `endCursor` of
//! the previous page; the sequence ends on the first page that reports no
//! further pages.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use futures::{Stream, TryStreamExt};
use log::{debug, info};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::core::error::{Error, Result};
use crate::core::loader::PAGE_PREFIX;
use crate::core::page::{PageInfo, PageResponse};
use crate::core::query::{ApiConfig, FindCabinsRequest};

/// Progress callback receiving (fetched cabins, total cabins reported by the server)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// One fetched page, both as sent by the server and parsed
#[derive(Debug, Clone)]
pub struct Page {
    /// Zero-based position in the pagination sequence
    pub number: usize,
    pub raw: Value,
    pub response: PageResponse,
}

/// Outcome of a fetch run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchSummary {
    pub pages: usize,
    pub edges: usize,
    pub total_count: Option<u64>,
    pub files: Vec<PathBuf>,
}

/// Pagination state carried from one request to the next
enum Cursor {
    Start,
    After(String),
    /// Last page seen was malformed; fail on the next step so it still gets saved
    Broken(String),
    Done,
}

/// File name of the dump for page `number`
pub fn page_file_name(number: usize) -> String {
    format!("{PAGE_PREFIX}_{number}.json")
}

/// Client for the cabin search endpoint
pub struct Fetcher {
    client: Client,
    config: ApiConfig,
}

impl Fetcher {
    /// Create a fetcher with custom configuration
    pub fn with_config(config: ApiConfig) -> Result<Self> {
        if config.page_size == 0 {
            return Err(Error::InvalidInput("page size must be at least 1".to_string()));
        }
        if config.max_pages == 0 {
            return Err(Error::InvalidInput("max pages must be at least 1".to_string()));
        }

        let mut builder = ClientBuilder::new().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Requests a single page
    pub async fn fetch_page(&self, number: usize, cursor: Option<&str>) -> Result<Page> {
        debug!("requesting page {number} (cursor: {cursor:?})");

        let body = FindCabinsRequest::new(&self.config, cursor);
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpError(format!(
                "{} answered {status} for page {number}",
                self.config.endpoint
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if !content_type.as_deref().is_some_and(is_json_content_type) {
            return Err(Error::UnexpectedContentType {
                content_type,
                page: number,
            });
        }

        let bytes = response.bytes().await?;
        let raw: Value = serde_json::from_slice(&bytes)?;
        let response = PageResponse::from_value(&raw)?;

        Ok(Page {
            number,
            raw,
            response,
        })
    }

    /// Lazy sequence of all pages, starting from the first one
    ///
    /// Calling this again restarts from the first page. The sequence fails with
    /// [`Error::PaginationLimit`] instead of requesting more than `max_pages`.
    pub fn pages(&self) -> impl Stream<Item = Result<Page>> + '_ {
        let start = (0usize, Cursor::Start);
        futures::stream::try_unfold(start, move |(number, cursor)| async move {
            let cursor = match cursor {
                Cursor::Done => return Ok(None),
                Cursor::Broken(msg) => return Err(Error::InvalidResponse(msg)),
                Cursor::Start => None,
                Cursor::After(c) => Some(c),
            };

            if number >= self.config.max_pages {
                return Err(Error::PaginationLimit(self.config.max_pages));
            }

            let page = self.fetch_page(number, cursor.as_deref()).await?;
            let next = next_cursor(number, cursor.as_deref(), page.response.page_info());

            Ok(Some((page, (number + 1, next))))
        })
    }

    /// Fetches every page and dumps each one, pretty-printed, into `dir`
    ///
    /// A page is written before the decision to request the next one, so a run
    /// that fails mid-way leaves every page received so far on disk.
    pub async fn fetch_to_dir(
        &self,
        dir: &Path,
        progress: Option<&ProgressCallback>,
    ) -> Result<FetchSummary> {
        tokio::fs::create_dir_all(dir).await?;

        let mut summary = FetchSummary::default();
        let pages = self.pages();
        tokio::pin!(pages);

        while let Some(page) = pages.try_next().await? {
            let path = dir.join(page_file_name(page.number));
            tokio::fs::write(&path, to_pretty_json(&page.raw)?).await?;

            let edges = page.response.edges().len();
            summary.pages += 1;
            summary.edges += edges;
            if summary.total_count.is_none() {
                summary.total_count = page.response.total_count();
            }
            summary.files.push(path.clone());

            info!("page {}: {} cabins -> {}", page.number, edges, path.display());

            if let Some(progress) = progress {
                let fetched = summary.edges as u64;
                progress(fetched, summary.total_count.unwrap_or(fetched).max(fetched));
            }
        }

        Ok(summary)
    }
}

/// Cursor for the request after page `number`, which was requested with `sent`
fn next_cursor(number: usize, sent: Option<&str>, info: &PageInfo) -> Cursor {
    if !info.has_next_page {
        return Cursor::Done;
    }
    match &info.end_cursor {
        None => Cursor::Broken(format!("page {number} reports more pages but has no endCursor")),
        Some(end) if sent == Some(end.as_str()) => Cursor::Broken(format!(
            "page {number} returned the cursor it was requested with ({end})"
        )),
        Some(end) => Cursor::After(end.clone()),
    }
}

/// `application/json`, with or without parameters such as charset
fn is_json_content_type(value: &str) -> bool {
    value
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// Pretty-prints with 4-space indentation
fn to_pretty_json(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

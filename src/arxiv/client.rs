use reqwest::Client;
use tracing::{debug, warn};

use super::feed::parse_feed;
use super::types::PaperRecord;

pub const API_BASE: &str = "https://export.arxiv.org/api/query";

#[derive(Debug, thiserror::Error)]
pub enum ArxivError {
    #[error("arXiv API error: {0}")]
    Api(String),

    #[error("arXiv API returned status {0}")]
    Status(u16),

    #[error("failed to parse arXiv feed: {0}")]
    Parse(#[from] quick_xml::DeError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Source of paper metadata, newest submissions first.
/// Implemented by `ArxivClient` for production; mock implementations used in tests.
pub trait PaperSource {
    async fn fetch(&self, query: &str, limit: u8) -> Result<Vec<PaperRecord>, ArxivError>;
}

#[derive(Clone)]
pub struct ArxivClient {
    http: Client,
    base_url: String,
}

impl ArxivClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }
}

impl PaperSource for ArxivClient {
    async fn fetch(&self, query: &str, limit: u8) -> Result<Vec<PaperRecord>, ArxivError> {
        let max_results = limit.to_string();
        let response = self
            .http
            .get(&self.base_url)
            .header("User-Agent", crate::USER_AGENT)
            .query(&[
                ("search_query", query),
                ("start", "0"),
                ("max_results", max_results.as_str()),
                ("sortBy", "submittedDate"),
                ("sortOrder", "descending"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "arXiv API error");
            return Err(ArxivError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let papers = parse_feed(&body)?;
        debug!(papers = papers.len(), "arxiv query complete");
        Ok(papers)
    }
}

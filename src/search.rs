//! Memoized paper search.
//!
//! Provider failures never escape this module: they are logged and folded
//! into [`SearchOutcome::Failed`], whose paper list is empty.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tracing::{info, warn};

use crate::arxiv::client::PaperSource;
use crate::arxiv::types::PaperRecord;
use crate::cache::TtlCache;

pub const MIN_RESULTS: u8 = 1;
pub const MAX_RESULTS: u8 = 10;
pub const DEFAULT_RESULTS: u8 = 3;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Vec<PaperRecord>),
    NoResults,
    Failed(String),
}

impl SearchOutcome {
    /// Records to render; empty for both `NoResults` and `Failed`.
    pub fn papers(&self) -> &[PaperRecord] {
        match self {
            SearchOutcome::Found(papers) => papers,
            SearchOutcome::NoResults | SearchOutcome::Failed(_) => &[],
        }
    }
}

type SearchKey = (String, u8);

pub struct PaperSearch<S> {
    source: S,
    cache: Mutex<TtlCache<SearchKey, Vec<PaperRecord>>>,
}

impl<S: PaperSource> PaperSearch<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            cache: Mutex::new(TtlCache::new(ttl)),
        }
    }

    pub async fn search(&self, query: &str, limit: u8) -> SearchOutcome {
        let limit = limit.clamp(MIN_RESULTS, MAX_RESULTS);
        let key = (query.to_string(), limit);

        let cached = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key);
        if let Some(papers) = cached {
            info!(query, limit, papers = papers.len(), "search served from cache");
            return to_outcome(papers);
        }

        match self.source.fetch(query, limit).await {
            Ok(papers) => {
                info!(query, limit, papers = papers.len(), "search complete");
                self.cache
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(key, papers.clone());
                to_outcome(papers)
            }
            Err(e) => {
                warn!(query, limit, error = %e, "search failed");
                SearchOutcome::Failed(e.to_string())
            }
        }
    }
}

fn to_outcome(papers: Vec<PaperRecord>) -> SearchOutcome {
    if papers.is_empty() {
        SearchOutcome::NoResults
    } else {
        SearchOutcome::Found(papers)
    }
}

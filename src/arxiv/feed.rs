use chrono::DateTime;
use tracing::warn;

use super::client::ArxivError;
use super::types::{Entry, Feed, PaperRecord};

/// Marker in the `id` of the single entry arXiv returns for a rejected query.
const ERROR_ENTRY_MARKER: &str = "/api/errors";

/// Parse an Atom response into records, keeping feed order.
pub fn parse_feed(xml: &str) -> Result<Vec<PaperRecord>, ArxivError> {
    let feed: Feed = quick_xml::de::from_str(xml)?;

    if let Some(err) = feed
        .entries
        .iter()
        .find(|e| e.id.contains(ERROR_ENTRY_MARKER))
    {
        return Err(ArxivError::Api(normalize_ws(&err.summary)));
    }

    Ok(feed.entries.iter().filter_map(to_record).collect())
}

fn to_record(entry: &Entry) -> Option<PaperRecord> {
    let published = match DateTime::parse_from_rfc3339(entry.published.trim()) {
        Ok(dt) => dt.date_naive(),
        Err(e) => {
            warn!(
                id = %entry.id,
                published = %entry.published,
                error = %e,
                "skipping entry with bad date"
            );
            return None;
        }
    };

    let authors = entry
        .authors
        .iter()
        .map(|a| normalize_ws(&a.name))
        .collect::<Vec<_>>()
        .join(", ");

    Some(PaperRecord {
        title: normalize_ws(&entry.title),
        summary: normalize_ws(&entry.summary),
        url: entry.id.trim().to_string(),
        published,
        authors,
    })
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

use chrono::NaiveDate;
use serde::Deserialize;

/// One search hit, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperRecord {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub published: NaiveDate,
    /// Author names joined with `", "`.
    pub authors: String,
}

#[derive(Debug, Deserialize)]
pub struct Feed {
    #[serde(rename = "entry", default)]
    pub entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
pub struct Entry {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Error entries carry no `published` element.
    #[serde(default)]
    pub published: String,
    #[serde(rename = "author", default)]
    pub authors: Vec<Author>,
}

#[derive(Debug, Deserialize)]
pub struct Author {
    pub name: String,
}

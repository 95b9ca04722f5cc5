//! arXiv Atom API client and feed parsing.

pub mod client;
mod feed;
pub mod types;

//! Gemini `generateContent` client used to write persona reviews.

pub mod client;
mod response;
pub mod types;

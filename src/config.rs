use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::review::Lang;

/// Runtime settings. Every flag falls back to an environment variable.
///
/// The Gemini API key is deliberately absent: it is entered per session in
/// the browser form and never read from the environment.
#[derive(Debug, Parser)]
#[command(name = "multiview", version, about)]
pub struct Config {
    /// Address the web UI listens on
    #[arg(long, env = "MULTIVIEW_BIND", default_value = "127.0.0.1:8501")]
    pub bind: SocketAddr,

    /// Gemini model used for both personas
    #[arg(long, env = "GEMINI_MODEL", default_value = crate::gemini::client::DEFAULT_MODEL)]
    pub model: String,

    /// Language the reviews are written in
    #[arg(long, env = "MULTIVIEW_REVIEW_LANG", value_enum, default_value_t = Lang::Auto)]
    pub review_lang: Lang,

    /// How long identical searches are served from memory, in seconds
    #[arg(long, env = "MULTIVIEW_CACHE_TTL_SECS", default_value_t = 3600)]
    pub cache_ttl_secs: u64,

    /// arXiv Atom API endpoint
    #[arg(long, env = "ARXIV_API_URL", default_value = crate::arxiv::client::API_BASE)]
    pub arxiv_url: Url,

    /// Gemini models endpoint
    #[arg(long, env = "GEMINI_API_URL", default_value = crate::gemini::client::API_BASE)]
    pub gemini_url: Url,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must use http or https: {url}")]
    UnsupportedScheme { name: &'static str, url: Url },

    #[error("GEMINI_API_URL must use https unless it points at localhost: {0}")]
    InsecureGeminiUrl(Url),

    #[error("model name must not be empty")]
    EmptyModel,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [
            ("ARXIV_API_URL", &self.arxiv_url),
            ("GEMINI_API_URL", &self.gemini_url),
        ] {
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::UnsupportedScheme {
                    name,
                    url: url.clone(),
                });
            }
        }
        // The API key travels in a request header.
        if self.gemini_url.scheme() != "https" && !is_loopback(&self.gemini_url) {
            return Err(ConfigError::InsecureGeminiUrl(self.gemini_url.clone()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(url::Host::Domain(host)) => host == "localhost",
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

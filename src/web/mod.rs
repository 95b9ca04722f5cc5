//! HTTP surface: the search form, the results page and a liveness probe.

mod render;

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use reqwest::Client;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

use crate::arxiv::client::ArxivClient;
use crate::config::Config;
use crate::gemini::client::{Credential, GeminiClient};
use crate::review::Lang;
use crate::search::PaperSearch;
use crate::session::{self, SearchForm};

#[derive(Clone)]
pub struct AppState(Arc<Shared>);

struct Shared {
    http: Client,
    search: PaperSearch<ArxivClient>,
    gemini_model: String,
    gemini_base_url: String,
    lang: Lang,
}

impl AppState {
    pub fn new(http: Client, config: &Config) -> Self {
        let arxiv = ArxivClient::new(http.clone(), config.arxiv_url.as_str());
        Self(Arc::new(Shared {
            search: PaperSearch::new(arxiv, config.cache_ttl()),
            gemini_model: config.model.clone(),
            gemini_base_url: config.gemini_url.as_str().to_string(),
            lang: config.review_lang,
            http,
        }))
    }

    fn gemini(&self, credential: Credential) -> GeminiClient {
        GeminiClient::new(
            self.0.http.clone(),
            credential,
            &self.0.gemini_model,
            &self.0.gemini_base_url,
        )
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/analyze", get(index).post(analyze))
        .route("/health", get(health))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(render::page(&SearchForm::default(), None))
}

/// The page echoes the API key back into the password field, so it must not
/// land in any browser or proxy cache.
async fn analyze(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> impl IntoResponse {
    info!(query = %form.query, max_papers = form.max_papers, "analyze requested");
    let outcome =
        session::run_action(&state.0.search, &form, state.0.lang, |credential| {
            state.gemini(credential)
        })
        .await;
    (
        [(header::CACHE_CONTROL, "no-store")],
        Html(render::page(&form, Some(&outcome))),
    )
}

async fn health() -> &'static str {
    "ok"
}

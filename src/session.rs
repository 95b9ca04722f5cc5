//! One user action, from submitted form to rendered cards.
//!
//! The UI moves through `AwaitingCredential -> AwaitingAction -> Rendering`
//! and back to `AwaitingAction`. [`run_action`] covers the first and last of
//! those: a missing credential stops before any network call, otherwise the
//! search runs once and every paper gets an expert and a beginner review in
//! strict sequence.

use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::arxiv::client::PaperSource;
use crate::arxiv::types::PaperRecord;
use crate::gemini::client::{Credential, TextGenerator};
use crate::review::{Lang, Persona, ReviewOutcome, Reviewer};
use crate::search::{DEFAULT_RESULTS, MAX_RESULTS, MIN_RESULTS, PaperSearch, SearchOutcome};

pub const DEFAULT_QUERY: &str = "LLM Agents";

/// Values posted by the search form.
#[derive(Clone, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_query")]
    pub query: String,
    #[serde(default = "default_max_papers", deserialize_with = "lenient_max_papers")]
    pub max_papers: u8,
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}

fn default_max_papers() -> u8 {
    DEFAULT_RESULTS
}

/// Out-of-range counts are clamped; blank or non-numeric input falls back to
/// [`DEFAULT_RESULTS`].
pub fn parse_max_papers(raw: &str) -> u8 {
    match raw.trim().parse::<i64>() {
        Ok(n) => n.clamp(i64::from(MIN_RESULTS), i64::from(MAX_RESULTS)) as u8,
        Err(_) => DEFAULT_RESULTS,
    }
}

fn lenient_max_papers<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(parse_max_papers(&raw))
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            query: default_query(),
            max_papers: default_max_papers(),
        }
    }
}

impl std::fmt::Debug for SearchForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchForm")
            .field("api_key", &"[REDACTED]")
            .field("query", &self.query)
            .field("max_papers", &self.max_papers)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct PaperCard {
    pub paper: PaperRecord,
    pub expert: ReviewOutcome,
    pub beginner: ReviewOutcome,
}

impl PaperCard {
    pub fn review(&self, persona: Persona) -> &ReviewOutcome {
        match persona {
            Persona::Expert => &self.expert,
            Persona::Beginner => &self.beginner,
        }
    }
}

#[derive(Debug)]
pub enum ActionOutcome {
    CredentialRequired,
    NotFound,
    SearchFailed(String),
    Rendered(Vec<PaperCard>),
}

/// Run one search action. `connect` builds the generator from the session
/// credential and is only called once a credential is present.
pub async fn run_action<S, G, F>(
    search: &PaperSearch<S>,
    form: &SearchForm,
    lang: Lang,
    connect: F,
) -> ActionOutcome
where
    S: PaperSource,
    G: TextGenerator,
    F: FnOnce(Credential) -> G,
{
    let Some(credential) = Credential::new(&form.api_key) else {
        info!("no API key supplied; waiting for credential");
        return ActionOutcome::CredentialRequired;
    };

    let outcome = search.search(&form.query, form.max_papers).await;
    if let SearchOutcome::Failed(reason) = outcome {
        return ActionOutcome::SearchFailed(reason);
    }
    let papers = outcome.papers();
    if papers.is_empty() {
        return ActionOutcome::NotFound;
    }

    let reviewer = Reviewer::new(connect(credential), lang);
    let mut cards = Vec::with_capacity(papers.len());
    for paper in papers {
        let expert = reviewer.review(&paper.summary, Persona::Expert).await;
        let beginner = reviewer.review(&paper.summary, Persona::Beginner).await;
        cards.push(PaperCard {
            paper: paper.clone(),
            expert,
            beginner,
        });
    }

    info!(papers = cards.len(), "analysis complete");
    ActionOutcome::Rendered(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arxiv::client::ArxivError;
    use crate::gemini::client::GeminiError;
    use crate::review::mock::MockGenerator;
    use crate::search::DEFAULT_CACHE_TTL;
    use crate::search::mock::{MockSource, paper};

    fn form(api_key: &str) -> SearchForm {
        SearchForm {
            api_key: api_key.to_string(),
            ..SearchForm::default()
        }
    }

    #[tokio::test]
    async fn empty_credential_skips_search() {
        let source = MockSource::new(vec![]);
        let search = PaperSearch::new(&source, DEFAULT_CACHE_TTL);
        let generator = MockGenerator::default();

        let outcome = run_action(&search, &form("  "), Lang::Auto, |_| &generator).await;

        assert!(matches!(outcome, ActionOutcome::CredentialRequired));
        assert!(source.calls().is_empty());
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn three_papers_get_two_reviews_each() {
        let source = MockSource::new(vec![Ok(vec![paper("C", 3), paper("B", 2), paper("A", 1)])]);
        let search = PaperSearch::new(&source, DEFAULT_CACHE_TTL);
        let generator = MockGenerator::default();

        let outcome = run_action(&search, &form("key"), Lang::Auto, |_| &generator).await;

        let cards = match outcome {
            ActionOutcome::Rendered(cards) => cards,
            other => panic!("expected Rendered, got: {other:?}"),
        };
        assert_eq!(cards.len(), 3);
        for card in &cards {
            for persona in Persona::ALL {
                assert!(!card.review(persona).display_text().is_empty());
            }
        }
        assert_eq!(source.calls(), vec![(DEFAULT_QUERY.to_string(), 3)]);
        assert_eq!(generator.calls().len(), 6);
    }

    #[tokio::test]
    async fn reviews_run_expert_then_beginner_per_paper() {
        let source = MockSource::new(vec![Ok(vec![paper("B", 2), paper("A", 1)])]);
        let search = PaperSearch::new(&source, DEFAULT_CACHE_TTL);
        let generator = MockGenerator::default();

        run_action(&search, &form("key"), Lang::Auto, |_| &generator).await;

        let calls = generator.calls();
        let order: Vec<(bool, f32)> = calls
            .iter()
            .map(|(prompt, t)| (prompt.ends_with("Abstract of B"), *t))
            .collect();
        assert_eq!(
            order,
            [(true, 0.0), (true, 0.7), (false, 0.0), (false, 0.7)]
        );
    }

    #[tokio::test]
    async fn no_results_is_not_found() {
        let source = MockSource::new(vec![Ok(vec![])]);
        let search = PaperSearch::new(&source, DEFAULT_CACHE_TTL);
        let generator = MockGenerator::default();

        let outcome = run_action(&search, &form("key"), Lang::Auto, |_| &generator).await;

        assert!(matches!(outcome, ActionOutcome::NotFound));
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn search_failure_carries_reason() {
        let source = MockSource::new(vec![Err(ArxivError::Status(500))]);
        let search = PaperSearch::new(&source, DEFAULT_CACHE_TTL);
        let generator = MockGenerator::default();

        let outcome = run_action(&search, &form("key"), Lang::Auto, |_| &generator).await;

        match outcome {
            ActionOutcome::SearchFailed(reason) => assert!(reason.contains("500")),
            other => panic!("expected SearchFailed, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn generation_failure_stays_inside_the_card() {
        let source = MockSource::new(vec![Ok(vec![paper("A", 1)])]);
        let search = PaperSearch::new(&source, DEFAULT_CACHE_TTL);
        let generator = MockGenerator::new(vec![
            Err(GeminiError::QuotaExhausted("daily limit".into())),
            Ok("friendly summary".into()),
        ]);

        let outcome = run_action(&search, &form("key"), Lang::Auto, |_| &generator).await;

        let cards = match outcome {
            ActionOutcome::Rendered(cards) => cards,
            other => panic!("expected Rendered, got: {other:?}"),
        };
        assert!(cards[0].expert.is_failure());
        assert_eq!(cards[0].beginner.display_text(), "friendly summary");
    }

    #[test]
    fn max_papers_is_clamped_or_defaulted() {
        assert_eq!(parse_max_papers("5"), 5);
        assert_eq!(parse_max_papers(" 7 "), 7);
        assert_eq!(parse_max_papers("300"), MAX_RESULTS);
        assert_eq!(parse_max_papers("0"), MIN_RESULTS);
        assert_eq!(parse_max_papers("-4"), MIN_RESULTS);
        assert_eq!(parse_max_papers(""), DEFAULT_RESULTS);
        assert_eq!(parse_max_papers("many"), DEFAULT_RESULTS);
        assert_eq!(parse_max_papers("2.5"), DEFAULT_RESULTS);
    }

    #[test]
    fn form_debug_hides_api_key() {
        let shown = format!("{:?}", form("super-secret"));
        assert!(!shown.contains("super-secret"));
        assert!(shown.contains("LLM Agents"));
    }
}

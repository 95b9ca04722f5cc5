//! Persona reviews of paper abstracts.

mod lang;
mod persona;

pub use lang::Lang;
pub use persona::Persona;

use tracing::{debug, warn};

use crate::gemini::client::TextGenerator;

/// Prefix of the text shown in place of a review that could not be generated.
pub const REVIEW_ERROR_MARKER: &str = "Error generating review:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    Generated(String),
    Failed(String),
}

impl ReviewOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ReviewOutcome::Failed(_))
    }

    /// Text for the review panel. Failures render as a marked message so the
    /// panel is never empty.
    pub fn display_text(&self) -> String {
        match self {
            ReviewOutcome::Generated(text) => text.clone(),
            ReviewOutcome::Failed(reason) => format!("{REVIEW_ERROR_MARKER} {reason}"),
        }
    }
}

pub struct Reviewer<G> {
    generator: G,
    lang: Lang,
}

impl<G: TextGenerator> Reviewer<G> {
    pub fn new(generator: G, lang: Lang) -> Self {
        Self { generator, lang }
    }

    pub fn build_prompt(&self, text: &str, persona: Persona) -> String {
        let instructions = self.lang.apply_to_instructions(persona.profile().template);
        format!("{instructions}\n\nTarget Abstract:\n{text}")
    }

    /// One best-effort generation call. No retry.
    pub async fn review(&self, text: &str, persona: Persona) -> ReviewOutcome {
        let prompt = self.build_prompt(text, persona);
        match self.generator.generate(&prompt, persona.temperature()).await {
            Ok(review) => {
                debug!(%persona, chars = review.len(), "review generated");
                ReviewOutcome::Generated(review)
            }
            Err(e) => {
                warn!(%persona, error = %e, "review generation failed");
                ReviewOutcome::Failed(e.to_string())
            }
        }
    }
}

use std::fmt;

/// Review style. Each persona maps to exactly one prompt template and one
/// sampling temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Persona {
    Expert,
    Beginner,
}

#[derive(Debug, Clone, Copy)]
pub struct PersonaProfile {
    pub heading: &'static str,
    pub template: &'static str,
    pub temperature: f32,
}

const EXPERT_TEMPLATE: &str = "\
You are a seasoned data scientist. Read the paper abstract below and analyze it from the perspective of a technical expert.
Output format:
- **Technical approach**: the core of the method or algorithm
- **Novelty**: how it differs from prior work
- **Open issues**: concerns or limitations worth checking";

const BEGINNER_TEMPLATE: &str = "\
You are a curious tech blogger. Read the paper abstract below and explain it so that AI beginners and business readers can follow along.
Output format:
- **In one line**: a catchy headline
- **Why it matters**: a plain explanation built around an analogy
- **What comes next**: the future this technology could unlock once it reaches the real world";

impl Persona {
    /// Render order within a card.
    pub const ALL: [Persona; 2] = [Persona::Expert, Persona::Beginner];

    pub fn profile(self) -> PersonaProfile {
        match self {
            Persona::Expert => PersonaProfile {
                heading: "Expert View (Data Scientist)",
                template: EXPERT_TEMPLATE,
                temperature: 0.0,
            },
            Persona::Beginner => PersonaProfile {
                heading: "Beginner View (Web/Biz)",
                template: BEGINNER_TEMPLATE,
                temperature: 0.7,
            },
        }
    }

    pub fn temperature(self) -> f32 {
        self.profile().temperature
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Persona::Expert => "expert",
            Persona::Beginner => "beginner",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

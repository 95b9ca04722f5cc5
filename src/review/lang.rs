/// Language the reviews should be written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Lang {
    Ja,
    En,
    #[default]
    Auto,
}

impl Lang {
    pub fn apply_to_instructions(self, instructions: &str) -> String {
        match self {
            Lang::Ja => format!("{instructions}\n(日本語で回答)"),
            Lang::En => format!("{instructions}\n(answer in English)"),
            Lang::Auto => instructions.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ja_appends_japanese_instruction() {
        assert_eq!(Lang::Ja.apply_to_instructions("review"), "review\n(日本語で回答)");
    }

    #[test]
    fn en_appends_english_instruction() {
        assert_eq!(
            Lang::En.apply_to_instructions("review"),
            "review\n(answer in English)"
        );
    }

    #[test]
    fn auto_is_passthrough() {
        assert_eq!(Lang::Auto.apply_to_instructions("review"), "review");
    }
}

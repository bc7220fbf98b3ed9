//! Canned user prompts.

use clap::ValueEnum;

/// Which canned prompt to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Prompt {
    /// Flight status plus weather at the destination.
    #[default]
    Status,
    /// A booking request missing the origin, passengers and cabin.
    CostIncomplete,
    /// A booking request with every detail the cost lookup needs.
    Cost,
}

impl Prompt {
    pub fn text(self) -> &'static str {
        match self {
            Self::Status => {
                "Give me the information about flight AA777 and what is the weather at the arrival?"
            }
            Self::CostIncomplete => "I want to book a flight next monday to Washington DC.",
            Self::Cost => {
                "I want to buy a flight next monday to Washington DC from DFW. Just for myself, economy class."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_status() {
        assert_eq!(Prompt::default(), Prompt::Status);
        assert!(Prompt::default().text().contains("AA777"));
    }

    #[test]
    fn names_are_kebab_case() {
        let names: Vec<_> = Prompt::value_variants()
            .iter()
            .filter_map(|p| p.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        assert_eq!(names, vec!["status", "cost-incomplete", "cost"]);
    }
}

//! Rock-paper-scissors-lizard-spock engine
//!
//! Platform-agnostic rules for a one-round choice game: a catalog of choices
//! with their "wins against" relation, and a resolver that plays the player's
//! pick against an injected opponent. Terminal I/O lives in the driver crate.

pub mod catalog;
pub mod constants;
pub mod opponent;
pub mod round;

use std::path::PathBuf;

// Re-export commonly used types
pub use catalog::{BalanceIssue, Catalog, CatalogError, CatalogSpec, Choice, ChoiceSpec};
pub use opponent::{FixedOpponent, Opponent, RandomOpponent};
pub use round::{
    InvalidChoice, Outcome, RoundReport, RoundResolver, parse_player_input, pick_random, resolve,
};

/// Trait for abstracting where the choice configuration comes from.
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load and build the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read or is inconsistent.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;
}

/// JSON configuration file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Default for JsonFile {
    fn default() -> Self {
        Self::new(constants::DEFAULT_CONFIG_PATH)
    }
}

impl CatalogSource for JsonFile {
    type Error = CatalogError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        Catalog::load(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[derive(Clone, Copy, Default)]
    struct FixtureSource;

    impl CatalogSource for FixtureSource {
        type Error = Infallible;

        fn load_catalog(&self) -> Result<Catalog, Self::Error> {
            Ok(Catalog::from_json(
                r#"{ "choices": [
                    { "name": "rock", "winsAgainst": ["scissors"] },
                    { "name": "scissors", "winsAgainst": [] }
                ] }"#,
            )
            .unwrap())
        }
    }

    #[test]
    fn seeded_round_from_source() {
        let catalog = FixtureSource.load_catalog().unwrap();
        let lines = RoundResolver::new(&catalog, RandomOpponent::seeded(42))
            .play("Rock")
            .lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Computer chose "));
        let expected = if lines[0].ends_with("rock") {
            "It's a tie!"
        } else {
            "You win!"
        };
        assert_eq!(lines[1], expected);
    }

    #[test]
    fn unknown_input_from_source_is_rejected() {
        let catalog = FixtureSource.load_catalog().unwrap();
        let lines = RoundResolver::new(&catalog, RandomOpponent::seeded(42))
            .play("paper")
            .lines();
        assert_eq!(
            lines,
            vec!["Invalid choice, please enter one of the following: rock, scissors.".to_string()]
        );
    }

    #[test]
    fn json_file_defaults_to_choice_json() {
        assert_eq!(JsonFile::default().path(), std::path::Path::new("choice.json"));
        let err = JsonFile::new("missing/choice.json").load_catalog().unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}

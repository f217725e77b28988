//! Round resolution: parse the player's pick, draw the opponent, decide the outcome.
use std::fmt;

use rand::Rng;
use thiserror::Error;

use crate::catalog::{Catalog, Choice};
use crate::constants::{LOSE_MESSAGE, TIE_MESSAGE, WIN_MESSAGE, computer_chose};
use crate::opponent::Opponent;

/// Result of a round from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Tie,
    PlayerWins,
    PlayerLoses,
}

impl Outcome {
    /// Line printed to the player for this outcome.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Tie => TIE_MESSAGE,
            Self::PlayerWins => WIN_MESSAGE,
            Self::PlayerLoses => LOSE_MESSAGE,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The player typed something that is not a catalog name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid choice, please enter one of the following: {valid}.")]
pub struct InvalidChoice {
    pub input: String,
    pub valid: String,
}

/// Compare two choices. Same name is a tie; otherwise the player wins only
/// when the opponent is in the player's defeats-set.
#[must_use]
pub fn resolve(player: &Choice, opponent: &Choice) -> Outcome {
    if player.name() == opponent.name() {
        Outcome::Tie
    } else if player.can_beat(opponent) {
        Outcome::PlayerWins
    } else {
        Outcome::PlayerLoses
    }
}

/// Pick one choice uniformly at random.
///
/// Catalogs are never empty once built, so there is always something to pick.
pub fn pick_random<'c, R: Rng + ?Sized>(catalog: &'c Catalog, rng: &mut R) -> &'c Choice {
    let choices = catalog.as_slice();
    debug_assert!(!choices.is_empty(), "catalog must hold at least one choice");
    &choices[rng.gen_range(0..choices.len())]
}

/// Case-insensitive lookup of raw player text, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns [`InvalidChoice`] listing every valid name when nothing matches.
pub fn parse_player_input<'c>(
    catalog: &'c Catalog,
    text: &str,
) -> Result<&'c Choice, InvalidChoice> {
    catalog.get(text).ok_or_else(|| InvalidChoice {
        input: text.trim().to_string(),
        valid: catalog.name_list(),
    })
}

/// Terminal state of a single round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundReport<'c> {
    Resolved {
        player: &'c Choice,
        opponent: &'c Choice,
        outcome: Outcome,
    },
    Rejected(InvalidChoice),
}

impl RoundReport<'_> {
    /// Lines shown to the player, in order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Resolved {
                opponent, outcome, ..
            } => vec![computer_chose(opponent.name()), outcome.message().to_string()],
            Self::Rejected(err) => vec![err.to_string()],
        }
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        match self {
            Self::Resolved { outcome, .. } => Some(*outcome),
            Self::Rejected(_) => None,
        }
    }
}

/// Plays rounds against a catalog with an injected opponent.
#[derive(Debug)]
pub struct RoundResolver<'c, O> {
    catalog: &'c Catalog,
    opponent: O,
}

impl<'c, O: Opponent<'c>> RoundResolver<'c, O> {
    pub const fn new(catalog: &'c Catalog, opponent: O) -> Self {
        Self { catalog, opponent }
    }

    #[must_use]
    pub const fn opponent(&self) -> &O {
        &self.opponent
    }

    /// Play one round from raw player text. The opponent is only consulted
    /// once the input has been accepted.
    pub fn play(&mut self, input: &str) -> RoundReport<'c> {
        let player = match parse_player_input(self.catalog, input) {
            Ok(choice) => choice,
            Err(err) => {
                log::debug!("rejected player input {:?}", err.input);
                return RoundReport::Rejected(err);
            }
        };
        let opponent = self.opponent.pick(self.catalog);
        let outcome = resolve(player, opponent);
        log::debug!("{} vs {}: {outcome:?}", player.name(), opponent.name());
        RoundReport::Resolved {
            player,
            opponent,
            outcome,
        }
    }
}

//! Opponent selection. The resolver never touches a global random source;
//! whoever drives a round hands it an [`Opponent`].
use hmac::{Hmac, Mac};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;

use crate::catalog::{Catalog, Choice};
use crate::constants::OPPONENT_STREAM_TAG;
use crate::round::{InvalidChoice, parse_player_input, pick_random};

/// Source of the automated opponent's choice for a round.
pub trait Opponent<'c> {
    fn pick(&mut self, catalog: &'c Catalog) -> &'c Choice;
}

/// Uniform random opponent backed by any [`Rng`].
#[derive(Debug, Clone)]
pub struct RandomOpponent<R = ChaCha20Rng> {
    rng: R,
    draws: u64,
}

impl<R: Rng> RandomOpponent<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng, draws: 0 }
    }

    /// Number of picks made so far.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomOpponent<ChaCha20Rng> {
    /// Reproducible opponent derived from a user-visible seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(derive_stream_seed(
            seed,
            OPPONENT_STREAM_TAG,
        )))
    }

    /// Opponent seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(ChaCha20Rng::from_entropy())
    }
}

impl<'c, R: Rng> Opponent<'c> for RandomOpponent<R> {
    fn pick(&mut self, catalog: &'c Catalog) -> &'c Choice {
        self.draws = self.draws.saturating_add(1);
        let choice = pick_random(catalog, &mut self.rng);
        log::debug!("opponent draw #{} picked {}", self.draws, choice.name());
        choice
    }
}

/// Opponent that always plays the same choice.
#[derive(Debug, Clone, Copy)]
pub struct FixedOpponent<'c> {
    choice: &'c Choice,
}

impl<'c> FixedOpponent<'c> {
    /// Resolve `name` against the catalog the rounds will be played with.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidChoice`] if the catalog has no such choice.
    pub fn new(catalog: &'c Catalog, name: &str) -> Result<Self, InvalidChoice> {
        parse_player_input(catalog, name).map(|choice| Self { choice })
    }
}

impl<'c> Opponent<'c> for FixedOpponent<'c> {
    fn pick(&mut self, _catalog: &'c Catalog) -> &'c Choice {
        self.choice
    }
}

/// Mix a domain tag into the user seed so the opponent stream differs from
/// any other consumer seeded with the same number.
fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{ "choices": [
        { "name": "rock", "winsAgainst": ["scissors"] },
        { "name": "paper", "winsAgainst": ["rock"] },
        { "name": "scissors", "winsAgainst": ["paper"] }
    ] }"#;

    #[test]
    fn seeded_opponents_repeat_their_picks() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let mut first = RandomOpponent::seeded(1337);
        let mut second = RandomOpponent::seeded(1337);
        for _ in 0..32 {
            assert_eq!(first.pick(&catalog).name(), second.pick(&catalog).name());
        }
        assert_eq!(first.draws(), 32);
    }

    #[test]
    fn stream_seed_is_domain_separated() {
        assert_ne!(derive_stream_seed(7, b"opponent"), derive_stream_seed(7, b"other"));
        assert_ne!(derive_stream_seed(7, b"opponent"), 7);
        assert_eq!(derive_stream_seed(7, b"opponent"), derive_stream_seed(7, b"opponent"));
    }

    #[test]
    fn fixed_opponent_always_plays_its_choice() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let mut opponent = FixedOpponent::new(&catalog, "PAPER").unwrap();
        for _ in 0..3 {
            assert_eq!(opponent.pick(&catalog).name(), "paper");
        }
        assert!(FixedOpponent::new(&catalog, "spock").is_err());
    }
}

//! Player-facing text and defaults shared by the engine and the terminal driver.
//!
//! The message strings are part of the observable behaviour of the game, so
//! they live in one place instead of being spelled out at each call site.

/// Configuration file read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "choice.json";

/// Separator used whenever choice names are listed for the player.
pub const NAME_SEPARATOR: &str = ", ";

pub const TIE_MESSAGE: &str = "It's a tie!";
pub const WIN_MESSAGE: &str = "You win!";
pub const LOSE_MESSAGE: &str = "You lose!";

/// Domain tag mixed into user seeds before they drive the opponent stream.
pub(crate) const OPPONENT_STREAM_TAG: &[u8] = b"opponent";

/// Prompt shown before reading the player's choice.
#[must_use]
pub fn prompt(name_list: &str) -> String {
    format!("Enter your choice ({name_list}): ")
}

/// Line announcing the automated opponent's pick.
#[must_use]
pub fn computer_chose(name: &str) -> String {
    format!("Computer chose {name}")
}

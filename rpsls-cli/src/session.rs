//! Terminal plumbing for one round: prompt, read a line, print the report.
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rpsls_game::constants::prompt;
use rpsls_game::{Catalog, Opponent, Outcome, RoundResolver};

/// Play one round over the given streams and return the outcome, or `None`
/// when the input was rejected.
///
/// End of input counts as an empty answer and is rejected like any other
/// unknown name. Bytes that are not UTF-8 are replaced, so they can only
/// fail the lookup and never abort the round.
pub fn play_round<'c, O, R, W>(
    catalog: &'c Catalog,
    opponent: O,
    mut input: R,
    mut output: W,
) -> Result<Option<Outcome>>
where
    O: Opponent<'c>,
    R: BufRead,
    W: Write,
{
    write!(output, "{}", prompt(&catalog.name_list())).context("writing prompt")?;
    output.flush().context("flushing prompt")?;

    let mut raw = Vec::new();
    let read = input
        .read_until(b'\n', &mut raw)
        .context("reading player choice")?;
    if read == 0 {
        log::debug!("input closed before a choice was entered");
    }
    let line = String::from_utf8_lossy(&raw);

    let report = RoundResolver::new(catalog, opponent).play(&line);
    for text in report.lines() {
        writeln!(output, "{text}").context("writing round result")?;
    }
    Ok(report.outcome())
}

//! Text rendering for prompts, cards and map state.

use std::io::{self, Write};

use crate::choice::{ChoiceDescriptor, OptionIndex};
use crate::core::Side;
use crate::games::cold_war::{CardInfo, ColdWarGame, GameResult, Region};
use crate::games::cold_war::map::in_region;

/// Banner naming the side that must act.
#[must_use]
pub fn banner(side: Side) -> String {
    format!("----- {side}: -----")
}

/// Write the full prompt for the pending choice.
///
/// Shows who acts, the question, picks made so far and the remaining
/// repetitions, then either the commit question or the option table.
pub fn write_prompt<W: Write>(
    out: &mut W,
    choice: &ChoiceDescriptor,
    options: &OptionIndex,
) -> io::Result<()> {
    writeln!(out, "{}", banner(choice.side))?;
    writeln!(out, "{}", choice.prompt)?;

    let picked: Vec<&str> = choice
        .selections()
        .into_iter()
        .flat_map(|(name, count)| std::iter::repeat(name).take(count as usize))
        .collect();
    if !picked.is_empty() {
        writeln!(out, "You have selected {}", picked.join(", "))?;
    }

    if let Some(unit) = &choice.reps_unit {
        writeln!(out, "Remaining {unit}: {}", choice.reps())?;
    }

    if choice.is_complete() {
        writeln!(out, "Commit your actions? (Yes/No)")?;
    } else if !options.is_empty() {
        writeln!(out, "Available options:")?;
        for (id, entry) in options.iter() {
            writeln!(out, "{:>5} {}", id.to_string(), entry.name)?;
        }
    }
    Ok(())
}

/// One-line card summary.
#[must_use]
pub fn card_line(card: &CardInfo) -> String {
    format!(
        "{:>3} {} ({} ops, {})",
        card.id.0,
        card.name,
        card.ops,
        card.owner.short()
    )
}

/// Full card description.
pub fn write_card<W: Write>(out: &mut W, card: &CardInfo) -> io::Result<()> {
    writeln!(out, "{}", card_line(card))?;
    writeln!(out, "Event side: {}", card.owner)?;
    if card.removed_after_event {
        writeln!(out, "Removed from play once its event is played.")?;
    }
    writeln!(out, "{}", card.text)
}

/// Overall score, track and pile summary.
pub fn write_summary<W: Write>(out: &mut W, game: &ColdWarGame) -> io::Result<()> {
    writeln!(out, "=== Game state ===")?;
    writeln!(out, "Turn {}, action round {}", game.turn(), game.round())?;

    let leader = match game.vp() {
        vp if vp > 0 => format!(" ({} leads)", Side::FactionA),
        vp if vp < 0 => format!(" ({} leads)", Side::FactionB),
        _ => String::new(),
    };
    writeln!(out, "VP status: {}{leader}", game.vp())?;
    writeln!(out, "DEFCON: {}", game.defcon())?;
    writeln!(
        out,
        "Space race: A {}, B {}",
        game.space_race(Side::FactionA),
        game.space_race(Side::FactionB)
    )?;
    writeln!(
        out,
        "Cards: {} in draw pile, {} discarded, {} removed",
        game.draw_pile().len(),
        game.discard_pile().len(),
        game.removed_pile().len()
    )?;

    match game.result() {
        Some(GameResult::Winner(side)) => writeln!(out, "Result: {side} won"),
        Some(GameResult::Draw) => writeln!(out, "Result: draw"),
        None => Ok(()),
    }
}

/// Country listing and control counts for one region.
pub fn write_region<W: Write>(out: &mut W, game: &ColdWarGame, region: Region) -> io::Result<()> {
    writeln!(out, "State of {region}:")?;

    let mut controlled = [0u32; 2];
    let mut battlegrounds = [0u32; 2];
    for info in in_region(region) {
        writeln!(out, "{}", game.map().state_line(info.id))?;
        if let Some(side) = game.map().controller(info.id) {
            controlled[side.index()] += 1;
            if info.battleground {
                battlegrounds[side.index()] += 1;
            }
        }
    }

    writeln!(
        out,
        "Controlled: A {} ({} battlegrounds), B {} ({} battlegrounds)",
        controlled[0], battlegrounds[0], controlled[1], battlegrounds[1]
    )
}

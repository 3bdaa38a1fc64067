//! Line-oriented console over a cold-war session.
//!
//! Each input line starts with a verb (`m`, `c`, `s`, `dbg`, `new`, `quit`,
//! `?`). The transcript goes to the writer given at construction; logging
//! goes through `tracing` so it never mixes with it.
//!
//! Mistakes a user can make (unknown verbs, unresolvable tokens, commands
//! outside debug mode) are answered on the transcript. Only contract
//! breaches and write failures come back as errors.

pub mod help;
pub mod render;

use std::io::{self, Write};

use thiserror::Error;
use tracing::warn;

use crate::choice::resolve_among;
use crate::core::Side;
use crate::error::SessionError;
use crate::games::cold_war::cards::{card_info, cards};
use crate::games::cold_war::map::countries;
use crate::games::cold_war::{CardId, ColdWarGame, Region};
use crate::rules::RulesEngine;
use crate::session::{Confirmation, Session};

const INVALID: &str = "Invalid command. Enter ? for help.";

/// Failure that stops the console loop.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("writing the transcript failed: {0}")]
    Io(#[from] io::Error),
}

/// What the caller should do after a line was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive front end writing its transcript to `W`.
pub struct Console<W: Write> {
    session: Session<ColdWarGame>,
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(game: ColdWarGame, out: W) -> Result<Self, ConsoleError> {
        Ok(Self {
            session: Session::new(game)?,
            out,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Session<ColdWarGame> {
        &self.session
    }

    #[must_use]
    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Print the opening banner and the first prompt.
    pub fn greet(&mut self) -> Result<(), ConsoleError> {
        writeln!(self.out, "Initialising game..")?;
        self.prompt()
    }

    /// Handle one line of user input.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow, ConsoleError> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match verb.to_lowercase().as_str() {
            "?" => writeln!(self.out, "{}", help::GENERAL)?,
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            "new" => {
                writeln!(self.out, "Starting new game.")?;
                self.session.restart()?;
                self.prompt()?;
            }
            "m" => self.moves(rest)?,
            "c" => self.card(rest)?,
            "s" => self.state(rest)?,
            "dbg" => self.debug(rest)?,
            _ => writeln!(self.out, "{INVALID}")?,
        }
        Ok(Flow::Continue)
    }

    fn prompt(&mut self) -> Result<(), ConsoleError> {
        let choice = self.session.engine().choice();
        render::write_prompt(&mut self.out, choice, self.session.options())?;
        Ok(())
    }

    /// Answer a session error on the transcript, or pass on contract breaches.
    fn report(&mut self, err: SessionError) -> Result<(), ConsoleError> {
        if err.is_contract_breach() {
            return Err(err.into());
        }
        warn!(%err, "request rejected");
        writeln!(self.out, "Error: {err}.")?;
        Ok(())
    }

    // === m ===

    fn moves(&mut self, rest: &str) -> Result<(), ConsoleError> {
        match rest {
            "" => return self.prompt(),
            "?" => {
                writeln!(self.out, "{}", help::MOVE)?;
                return Ok(());
            }
            _ => {}
        }

        if self.session.awaiting_commit() {
            match self.session.confirm(rest) {
                Ok(Confirmation::Committed) => {}
                Ok(Confirmation::RolledBack) => writeln!(self.out, "Actions undone.")?,
                Err(SessionError::Resolve(_)) => writeln!(self.out, "Invalid input.")?,
                Err(err) => return Err(err.into()),
            }
            return self.prompt();
        }

        let outcome = self.session.submit(rest)?;
        for name in &outcome.applied {
            writeln!(self.out, "Selected: {name}")?;
        }
        if let Some(err) = &outcome.failure {
            writeln!(self.out, "Error: {err}!")?;
        }
        if outcome.truncated > 0 {
            writeln!(
                self.out,
                "Ignored {} extra option(s): the choice needed fewer picks.",
                outcome.truncated
            )?;
        }
        self.prompt()
    }

    // === c ===

    fn card(&mut self, rest: &str) -> Result<(), ConsoleError> {
        let game = self.session.engine();
        let side = game.choice().side;

        match rest {
            "" => {
                if !side.is_faction() {
                    writeln!(self.out, "No faction is acting right now.")?;
                    return Ok(());
                }
                let mut hand: Vec<CardId> = game.hand(side).iter().copied().collect();
                hand.sort();
                writeln!(self.out, "Listing {} cards in hand.", hand.len())?;
                for card in hand.into_iter().filter_map(card_info) {
                    writeln!(self.out, "{}", render::card_line(card))?;
                }
            }
            "?" => writeln!(self.out, "{}", help::CARD)?,
            "opp" => {
                let opponent = side.opponent();
                writeln!(
                    self.out,
                    "Cards in opponent hand: {}",
                    game.hand(opponent).len()
                )?;
            }
            "dis" | "rem" => {
                let (label, pile) = if rest == "dis" {
                    ("discarded", game.discard_pile())
                } else {
                    ("removed", game.removed_pile())
                };
                let mut pile: Vec<CardId> = pile.iter().copied().collect();
                pile.sort();
                writeln!(self.out, "Listing {} {label} cards.", pile.len())?;
                for card in pile.into_iter().filter_map(card_info) {
                    writeln!(self.out, "{}", render::card_line(card))?;
                }
            }
            "dec" => writeln!(self.out, "Cards in draw pile: {}.", game.draw_pile().len())?,
            query => {
                let found = match query.parse::<u32>() {
                    Ok(id) => card_info(CardId(id)),
                    Err(_) => {
                        let names: Vec<&str> = cards().iter().map(|c| c.name).collect();
                        match resolve_among(query, &names) {
                            Ok(name) => cards().iter().find(|c| c.name == name),
                            Err(err) => return self.report(err.into()),
                        }
                    }
                };
                match found {
                    Some(card) => render::write_card(&mut self.out, card)?,
                    None => writeln!(self.out, "Invalid card.")?,
                }
            }
        }
        Ok(())
    }

    // === s ===

    fn state(&mut self, rest: &str) -> Result<(), ConsoleError> {
        match rest {
            "" => render::write_summary(&mut self.out, self.session.engine())?,
            "?" => writeln!(self.out, "{}", help::STATE)?,
            region => match region.parse::<Region>() {
                Ok(region) => render::write_region(&mut self.out, self.session.engine(), region)?,
                Err(_) => writeln!(self.out, "{INVALID}")?,
            },
        }
        Ok(())
    }

    // === dbg ===

    fn debug(&mut self, rest: &str) -> Result<(), ConsoleError> {
        match rest {
            "" => {
                if self.session.is_debugging() {
                    writeln!(self.out, "Error: Already in debug mode.")?;
                } else {
                    self.session.open_debug()?;
                    writeln!(self.out, "Debugging mode started.")?;
                }
                return Ok(());
            }
            "?" => {
                writeln!(self.out, "{}", help::DEBUG)?;
                return Ok(());
            }
            _ => {}
        }

        if !self.session.is_debugging() {
            return self.report(SessionError::NotInDebugMode);
        }

        let words: Vec<&str> = rest.split_whitespace().collect();
        match words.as_slice() {
            ["inf", "set", name @ .., amounts] if !name.is_empty() => {
                self.debug_influence(&name.join(" "), amounts)
            }
            ["card", name @ .., side] if !name.is_empty() => {
                self.debug_card(&name.join(" "), side)
            }
            ["rollback"] => {
                writeln!(self.out, "Restoring pre-debugging state.")?;
                self.session.restore_debug()?;
                self.prompt()
            }
            _ => {
                writeln!(self.out, "{INVALID}")?;
                Ok(())
            }
        }
    }

    fn debug_influence(&mut self, country: &str, amounts: &str) -> Result<(), ConsoleError> {
        let names: Vec<&str> = countries().iter().map(|c| c.name).collect();
        let name = match resolve_among(country, &names) {
            Ok(name) => name,
            Err(_) => {
                writeln!(self.out, "Invalid country name.")?;
                return Ok(());
            }
        };
        let Some(info) = countries().iter().find(|c| c.name == name) else {
            writeln!(self.out, "Invalid country name.")?;
            return Ok(());
        };

        let parsed = amounts
            .split_once(':')
            .and_then(|(a, b)| Some((a.parse::<u32>().ok()?, b.parse::<u32>().ok()?)));
        let Some((a, b)) = parsed else {
            writeln!(self.out, "{INVALID}")?;
            return Ok(());
        };

        self.session
            .debug_mutate(|game| game.set_influence(info.id, a, b))?;
        writeln!(self.out, "{}", self.session.engine().map().state_line(info.id))?;
        Ok(())
    }

    fn debug_card(&mut self, card: &str, side: &str) -> Result<(), ConsoleError> {
        let names: Vec<&str> = cards().iter().map(|c| c.name).collect();
        let name = match resolve_among(card, &names) {
            Ok(name) => name,
            Err(_) => {
                writeln!(self.out, "Invalid card name.")?;
                return Ok(());
            }
        };
        let side = match side.parse::<Side>() {
            Ok(side) if side.is_faction() => side,
            _ => {
                writeln!(self.out, "Invalid side.")?;
                return Ok(());
            }
        };

        self.session.debug_trigger_effect(name, side)?;
        writeln!(self.out, "=== {name} event triggered for {side}. ===")?;
        self.prompt()
    }
}

//! A small two-faction cold-war card game.
//!
//! Factions alternate action rounds. Each round the acting faction plays a
//! card from hand and uses it for its event, to place influence, to stage a
//! coup or to attempt the space race. Die rolls are entered by the chance
//! player. The game ends when DEFCON reaches 1, when either faction reaches
//! the victory-point threshold, or after the last turn.
//!
//! It exists to drive every kind of choice through the input-resolution
//! core, so it favours variety of decisions over faithful rules.

pub mod cards;
pub mod effects;
mod game;
pub mod map;

pub use cards::{CardAction, CardId, CardInfo};
pub use effects::{effect_for, EffectHandler};
pub use game::{
    ColdWarBuilder, ColdWarGame, GameResult, InputState, Resolution, Settings, Stage, DEFCON_MAX,
};
pub use map::{CountryId, CountryInfo, Region};

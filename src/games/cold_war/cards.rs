//! Card catalog.
//!
//! Cards are static data addressed by `CardId`. Which card is where (hand,
//! draw pile, discard) is tracked by the game state, never here.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::core::Side;

/// Catalog index of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

/// What a played card is used for.
///
/// Discriminants are the identifiers shown to the user, so they never
/// change between prompts.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[repr(u32)]
pub enum CardAction {
    Event = 1,
    Influence = 2,
    Coup = 3,
    Space = 4,
}

impl CardAction {
    /// Stable identifier of this action.
    #[must_use]
    pub const fn id(self) -> u32 {
        self as u32
    }
}

/// Static card data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardInfo {
    pub id: CardId,
    pub name: &'static str,
    /// Operations value used for influence, coups and space attempts.
    pub ops: u32,
    /// Faction whose event this is; `Neutral` events benefit whoever plays them.
    pub owner: Side,
    /// Whether the card leaves the game after its event is played.
    pub removed_after_event: bool,
    pub text: &'static str,
}

const fn card(
    id: u32,
    name: &'static str,
    ops: u32,
    owner: Side,
    removed_after_event: bool,
    text: &'static str,
) -> CardInfo {
    CardInfo {
        id: CardId(id),
        name,
        ops,
        owner,
        removed_after_event,
        text,
    }
}

use Side::{FactionA as A, FactionB as B, Neutral as N};

static CARDS: [CardInfo; 16] = [
    card(1, "Duck and Cover", 3, A, false,
        "Degrade DEFCON by one. Faction A gains VP equal to 5 minus DEFCON."),
    card(2, "Fidel", 2, B, true,
        "Remove all Faction A influence from Cuba. Faction B gains enough influence to control it."),
    card(3, "Marshall Plan", 4, A, true,
        "Faction A adds one influence in each of up to 7 European countries."),
    card(4, "Comecon", 3, B, true,
        "Faction B adds one influence in each of up to 4 European countries."),
    card(5, "Decolonization", 2, B, false,
        "Faction B adds one influence in each of 4 countries in Africa or Asia."),
    card(6, "Olympic Games", 2, N, false,
        "The opponent participates (both roll, sponsor +2, winner gains 2 VP) or boycotts \
         (DEFCON degrades, sponsor places 4 influence)."),
    card(7, "Nuclear Test Ban", 4, N, false,
        "The player gains VP equal to DEFCON minus 2, then DEFCON improves by two."),
    card(8, "Arab-Israeli War", 2, B, false,
        "Faction B attacks Israel. On a roll of 4 or more Faction B gains 2 VP and takes over \
         Faction A's influence there."),
    card(9, "Truman Doctrine", 1, A, true,
        "Remove all Faction B influence from one uncontrolled European country."),
    card(10, "Socialist Governments", 3, B, false,
        "Remove 3 Faction A influence from Europe, no more than 2 per country."),
    card(11, "Warsaw Pact Formed", 3, B, true,
        "Either remove all Faction A influence from up to 4 European countries or add 5 \
         influence in Europe."),
    card(12, "Captured Nazi Scientist", 1, N, true,
        "The player advances one step on the space race and gains 1 VP."),
    card(13, "De Gaulle Leads France", 3, B, true,
        "Remove 2 Faction A influence from France and add 1 Faction B influence there."),
    card(14, "Independent Reds", 2, A, true,
        "Faction A matches Faction B's influence in Poland or East Germany."),
    card(15, "Voice of America", 2, A, false,
        "Remove 4 Faction B influence outside Europe, no more than 2 per country."),
    card(16, "Nasser", 1, B, true,
        "Faction B adds 2 influence in Egypt. Faction A loses half its influence there."),
];

/// All cards in catalog order.
#[must_use]
pub fn cards() -> &'static [CardInfo] {
    &CARDS
}

/// Look up a card by catalog index.
#[must_use]
pub fn card_info(id: CardId) -> Option<&'static CardInfo> {
    (id.0 as usize)
        .checked_sub(1)
        .and_then(|i| CARDS.get(i))
}

/// Look up a card by exact name.
#[must_use]
pub fn find_card(name: &str) -> Option<&'static CardInfo> {
    CARDS.iter().find(|c| c.name == name)
}

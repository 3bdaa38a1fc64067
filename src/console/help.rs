//! Help texts.

pub const GENERAL: &str = "\
The following commands are available:
?           Displays this help text.
s           Displays the overall game state.
m ?         Shows help on move queries.
s ?         Shows help on game state queries.
c ?         Shows help on card information queries.
dbg ?       Shows help on debugging.

new         Start a new game.
quit        Exit the game.";

pub const MOVE: &str = "\
m                   Lists all possible moves, along with their identifiers.
m <name|id>         Makes the move with the name or with the identifier. The name can be
                    abbreviated to its first characters as long as it is unambiguous.
m <m1 m2 m3 ...>    Makes multiple moves in order m1, m2, m3, ...
m <yes|no>          Commits or undoes the moves once a choice is complete.";

pub const CARD: &str = "\
c           Display a list of cards in the current player's hand.
c <id|name> Display information about a card.
c opp       Display the number of cards in the opponent's hand.
c dis       Display a list of cards in the discard pile.
c rem       Display a list of removed cards.
c dec       Display the number of cards in the draw pile.";

pub const STATE: &str = "\
s                       Displays the overall game state.
s <eu|as|me|af|na|sa>   Displays control and country data for the given region.";

pub const DEBUG: &str = "\
dbg                             Starts debugging mode.
dbg inf set <country> <a>:<b>   Sets the influence of both factions in a country.
dbg card <card> <a|b>           Triggers the card event as the given side.
dbg rollback                    Restores the state before debugging started.";

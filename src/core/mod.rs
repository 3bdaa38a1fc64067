//! Core engine types: acting sides and deterministic randomness.
//!
//! These are shared by the input-resolution core and by concrete rules
//! engines. They carry no game rules of their own.

pub mod rng;
pub mod side;

pub use rng::{GameRng, GameRngState};
pub use side::{ParseSideError, Side, SideMap};

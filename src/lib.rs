//! Noughts engine library.
//!
//! Exposes the board representation, lookahead primitives, the move
//! strategies, and the self-play arena for use by integration tests and the
//! binary entry point.

pub mod board;
pub mod lookahead;
pub mod notation;
pub mod selfplay;
pub mod strategy;

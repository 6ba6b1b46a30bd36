//! Controller layer: worker events, the board state container, and command orchestration.

pub mod board;
pub mod events;
pub mod orchestration;

//! UI composition: app shell and the views it lends board state to.

pub mod app;
pub mod card;
pub mod form;
pub mod theme;

//! Hexforge - procedural world generation and AI claim bookkeeping for a
//! hex-based strategy game

pub mod ai;
pub mod core;
pub mod data;
pub mod map;
pub mod mapgen;
pub mod player;

//! Per-player state consulted by the generators and the AI

pub mod knowledge;

pub use knowledge::Knowledge;

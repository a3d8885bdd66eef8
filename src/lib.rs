//! Hexmove - hex-grid movement paths and reachability envelopes

pub mod core;
pub mod movement;

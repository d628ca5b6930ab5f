pub mod action;
pub mod synth;
pub mod warp;

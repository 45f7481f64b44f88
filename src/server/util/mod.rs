//! Helpers shared by the command layer.

pub mod parse;

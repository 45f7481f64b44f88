//! Database repository layer.
//!
//! Repositories build their statements with SeaQuery against the declared table layouts
//! from the `migration` crate and hand raw rows to the model layer for decoding. All
//! database queries, inserts and deletes are performed through these repositories.

pub mod guild_config;

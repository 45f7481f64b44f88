//! Declarative schema for the bot's SQLite store.
//!
//! Tables are described as data ([`TableSpec`] holding an ordered list of
//! [`ColumnSpec`]) rather than as a chain of numbered migrations. On startup the
//! application hands each declared table to [`ensure_table`], which creates the
//! table when it is missing and otherwise adds any declared column the stored
//! table lacks, backfilled with the column's declared default.
//!
//! The declared list is the single source of truth and evolves additively only:
//! columns are appended, never renamed or removed.

pub use sea_orm_migration::prelude::*;

pub mod guild_config;
pub mod schema;

pub use schema::{ensure_table, ColumnSpec, EnsureOutcome, TableSpec};

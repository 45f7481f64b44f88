//! Domain models.
//!
//! `guild_config` is the typed view of a stored configuration row; `lockdown` holds the
//! in-memory lock state. Both are plain data with no I/O.

pub mod guild_config;
pub mod lockdown;

//! Service layer for business logic and orchestration.
//!
//! This module sits between the commands and the data layer. Services are responsible
//! for:
//!
//! - **Configuration**: Reading and writing per-guild configuration records
//! - **Lockdown**: The channel lock state machine and its Discord side effects
//! - **Audit Logging**: Mirroring moderation actions to configured log channels

pub mod guild_config;
pub mod lockdown;
pub mod mod_log;

#[cfg(test)]
mod test;

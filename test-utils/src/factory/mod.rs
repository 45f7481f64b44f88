//! Factory methods for creating test data.
//!
//! Factories insert rows directly through the query builder, bypassing the
//! application's repositories, so tests can set up stored state (including rows
//! written under an older table declaration) without depending on the code under
//! test.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! // Default row with a fresh guild id
//! let guild_id = factory::guild_config::create_guild_config(&db).await?;
//!
//! // Custom row
//! let guild_id = factory::guild_config::GuildConfigFactory::new(&db)
//!     .guild_id("123")
//!     .column("prefix", "!")
//!     .build()
//!     .await?;
//! ```

pub mod guild_config;
pub mod helpers;

pub use guild_config::create_guild_config;

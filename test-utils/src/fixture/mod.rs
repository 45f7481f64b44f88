//! Test fixtures providing reusable test data without database insertion.
//!
//! Unlike factories, fixtures do NOT insert data into the database. They describe
//! things tests set up with, such as table layouts from older releases.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, fixture};
//!
//! // Database created the way an older release left it
//! let test = TestBuilder::new()
//!     .with_table(&fixture::guild_config::LEGACY_GUILD_CONFIG)
//!     .build()
//!     .await?;
//! ```

pub mod guild_config;

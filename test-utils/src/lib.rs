//! Senko Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests for the bot.
//! This crate offers a builder pattern for creating test contexts backed by in-memory
//! SQLite databases migrated to the declared schema.
//!
//! # Overview
//!
//! The test utilities consist of these main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Inserts rows for test setup
//! - **fixture**: In-memory test data such as historical table layouts
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use migration::guild_config::GUILD_CONFIG;
//!
//! #[tokio::test]
//! async fn reads_config() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(&GUILD_CONFIG)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;

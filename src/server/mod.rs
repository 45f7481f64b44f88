//! Moderation bot backend.
//!
//! This module contains the complete bot: startup, Discord integration, business logic
//! and data access. The bot uses poise on top of Serenity for commands and gateway
//! events, and SeaORM over SQLite for per-guild configuration.
//!
//! # Architecture
//!
//! The bot follows a layered architecture with clear separation of concerns:
//!
//! - **Bot Layer** (`bot/`) - Framework setup, commands and gateway event handlers
//! - **Service Layer** (`service/`) - Guild configuration, channel lockdown and audit logging
//! - **Data Layer** (`data/`) - Database operations on the declared `guild_config` table
//! - **Model Layer** (`model/`) - Domain models for configuration and lock state
//! - **Error Layer** (`error/`) - Application error types and user-facing messages
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **Startup** (`startup`) - Database connection and schema update
//! - **Scheduler** (`scheduler/`) - Keyed, cancellable delayed actions
//! - **Util** (`util/`) - Parsing of user-typed command arguments
//!
//! # Command Flow
//!
//! 1. **poise** parses a slash or prefix invocation and runs its permission checks
//! 2. **Command** validates the arguments and calls a service
//! 3. **Service** loads or updates configuration, or drives the lock state machine
//! 4. **Command** replies and mirrors the action to the guild's log channel
//! 5. Errors surface through the framework's error hook, which logs them and replies

pub mod bot;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;

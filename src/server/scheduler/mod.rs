//! Background work scheduled by the bot.
//!
//! - **Deferred actions** (`deferred`) - keyed, cancellable one-shot delays used for the
//!   unlock grace period and for removing transient command replies

pub mod deferred;

//! Gateway event handlers.
//!
//! poise forwards every gateway event to `handle_event` after its own command
//! processing; only the events the bot reacts to are dispatched further.

use serenity::all::{Context, FullEvent};

use crate::server::{bot::Data, error::AppError};

pub mod message;
pub mod ready;

/// Dispatches a gateway event to its handler.
///
/// Handlers log their own failures, so this never returns an error.
pub async fn handle_event(
    ctx: &Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Data, AppError>,
    data: &Data,
) -> Result<(), AppError> {
    match event {
        FullEvent::Ready { data_about_bot } => ready::handle_ready(ctx, data_about_bot).await,
        FullEvent::Message { new_message } => message::handle_message(data, new_message).await,
        _ => {}
    }

    Ok(())
}

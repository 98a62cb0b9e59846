pub mod commissions;
pub mod navigate;
pub mod remove;
pub mod search;
pub mod view_record;

use crate::{
    bot_handler::{BotHandlerError, BotHandlerResult, CommandState, Context},
    records::ListingCursor,
    storage::RecordKind,
};

/// Returns the callback query being handled.
fn query<'a>(ctx: &Context<'a>) -> BotHandlerResult<&'a teloxide::types::CallbackQuery> {
    ctx.query.ok_or_else(|| BotHandlerError::InvalidInput("Callback query is missing".to_string()))
}

/// Answers the callback query without a notification, clearing the spinner.
pub async fn answer_silently(ctx: Context<'_>) -> BotHandlerResult<()> {
    let query = query(&ctx)?;
    ctx.handler.messaging_service.answer_callback_query(&query.id, "").await?;
    Ok(())
}

/// The cursor of the listing of `kind` the agent is browsing. Falls back to
/// the first unfiltered page when another listing, or none, is active.
async fn current_cursor(ctx: &Context<'_>, kind: RecordKind) -> BotHandlerResult<ListingCursor> {
    let state = ctx.dialogue.get().await.map_err(BotHandlerError::DialogueError)?;

    Ok(match state {
        Some(CommandState::Browsing { kind: browsing, cursor }) if browsing == kind => cursor,
        _ => ListingCursor::default(),
    })
}

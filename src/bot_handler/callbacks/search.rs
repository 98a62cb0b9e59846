use crate::{
    bot_handler::{BotHandlerError, BotHandlerResult, CommandState, Context, callbacks::query},
    storage::RecordKind,
};

/// Asks the agent for a search term.
pub async fn handle(ctx: Context<'_>, kind: RecordKind) -> BotHandlerResult<()> {
    let query = query(&ctx)?;

    ctx.handler.messaging_service.answer_callback_query(&query.id, "").await?;
    ctx.handler.messaging_service.prompt_for_search_term(ctx.message.chat.id, kind).await?;

    ctx.dialogue
        .update(CommandState::AwaitingSearchTerm { kind })
        .await
        .map_err(BotHandlerError::DialogueError)?;

    Ok(())
}

/// Handle the reply carrying the search term. The results are sent as a new
/// listing message, starting on its first page.
pub async fn handle_reply(ctx: Context<'_>, kind: RecordKind, text: &str) -> BotHandlerResult<()> {
    let chat_id = ctx.message.chat.id;
    let term = text.trim().to_string();

    let listing = ctx.handler.record_service.search(chat_id, kind, term).await?;

    ctx.handler.messaging_service.send_listing_msg(chat_id, &listing).await?;

    ctx.dialogue
        .update(CommandState::Browsing { kind, cursor: listing.cursor() })
        .await
        .map_err(BotHandlerError::DialogueError)?;

    Ok(())
}

/// Drops the search term and shows the first page of the full listing.
pub async fn handle_clear(ctx: Context<'_>, kind: RecordKind) -> BotHandlerResult<()> {
    let chat_id = ctx.message.chat.id;
    let query = query(&ctx)?;

    ctx.handler.messaging_service.answer_callback_query(&query.id, "").await?;
    let listing = ctx.handler.record_service.search(chat_id, kind, String::new()).await?;

    ctx.handler.messaging_service.edit_listing_msg(chat_id, ctx.message.id, &listing).await?;

    ctx.dialogue
        .update(CommandState::Browsing { kind, cursor: listing.cursor() })
        .await
        .map_err(BotHandlerError::DialogueError)?;

    Ok(())
}

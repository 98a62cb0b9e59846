use crate::{
    bot_handler::{
        BotHandlerError, BotHandlerResult, CommandState, Context,
        callbacks::{current_cursor, query},
    },
    records::Navigation,
    storage::RecordKind,
};

pub async fn handle(ctx: Context<'_>, kind: RecordKind, id: i64) -> BotHandlerResult<()> {
    let chat_id = ctx.message.chat.id;
    let query = query(&ctx)?;

    // Attempt to remove the record.
    let removed = ctx.handler.record_service.remove(chat_id, kind, id).await?;

    // Answer the callback query to clear the spinner.
    ctx.handler.messaging_service.answer_remove_callback_query(&query.id, removed).await?;

    // Return to the listing. A page emptied by the removal falls back to the
    // first page.
    let cursor = current_cursor(&ctx, kind).await?;
    let listing = ctx.handler.record_service.browse(chat_id, kind, cursor, Navigation::Stay).await?;

    ctx.handler.messaging_service.edit_listing_msg(chat_id, ctx.message.id, &listing).await?;

    ctx.dialogue
        .update(CommandState::Browsing { kind, cursor: listing.cursor() })
        .await
        .map_err(BotHandlerError::DialogueError)?;

    Ok(())
}

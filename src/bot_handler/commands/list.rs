use crate::{
    bot_handler::{BotHandlerError, BotHandlerResult, CommandState, Context},
    records::{ListingCursor, Navigation},
    storage::RecordKind,
};

/// Sends the first page of the unfiltered listing as a new message.
pub async fn handle(ctx: Context<'_>, kind: RecordKind) -> BotHandlerResult<()> {
    let chat_id = ctx.message.chat.id;

    let listing = ctx
        .handler
        .record_service
        .browse(chat_id, kind, ListingCursor::default(), Navigation::Stay)
        .await?;

    ctx.handler.messaging_service.send_listing_msg(chat_id, &listing).await?;

    ctx.dialogue
        .update(CommandState::Browsing { kind, cursor: listing.cursor() })
        .await
        .map_err(BotHandlerError::DialogueError)?;

    Ok(())
}

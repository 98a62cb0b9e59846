use futures::{TryFutureExt, try_join};

use crate::{
    bot_handler::{
        BotHandlerError, BotHandlerResult, CommandState, Context,
        callbacks::{current_cursor, query},
    },
    records::Navigation,
    storage::RecordKind,
};

pub async fn handle(
    ctx: Context<'_>,
    kind: RecordKind,
    navigation: Navigation,
) -> BotHandlerResult<()> {
    let chat_id = ctx.message.chat.id;
    let query = query(&ctx)?;
    let cursor = current_cursor(&ctx, kind).await?;

    // Concurrently rebuild the listing and answer the callback query.
    let (listing, _) = try_join!(
        ctx.handler
            .record_service
            .browse(chat_id, kind, cursor.clone(), navigation)
            .map_err(BotHandlerError::from),
        ctx.handler
            .messaging_service
            .answer_callback_query(&query.id, "")
            .map_err(BotHandlerError::from)
    )?;

    // Out-of-range requests leave the page as it is; Telegram rejects edits
    // that change nothing.
    if navigation != Navigation::Stay && listing.cursor() == cursor {
        tracing::debug!("Navigation {navigation:?} left the {kind} listing unchanged");
        return Ok(());
    }

    ctx.handler.messaging_service.edit_listing_msg(chat_id, ctx.message.id, &listing).await?;

    ctx.dialogue
        .update(CommandState::Browsing { kind, cursor: listing.cursor() })
        .await
        .map_err(BotHandlerError::DialogueError)?;

    Ok(())
}

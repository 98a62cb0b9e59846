use crate::{
    bot_handler::{BotHandlerResult, Context, callbacks::query},
    storage::RecordKind,
};

pub async fn handle(ctx: Context<'_>, kind: RecordKind, id: i64) -> BotHandlerResult<()> {
    let chat_id = ctx.message.chat.id;
    let query = query(&ctx)?;

    let Some(details) = ctx.handler.record_service.details(chat_id, kind, id).await? else {
        ctx.handler
            .messaging_service
            .answer_callback_query(&query.id, "❌ Η εγγραφή δεν βρέθηκε.")
            .await?;
        return Ok(());
    };

    // Answer the callback query to clear the spinner.
    ctx.handler.messaging_service.answer_callback_query(&query.id, "").await?;

    // The dialogue keeps the listing cursor, so "back" returns to the same page.
    ctx.handler.messaging_service.show_record_details(chat_id, ctx.message.id, &details).await?;

    Ok(())
}

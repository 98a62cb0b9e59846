use futures::{TryFutureExt, try_join};

use crate::bot_handler::{BotHandlerError, BotHandlerResult, Context, callbacks::query};

pub async fn handle(ctx: Context<'_>, page: usize) -> BotHandlerResult<()> {
    let chat_id = ctx.message.chat.id;
    let query = query(&ctx)?;

    let (commissions, _) = try_join!(
        ctx.handler.record_service.commissions(chat_id, page).map_err(BotHandlerError::from),
        ctx.handler
            .messaging_service
            .answer_callback_query(&query.id, "")
            .map_err(BotHandlerError::from)
    )?;

    ctx.handler
        .messaging_service
        .edit_commissions_msg(chat_id, ctx.message.id, &commissions)
        .await?;

    Ok(())
}

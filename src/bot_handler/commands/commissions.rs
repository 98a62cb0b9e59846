use crate::bot_handler::{BotHandlerResult, Context};

pub async fn handle(ctx: Context<'_>) -> BotHandlerResult<()> {
    let chat_id = ctx.message.chat.id;

    let commissions = ctx.handler.record_service.commissions(chat_id, 1).await?;
    ctx.handler.messaging_service.send_commissions_msg(chat_id, &commissions).await?;

    Ok(())
}

use crate::bot_handler::{BotHandlerError, BotHandlerResult, CommandState, Context};

pub async fn handle(ctx: Context<'_>) -> BotHandlerResult<()> {
    ctx.handler.messaging_service.send_start_msg(ctx.message.chat.id).await?;
    ctx.dialogue.update(CommandState::None).await.map_err(BotHandlerError::DialogueError)?;
    Ok(())
}

mod callback_actions;
mod callbacks;
mod commands;
#[cfg(test)]
mod test_helpers;

use std::sync::Arc;

pub use callback_actions::CallbackAction;
pub use commands::add::AddSummary;
use serde::{Deserialize, Serialize};
use teloxide::{
    dispatching::dialogue::{Dialogue, SqliteStorage, SqliteStorageError, serializer::Json},
    prelude::*,
    types::Message,
    utils::command::BotCommands,
};
use thiserror::Error;

use crate::{
    messaging::{MessagingError, MessagingService},
    records::{ListingCursor, Navigation, RecordService, RecordServiceError},
    storage::RecordKind,
};

/// Persistent storage for per-chat dialogue state.
pub type DialogueStorage = SqliteStorage<Json>;

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Διαθέσιμες εντολές:")]
pub enum Command {
    #[command(description = "Έναρξη και μήνυμα καλωσορίσματος.")]
    Start,
    #[command(description = "Εμφάνιση αυτής της βοήθειας.")]
    Help,
    #[command(description = "Λίστα αιτήσεων με αναζήτηση και σελίδες.")]
    Applications,
    #[command(description = "Λίστα πελατών με αναζήτηση και σελίδες.")]
    Customers,
    #[command(description = "Καταχώριση πελατών, ένας ανά γραμμή.")]
    AddCustomer,
    #[command(description = "Καταχώριση αιτήσεων, μία ανά γραμμή.")]
    AddApplication,
    #[command(description = "Σύνολα προμηθειών ανά εταιρεία.")]
    Commissions,
}

/// The state of the conversation with an agent.
#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandState {
    #[default]
    None,
    AwaitingRecords {
        kind: RecordKind,
    },
    AwaitingSearchTerm {
        kind: RecordKind,
    },
    /// A listing is on screen; its cursor survives restarts.
    Browsing {
        kind: RecordKind,
        cursor: ListingCursor,
    },
}

#[derive(Debug, Error)]
pub enum BotHandlerError {
    #[error("Μη έγκυρη είσοδος: {0}")]
    InvalidInput(String),
    #[error("Dialogue error: {0}")]
    DialogueError(SqliteStorageError<serde_json::Error>),
    #[error(transparent)]
    RecordService(#[from] RecordServiceError),
    #[error("Messaging error: {0}")]
    Messaging(#[from] MessagingError),
}

impl BotHandlerError {
    /// Errors caused by what the agent sent rather than by the bot.
    fn is_user_facing(&self) -> bool {
        matches!(
            self,
            BotHandlerError::InvalidInput(_)
                | BotHandlerError::RecordService(
                    RecordServiceError::LimitExceeded(_)
                        | RecordServiceError::CommissionOverflow(_)
                )
        )
    }
}

pub type BotHandlerResult<T> = Result<T, BotHandlerError>;

/// Context groups the data needed by all command and callback handlers.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub handler: &'a BotHandler,
    pub message: &'a Message,
    pub dialogue: &'a Dialogue<CommandState, DialogueStorage>,
    pub query: Option<&'a CallbackQuery>,
}

/// Encapsulates the messaging and record services.
pub struct BotHandler {
    messaging_service: Arc<dyn MessagingService>,
    record_service: Arc<dyn RecordService>,
    max_concurrency: usize,
}

impl BotHandler {
    /// Creates a new `BotHandler` instance.
    pub fn new(
        messaging_service: Arc<dyn MessagingService>,
        record_service: Arc<dyn RecordService>,
        max_concurrency: usize,
    ) -> Self {
        Self { messaging_service, record_service, max_concurrency }
    }

    /// Dispatches the incoming command to the appropriate handler.
    pub async fn handle_commands(
        &self,
        msg: &Message,
        cmd: Command,
        dialogue: Dialogue<CommandState, DialogueStorage>,
    ) -> BotHandlerResult<()> {
        tracing::debug!("Handling command {cmd:?} in chat {}", msg.chat.id);
        let ctx = Context { handler: self, message: msg, dialogue: &dialogue, query: None };

        let result = match cmd {
            Command::Start => commands::start::handle(ctx).await,
            Command::Help => commands::help::handle(ctx).await,
            Command::Applications => commands::list::handle(ctx, RecordKind::Applications).await,
            Command::Customers => commands::list::handle(ctx, RecordKind::Customers).await,
            Command::AddCustomer => commands::add::handle(ctx, RecordKind::Customers).await,
            Command::AddApplication => commands::add::handle(ctx, RecordKind::Applications).await,
            Command::Commissions => commands::commissions::handle(ctx).await,
        };

        self.report_user_errors(msg.chat.id, result).await
    }

    /// Handles a reply to one of the bot's force-reply prompts.
    pub async fn handle_reply(
        &self,
        msg: &Message,
        dialogue: &Dialogue<CommandState, DialogueStorage>,
    ) -> BotHandlerResult<()> {
        let state = dialogue.get().await.map_err(BotHandlerError::DialogueError)?;
        let text = msg.text().unwrap_or_default();
        let ctx = Context { handler: self, message: msg, dialogue, query: None };

        let result = match state {
            Some(CommandState::AwaitingRecords { kind }) => {
                commands::add::handle_reply(ctx, kind, text).await
            }
            Some(CommandState::AwaitingSearchTerm { kind }) => {
                callbacks::search::handle_reply(ctx, kind, text).await
            }
            _ => Err(BotHandlerError::InvalidInput(
                "Δεν αναμενόταν απάντηση. Χρησιμοποιήστε τα κουμπιά ή τις εντολές.".to_string(),
            )),
        };

        self.report_user_errors(msg.chat.id, result).await
    }

    /// Handles a press on an inline keyboard button.
    pub async fn handle_callback_query(
        &self,
        query: &CallbackQuery,
        dialogue: Dialogue<CommandState, DialogueStorage>,
    ) -> BotHandlerResult<()> {
        let Some(data) = query.data.as_deref() else {
            tracing::warn!("Callback query {} carries no data", query.id);
            return Ok(());
        };
        let Some(message) = query.message.as_ref().and_then(|m| m.regular_message()) else {
            tracing::warn!("Callback query {} has no accessible message", query.id);
            return Ok(());
        };

        let ctx = Context { handler: self, message, dialogue: &dialogue, query: Some(query) };
        let result = match serde_json::from_str::<CallbackAction>(data) {
            Ok(action) => {
                tracing::debug!("Handling callback action {action:?} in chat {}", message.chat.id);
                self.dispatch_callback_action(ctx, action).await
            }
            Err(e) => Err(BotHandlerError::InvalidInput(format!("Άγνωστη ενέργεια '{data}': {e}"))),
        };

        self.report_user_errors(message.chat.id, result).await
    }

    async fn dispatch_callback_action(
        &self,
        ctx: Context<'_>,
        action: CallbackAction,
    ) -> BotHandlerResult<()> {
        match action {
            CallbackAction::GoToPage(kind, page) => {
                callbacks::navigate::handle(ctx, kind, Navigation::GoTo(page)).await
            }
            CallbackAction::NextPage(kind) => {
                callbacks::navigate::handle(ctx, kind, Navigation::Next).await
            }
            CallbackAction::PrevPage(kind) => {
                callbacks::navigate::handle(ctx, kind, Navigation::Prev).await
            }
            CallbackAction::FirstPage(kind) => {
                callbacks::navigate::handle(ctx, kind, Navigation::First).await
            }
            CallbackAction::LastPage(kind) => {
                callbacks::navigate::handle(ctx, kind, Navigation::Last).await
            }
            CallbackAction::BackToList(kind) => {
                callbacks::navigate::handle(ctx, kind, Navigation::Stay).await
            }
            CallbackAction::ViewRecord(kind, id) => {
                callbacks::view_record::handle(ctx, kind, id).await
            }
            CallbackAction::RemoveRecord(kind, id) => {
                callbacks::remove::handle(ctx, kind, id).await
            }
            CallbackAction::Search(kind) => callbacks::search::handle(ctx, kind).await,
            CallbackAction::ClearSearch(kind) => callbacks::search::handle_clear(ctx, kind).await,
            CallbackAction::CommissionsPage(page) => {
                callbacks::commissions::handle(ctx, page).await
            }
            CallbackAction::Noop => callbacks::answer_silently(ctx).await,
            // Command keyboard actions
            CallbackAction::CmdHelp => {
                callbacks::answer_silently(ctx).await?;
                commands::help::handle(ctx).await
            }
            CallbackAction::CmdApplications => {
                callbacks::answer_silently(ctx).await?;
                commands::list::handle(ctx, RecordKind::Applications).await
            }
            CallbackAction::CmdCustomers => {
                callbacks::answer_silently(ctx).await?;
                commands::list::handle(ctx, RecordKind::Customers).await
            }
            CallbackAction::CmdAddCustomer => {
                callbacks::answer_silently(ctx).await?;
                commands::add::handle(ctx, RecordKind::Customers).await
            }
            CallbackAction::CmdAddApplication => {
                callbacks::answer_silently(ctx).await?;
                commands::add::handle(ctx, RecordKind::Applications).await
            }
            CallbackAction::CmdCommissions => {
                callbacks::answer_silently(ctx).await?;
                commands::commissions::handle(ctx).await
            }
        }
    }

    /// Reports errors caused by the agent's input back to the chat. Other
    /// errors are returned to the dispatcher.
    async fn report_user_errors(
        &self,
        chat_id: ChatId,
        result: BotHandlerResult<()>,
    ) -> BotHandlerResult<()> {
        match result {
            Err(error) if error.is_user_facing() => {
                tracing::warn!("Rejected request in chat {chat_id}: {error}");
                self.messaging_service.send_error_msg(chat_id, error).await?;
                Ok(())
            }
            other => other,
        }
    }
}

mod keyboards;
#[cfg(test)]
mod tests;
mod utils;

use async_trait::async_trait;
use mockall::automock;
use teloxide::{
    prelude::*,
    types::{ChatId, ForceReply, InlineKeyboardMarkup, MessageId, ParseMode},
    utils::{command::BotCommands, html},
};
use thiserror::Error;

use crate::{
    bot_handler::{AddSummary, BotHandlerError, Command},
    messaging::keyboards::{
        COMMAND_KEYBOARD, build_commissions_keyboard, build_details_keyboard,
        build_listing_keyboard,
    },
    pagination::Paginated,
    records::{CommissionTotal, Listing, RecordDetails},
    storage::RecordKind,
};

#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("Teloxide API request failed: {0}")]
    TeloxideRequest(#[from] teloxide::RequestError),
}

type Result<T> = std::result::Result<T, MessagingError>;

/// Trait for sending messages to the user.
#[automock]
#[async_trait]
pub trait MessagingService: Send + Sync {
    /// Sends a text message to the provided chat with a keyboard. If no
    /// keyboard is provided, the default command keyboard is used.
    async fn send_response_with_keyboard(
        &self,
        chat_id: ChatId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()>;

    /// Sends a plain text message and returns it, so it can be edited later.
    async fn send_text_message(&self, chat_id: ChatId, text: &str) -> Result<Message>;

    /// Asks the agent to reply with records, one per line.
    async fn prompt_for_records_input(&self, chat_id: ChatId, kind: RecordKind) -> Result<()>;

    /// Asks the agent to reply with a search term.
    async fn prompt_for_search_term(&self, chat_id: ChatId, kind: RecordKind) -> Result<()>;

    /// Sends an error message to the provided chat.
    async fn send_error_msg(&self, chat_id: ChatId, error: BotHandlerError) -> Result<()>;

    /// Sends a help message to the user.
    async fn send_help_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Sends a start message to the user.
    async fn send_start_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Sends a new listing message with its pagination keyboard.
    async fn send_listing_msg(&self, chat_id: ChatId, listing: &Listing) -> Result<()>;

    /// Replaces the text and keyboard of an existing listing message.
    async fn edit_listing_msg(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        listing: &Listing,
    ) -> Result<()>;

    /// Answers a callback query to clear the spinner. An empty `text` shows
    /// no notification.
    async fn answer_callback_query(&self, query_id: &str, text: &str) -> Result<()>;

    /// Answers a remove callback query with the outcome.
    async fn answer_remove_callback_query(&self, query_id: &str, removed: bool) -> Result<()>;

    /// Replaces a listing message with the details of one record.
    async fn show_record_details(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        details: &RecordDetails,
    ) -> Result<()>;

    /// Replaces the status message of an add operation with its summary.
    async fn edit_add_summary_msg(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        summary: &AddSummary,
    ) -> Result<()>;

    /// Sends the commission totals.
    async fn send_commissions_msg(
        &self,
        chat_id: ChatId,
        page: &Paginated<CommissionTotal>,
    ) -> Result<()>;

    /// Replaces a commissions message with another page.
    async fn edit_commissions_msg(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        page: &Paginated<CommissionTotal>,
    ) -> Result<()>;
}

/// Telegram messaging service.
pub struct TelegramMessagingService {
    bot: Bot,
}

impl TelegramMessagingService {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    async fn edit_html_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: String,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<()> {
        self.bot
            .edit_message_text(chat_id, message_id, text)
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard)
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }

    async fn force_reply(&self, chat_id: ChatId, prompt: String) -> Result<()> {
        self.bot
            .send_message(chat_id, prompt)
            .reply_markup(ForceReply::new())
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }
}

#[async_trait]
impl MessagingService for TelegramMessagingService {
    async fn send_response_with_keyboard(
        &self,
        chat_id: ChatId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()> {
        // If no keyboard is provided, use the default command keyboard.
        let keyboard = keyboard.unwrap_or(COMMAND_KEYBOARD.clone());

        self.bot
            .send_message(chat_id, text)
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard)
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }

    async fn send_text_message(&self, chat_id: ChatId, text: &str) -> Result<Message> {
        self.bot.send_message(chat_id, text).await.map_err(MessagingError::TeloxideRequest)
    }

    async fn prompt_for_records_input(&self, chat_id: ChatId, kind: RecordKind) -> Result<()> {
        let prompt = match kind {
            RecordKind::Customers => {
                "Στείλτε έναν πελάτη ανά γραμμή, στη μορφή:\n\
                 Ονοματεπώνυμο; ΑΦΜ; Τηλέφωνο; Email; Πόλη\n\
                 (το email και η πόλη είναι προαιρετικά)"
            }
            RecordKind::Applications => {
                "Στείλτε μία αίτηση ανά γραμμή, στη μορφή:\n\
                 Πελάτης; ΑΦΜ; Εταιρεία; Προϊόν; Προμήθεια; ΗΗ/ΜΜ/ΕΕΕΕ; Κατάσταση\n\
                 (η κατάσταση είναι προαιρετική)"
            }
        };
        self.force_reply(chat_id, prompt.to_string()).await
    }

    async fn prompt_for_search_term(&self, chat_id: ChatId, kind: RecordKind) -> Result<()> {
        self.force_reply(chat_id, format!("🔎 Γράψτε όρο αναζήτησης ({kind}):")).await
    }

    async fn send_error_msg(&self, chat_id: ChatId, error: BotHandlerError) -> Result<()> {
        self.send_response_with_keyboard(chat_id, html::escape(&error.to_string()), None).await
    }

    async fn send_help_msg(&self, chat_id: ChatId) -> Result<()> {
        let help_text = Command::descriptions();
        self.send_response_with_keyboard(
            chat_id,
            html::escape(&help_text.to_string()),
            Some(COMMAND_KEYBOARD.clone()),
        )
        .await
    }

    async fn send_start_msg(&self, chat_id: ChatId) -> Result<()> {
        let start_text = "👋 Καλώς ήρθατε! Διαχειριστείτε τις αιτήσεις, τους πελάτες και τις \
                          προμήθειές σας με τα παρακάτω κουμπιά.";
        self.send_response_with_keyboard(chat_id, start_text.to_string(), None).await
    }

    async fn send_listing_msg(&self, chat_id: ChatId, listing: &Listing) -> Result<()> {
        self.send_response_with_keyboard(
            chat_id,
            utils::format_listing_text(listing),
            Some(build_listing_keyboard(listing)),
        )
        .await
    }

    async fn edit_listing_msg(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        listing: &Listing,
    ) -> Result<()> {
        self.edit_html_message(
            chat_id,
            message_id,
            utils::format_listing_text(listing),
            build_listing_keyboard(listing),
        )
        .await
    }

    async fn answer_callback_query(&self, query_id: &str, text: &str) -> Result<()> {
        let mut request = self.bot.answer_callback_query(query_id);
        if !text.is_empty() {
            request = request.text(text);
        }

        request.await.map(|_| ()).map_err(MessagingError::TeloxideRequest)
    }

    async fn answer_remove_callback_query(&self, query_id: &str, removed: bool) -> Result<()> {
        let removed_msg =
            if removed { "✅ Η εγγραφή διαγράφηκε." } else { "❌ Η εγγραφή δεν βρέθηκε." };

        self.answer_callback_query(query_id, removed_msg).await
    }

    async fn show_record_details(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        details: &RecordDetails,
    ) -> Result<()> {
        let keyboard = match details {
            RecordDetails::Application(application) => {
                build_details_keyboard(RecordKind::Applications, application.id)
            }
            RecordDetails::Customer(customer) => {
                build_details_keyboard(RecordKind::Customers, customer.id)
            }
        };

        self.edit_html_message(chat_id, message_id, utils::format_record_details(details), keyboard)
            .await
    }

    async fn edit_add_summary_msg(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        summary: &AddSummary,
    ) -> Result<()> {
        self.edit_html_message(
            chat_id,
            message_id,
            utils::format_add_summary(summary),
            COMMAND_KEYBOARD.clone(),
        )
        .await
    }

    async fn send_commissions_msg(
        &self,
        chat_id: ChatId,
        page: &Paginated<CommissionTotal>,
    ) -> Result<()> {
        self.send_response_with_keyboard(
            chat_id,
            utils::format_commissions_text(page),
            Some(build_commissions_keyboard(page)),
        )
        .await
    }

    async fn edit_commissions_msg(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        page: &Paginated<CommissionTotal>,
    ) -> Result<()> {
        self.edit_html_message(
            chat_id,
            message_id,
            utils::format_commissions_text(page),
            build_commissions_keyboard(page),
        )
        .await
    }
}

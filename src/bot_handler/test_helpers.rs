use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::*;
use teloxide::{
    dispatching::dialogue::{Dialogue, serializer},
    types::{
        Chat, ChatId, ChatKind, ChatPrivate, MaybeInaccessibleMessage, MediaKind, MediaText,
        Message, MessageCommon, MessageId, MessageKind, User,
    },
};

use super::*;
use crate::{
    bot_handler::{BotHandler, Command, CommandState},
    messaging::MockMessagingService,
    pagination::Paginator,
    records::{ListEntry, Listing, MockRecordService},
};

pub const CHAT_ID: ChatId = ChatId(123);
pub const STATUS_MSG_TEXT: &str = "Επεξεργασία... ⏳";

// Test harness to encapsulate common test setup and actions.
pub struct TestHarness {
    bot_handler: BotHandler,
    pub dialogue: Dialogue<CommandState, DialogueStorage>,
    storage: Arc<DialogueStorage>,
}

impl TestHarness {
    // Creates a new TestHarness with mock services.
    pub async fn new(
        mock_messaging: MockMessagingService,
        mock_records: MockRecordService,
    ) -> Self {
        let max_concurrency = 10;
        let bot_handler =
            BotHandler::new(Arc::new(mock_messaging), Arc::new(mock_records), max_concurrency);
        let storage = DialogueStorage::open("sqlite::memory:", serializer::Json).await.unwrap();
        let dialogue = Dialogue::<CommandState, DialogueStorage>::new(storage.clone(), CHAT_ID);

        Self { bot_handler, dialogue, storage }
    }

    // Creates a new dialogue for the same chat ID to test state persistence.
    pub fn new_dialogue(&self) -> Dialogue<CommandState, DialogueStorage> {
        Dialogue::new(self.storage.clone(), CHAT_ID)
    }

    // Simulates handling a command message.
    pub async fn handle_command(&self, command: Command) -> Result<(), BotHandlerError> {
        let text = format!("/{command:?}").to_lowercase();
        let msg = mock_message(CHAT_ID, &text);
        self.bot_handler.handle_commands(&msg, command, self.dialogue.clone()).await
    }

    // Simulates handling a reply to a force-reply prompt.
    pub async fn handle_reply(&self, text: &str) -> Result<(), BotHandlerError> {
        let mut msg = mock_message(CHAT_ID, text);
        if let MessageKind::Common(common) = &mut msg.kind {
            common.reply_to_message = Some(Box::new(mock_message(CHAT_ID, "prompt")));
        }
        self.bot_handler.handle_reply(&msg, &self.dialogue).await
    }

    // Simulates handling a callback query with an explicit dialogue. Use it to
    // check that state persists across dialogue instances.
    pub async fn handle_callback_with_dialogue(
        &self,
        action: &CallbackAction,
        dialogue: Dialogue<CommandState, DialogueStorage>,
    ) -> Result<(), BotHandlerError> {
        let (_, query) = mock_callback_query(CHAT_ID, action);
        self.bot_handler.handle_callback_query(&query, dialogue).await
    }

    // Simulates handling a callback query with the main dialogue.
    pub async fn handle_callback(&self, action: &CallbackAction) -> Result<(), BotHandlerError> {
        self.handle_callback_with_dialogue(action, self.dialogue.clone()).await
    }

    // Simulates a callback query whose data is not a known action.
    pub async fn handle_raw_callback(&self, data: &str) -> Result<(), BotHandlerError> {
        let (_, mut query) = mock_callback_query(CHAT_ID, &CallbackAction::Noop);
        query.data = Some(data.to_string());
        self.bot_handler.handle_callback_query(&query, self.dialogue.clone()).await
    }

    pub async fn state(&self) -> Option<CommandState> {
        self.dialogue.get().await.unwrap()
    }

    pub async fn set_state(&self, state: CommandState) {
        self.dialogue.update(state).await.unwrap();
    }
}

// Builds a listing of `total_items` records positioned on `page`.
pub fn listing(kind: RecordKind, total_items: usize, page: usize, search_term: &str) -> Listing {
    let entries: Vec<ListEntry> = (1..=total_items)
        .map(|id| ListEntry { id: id as i64, label: format!("Εγγραφή {id}") })
        .collect();
    let mut paginator = Paginator::new(entries, 10).unwrap();
    paginator.go_to_page(page);

    Listing { kind, page: paginator.snapshot(), search_term: search_term.to_string() }
}

pub fn cursor(page: usize, search_term: &str) -> ListingCursor {
    ListingCursor { page, search_term: search_term.to_string() }
}

// Helper to create a mock teloxide message to reduce boilerplate in tests
pub fn mock_message(chat_id: ChatId, text: &str) -> Message {
    Message {
        id: MessageId(1),
        date: Utc::now(),
        chat: Chat {
            id: chat_id,
            kind: ChatKind::Private(ChatPrivate {
                username: Some("test".to_string()),
                first_name: Some("Test".to_string()),
                last_name: None,
            }),
        },
        kind: MessageKind::Common(MessageCommon {
            media_kind: MediaKind::Text(MediaText {
                text: text.to_string(),
                entities: vec![],
                link_preview_options: None,
            }),
            reply_to_message: None,
            reply_markup: None,
            edit_date: None,
            author_signature: None,
            has_protected_content: false,
            is_automatic_forward: false,
            effect_id: None,
            forward_origin: None,
            external_reply: None,
            quote: None,
            reply_to_story: None,
            sender_boost_count: None,
            is_from_offline: false,
            business_connection_id: None,
        }),
        from: None,
        is_topic_message: false,
        sender_business_bot: None,
        sender_chat: None,
        thread_id: None,
        via_bot: None,
    }
}

// Helper to create a mock callback query
pub fn mock_callback_query(chat_id: ChatId, action: &CallbackAction) -> (Message, CallbackQuery) {
    let msg = mock_message(chat_id, "Listing with a keyboard.");
    let query = CallbackQuery {
        id: "test_callback_id".to_string(),
        from: User {
            id: UserId(1),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: None,
            username: Some("testuser".to_string()),
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        },
        message: Some(MaybeInaccessibleMessage::Regular(Box::new(msg.clone()))),
        inline_message_id: None,
        chat_instance: "test_instance".to_string(),
        data: Some(serde_json::to_string(action).unwrap()),
        game_short_name: None,
    };
    (msg, query)
}

pub fn expect_silent_answer(mock_messaging: &mut MockMessagingService) {
    mock_messaging
        .expect_answer_callback_query()
        .with(eq("test_callback_id"), eq(""))
        .times(1)
        .returning(|_, _| Ok(()));
}

pub fn setup_add_records_mocks(mock_messaging: &mut MockMessagingService) {
    let status_msg = mock_message(CHAT_ID, STATUS_MSG_TEXT);
    mock_messaging
        .expect_send_text_message()
        .with(eq(CHAT_ID), eq(STATUS_MSG_TEXT))
        .times(1)
        .returning(move |_, _| Ok(status_msg.clone()));
}

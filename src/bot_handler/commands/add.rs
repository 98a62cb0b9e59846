use std::{collections::BTreeSet, str::FromStr};

use futures::{StreamExt, stream};

use crate::{
    bot_handler::{BotHandlerError, BotHandlerResult, CommandState, Context},
    records::RecordServiceError,
    storage::{ApplicationEntity, CustomerEntity, RecordKind},
};

/// A struct to hold the summary of the add operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSummary {
    pub kind: RecordKind,
    /// Records that were successfully added.
    pub added: BTreeSet<String>,
    /// Records the agent already had.
    pub duplicates: BTreeSet<String>,
    /// Lines that could not be parsed, with the reason.
    pub invalid: BTreeSet<(String, String)>,
    /// Records rejected because the agent reached the record limit.
    pub limit_reached: BTreeSet<String>,
    /// Records that failed to be added due to an error.
    pub errors: BTreeSet<(String, String)>,
}

impl AddSummary {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            added: BTreeSet::new(),
            duplicates: BTreeSet::new(),
            invalid: BTreeSet::new(),
            limit_reached: BTreeSet::new(),
            errors: BTreeSet::new(),
        }
    }
}

pub async fn handle(ctx: Context<'_>, kind: RecordKind) -> BotHandlerResult<()> {
    ctx.handler.messaging_service.prompt_for_records_input(ctx.message.chat.id, kind).await?;
    ctx.dialogue
        .update(CommandState::AwaitingRecords { kind })
        .await
        .map_err(BotHandlerError::DialogueError)?;
    Ok(())
}

// An enum to represent the result of adding a single record.
enum AddRecordResult {
    Added(String),
    Duplicate(String),
    Invalid(String, String),
    LimitReached(String),
    Error(String, String),
}

impl AddRecordResult {
    fn from_outcome(label: String, outcome: Result<bool, RecordServiceError>) -> Self {
        match outcome {
            Ok(true) => AddRecordResult::Added(label),
            Ok(false) => AddRecordResult::Duplicate(label),
            Err(RecordServiceError::LimitExceeded(_)) => AddRecordResult::LimitReached(label),
            Err(e) => AddRecordResult::Error(label, e.to_string()),
        }
    }
}

/// Handle the reply message when we're waiting for records input.
/// Every non-empty line is parsed and added on its own; the agent gets one
/// summary for the whole batch.
pub async fn handle_reply(ctx: Context<'_>, kind: RecordKind, text: &str) -> BotHandlerResult<()> {
    let chat_id = ctx.message.chat.id;
    let lines: Vec<String> =
        text.lines().map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect();

    if lines.is_empty() {
        return Err(BotHandlerError::InvalidInput("Δεν δόθηκε καμία εγγραφή".to_string()));
    }

    let status_msg =
        ctx.handler.messaging_service.send_text_message(chat_id, "Επεξεργασία... ⏳").await?;

    tracing::debug!("Adding {} {kind} lines for chat {chat_id}", lines.len());

    let summary = stream::iter(lines)
        .map(|line| async move {
            let record_service = &ctx.handler.record_service;
            match kind {
                RecordKind::Customers => match CustomerEntity::from_str(&line) {
                    Ok(customer) => {
                        let label = customer.to_string();
                        AddRecordResult::from_outcome(
                            label,
                            record_service.add_customer(chat_id, customer).await,
                        )
                    }
                    Err(e) => AddRecordResult::Invalid(line, e.to_string()),
                },
                RecordKind::Applications => match ApplicationEntity::from_str(&line) {
                    Ok(application) => {
                        let label = application.to_string();
                        AddRecordResult::from_outcome(
                            label,
                            record_service.add_application(chat_id, application).await,
                        )
                    }
                    Err(e) => AddRecordResult::Invalid(line, e.to_string()),
                },
            }
        })
        .buffer_unordered(ctx.handler.max_concurrency)
        .fold(AddSummary::new(kind), |mut summary, res| async move {
            match res {
                AddRecordResult::Added(label) => {
                    summary.added.insert(label);
                }
                AddRecordResult::Duplicate(label) => {
                    summary.duplicates.insert(label);
                }
                AddRecordResult::Invalid(line, reason) => {
                    summary.invalid.insert((line, reason));
                }
                AddRecordResult::LimitReached(label) => {
                    summary.limit_reached.insert(label);
                }
                AddRecordResult::Error(label, e) => {
                    summary.errors.insert((label, e));
                }
            }
            summary
        })
        .await;

    ctx.handler.messaging_service.edit_add_summary_msg(chat_id, status_msg.id, &summary).await?;

    ctx.dialogue.update(CommandState::None).await.map_err(BotHandlerError::DialogueError)?;

    Ok(())
}

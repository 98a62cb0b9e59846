mod record_entity;
pub mod sqlite;
#[cfg(test)]
mod tests;

use async_trait::async_trait;
use mockall::automock;
pub use record_entity::{
    ApplicationEntity, ApplicationStatus, CustomerEntity, RecordKind, RecordParseError,
    parse_amount_cents,
};
use teloxide::types::ChatId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DbError(String),
    #[error("Data integrity error: Stored record '{0}' is invalid: {1}")]
    DataIntegrityError(String, String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence of agents' customers and applications. Every record belongs to
/// the agent identified by `chat_id`.
#[automock]
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Add a customer. Returns false if the agent already has a customer with
    /// the same tax id.
    async fn add_customer(&self, chat_id: ChatId, customer: CustomerEntity) -> StorageResult<bool>;

    /// Add an application. Returns false if the agent already has an
    /// application with the same tax id, product and submission date.
    async fn add_application(
        &self,
        chat_id: ChatId,
        application: ApplicationEntity,
    ) -> StorageResult<bool>;

    /// Remove a customer by id.
    async fn remove_customer(&self, chat_id: ChatId, id: i64) -> StorageResult<bool>;

    /// Remove an application by id.
    async fn remove_application(&self, chat_id: ChatId, id: i64) -> StorageResult<bool>;

    /// Get a single customer.
    async fn get_customer(&self, chat_id: ChatId, id: i64)
    -> StorageResult<Option<CustomerEntity>>;

    /// Get a single application.
    async fn get_application(
        &self,
        chat_id: ChatId,
        id: i64,
    ) -> StorageResult<Option<ApplicationEntity>>;

    /// Get all customers of an agent, ordered by name.
    async fn get_customers(&self, chat_id: ChatId) -> StorageResult<Vec<CustomerEntity>>;

    /// Get all applications of an agent, newest first.
    async fn get_applications(&self, chat_id: ChatId) -> StorageResult<Vec<ApplicationEntity>>;

    /// Count the records of one kind owned by an agent.
    async fn count_records(&self, chat_id: ChatId, kind: RecordKind) -> StorageResult<usize>;
}

use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{
    FromRow, Pool, Sqlite, migrate,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use teloxide::types::ChatId;

use crate::storage::{
    ApplicationEntity, CustomerEntity, RecordKind, RecordStorage, StorageError, StorageResult,
};

const STORED_DATE_FORMAT: &str = "%Y-%m-%d";
const MAX_CONNECTIONS: u32 = 5;

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        StorageError::DbError(e.to_string())
    }
}

pub struct SqliteStorage {
    pool: Pool<Sqlite>,
}

impl SqliteStorage {
    pub async fn new(database_url: &str) -> StorageResult<Self> {
        tracing::debug!("Connecting to SQLite database: {database_url}");

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to an in-memory database sees its own database.
        let in_memory = database_url.contains(":memory:");
        let mut pool_options = SqlitePoolOptions::new();
        pool_options = if in_memory {
            pool_options.max_connections(1).idle_timeout(None).max_lifetime(None)
        } else {
            pool_options.max_connections(MAX_CONNECTIONS)
        };
        let pool = pool_options.connect_with(options).await?;

        migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StorageError::DbError(e.to_string()))?;
        tracing::debug!("SQLite database migrated");

        Ok(Self { pool })
    }
}

#[derive(FromRow)]
struct CustomerRow {
    id: i64,
    full_name: String,
    tax_id: String,
    phone: String,
    email: Option<String>,
    city: Option<String>,
}

impl From<CustomerRow> for CustomerEntity {
    fn from(row: CustomerRow) -> Self {
        CustomerEntity {
            id: row.id,
            full_name: row.full_name,
            tax_id: row.tax_id,
            phone: row.phone,
            email: row.email,
            city: row.city,
        }
    }
}

#[derive(FromRow)]
struct ApplicationRow {
    id: i64,
    customer_name: String,
    tax_id: String,
    company: String,
    product: String,
    status: String,
    commission_cents: i64,
    submitted_on: String,
}

impl TryFrom<ApplicationRow> for ApplicationEntity {
    type Error = StorageError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let record = format!("application #{}", row.id);
        let status = row
            .status
            .parse()
            .map_err(|e: crate::storage::RecordParseError| {
                StorageError::DataIntegrityError(record.clone(), e.to_string())
            })?;
        let submitted_on = NaiveDate::parse_from_str(&row.submitted_on, STORED_DATE_FORMAT)
            .map_err(|e| StorageError::DataIntegrityError(record, e.to_string()))?;

        Ok(ApplicationEntity {
            id: row.id,
            customer_name: row.customer_name,
            tax_id: row.tax_id,
            company: row.company,
            product: row.product,
            status,
            commission_cents: row.commission_cents,
            submitted_on,
        })
    }
}

const CUSTOMER_COLUMNS: &str = "id, full_name, tax_id, phone, email, city";
const APPLICATION_COLUMNS: &str =
    "id, customer_name, tax_id, company, product, status, commission_cents, submitted_on";

#[async_trait]
impl RecordStorage for SqliteStorage {
    async fn add_customer(&self, chat_id: ChatId, customer: CustomerEntity) -> StorageResult<bool> {
        tracing::debug!("Adding customer to SQLite: {customer}");

        let result = sqlx::query(
            "INSERT OR IGNORE INTO customers (chat_id, full_name, tax_id, phone, email, city) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(chat_id.0)
        .bind(&customer.full_name)
        .bind(&customer.tax_id)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(&customer.city)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_application(
        &self,
        chat_id: ChatId,
        application: ApplicationEntity,
    ) -> StorageResult<bool> {
        tracing::debug!("Adding application to SQLite: {application}");

        let submitted_on = application.submitted_on.format(STORED_DATE_FORMAT).to_string();
        let result = sqlx::query(
            "INSERT OR IGNORE INTO applications \
             (chat_id, customer_name, tax_id, company, product, status, commission_cents, \
             submitted_on) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(chat_id.0)
        .bind(&application.customer_name)
        .bind(&application.tax_id)
        .bind(&application.company)
        .bind(&application.product)
        .bind(application.status.as_str())
        .bind(application.commission_cents)
        .bind(submitted_on)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_customer(&self, chat_id: ChatId, id: i64) -> StorageResult<bool> {
        tracing::debug!("Removing customer #{id} from SQLite");

        let result = sqlx::query("DELETE FROM customers WHERE chat_id = ? AND id = ?")
            .bind(chat_id.0)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_application(&self, chat_id: ChatId, id: i64) -> StorageResult<bool> {
        tracing::debug!("Removing application #{id} from SQLite");

        let result = sqlx::query("DELETE FROM applications WHERE chat_id = ? AND id = ?")
            .bind(chat_id.0)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_customer(
        &self,
        chat_id: ChatId,
        id: i64,
    ) -> StorageResult<Option<CustomerEntity>> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE chat_id = ? AND id = ?"
        ))
        .bind(chat_id.0)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CustomerEntity::from))
    }

    async fn get_application(
        &self,
        chat_id: ChatId,
        id: i64,
    ) -> StorageResult<Option<ApplicationEntity>> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE chat_id = ? AND id = ?"
        ))
        .bind(chat_id.0)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ApplicationEntity::try_from).transpose()
    }

    async fn get_customers(&self, chat_id: ChatId) -> StorageResult<Vec<CustomerEntity>> {
        tracing::debug!("Getting customers for agent: {chat_id}");

        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE chat_id = ? \
             ORDER BY full_name, id"
        ))
        .bind(chat_id.0)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CustomerEntity::from).collect())
    }

    async fn get_applications(&self, chat_id: ChatId) -> StorageResult<Vec<ApplicationEntity>> {
        tracing::debug!("Getting applications for agent: {chat_id}");

        let rows = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE chat_id = ? \
             ORDER BY submitted_on DESC, id DESC"
        ))
        .bind(chat_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ApplicationEntity::try_from).collect()
    }

    async fn count_records(&self, chat_id: ChatId, kind: RecordKind) -> StorageResult<usize> {
        let sql = match kind {
            RecordKind::Applications => "SELECT COUNT(*) FROM applications WHERE chat_id = ?",
            RecordKind::Customers => "SELECT COUNT(*) FROM customers WHERE chat_id = ?",
        };

        let count: i64 = sqlx::query_scalar(sql).bind(chat_id.0).fetch_one(&self.pool).await?;

        Ok(count as usize)
    }
}

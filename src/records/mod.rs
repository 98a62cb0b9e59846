mod matching;

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use teloxide::types::ChatId;
use thiserror::Error;

use crate::{
    pagination::{Paginated, PaginationError, Paginator, SearchWithPagination},
    storage::{
        ApplicationEntity, ApplicationStatus, CustomerEntity, RecordKind, RecordStorage,
        StorageError,
    },
};

#[derive(Debug, Error)]
pub enum RecordServiceError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Pagination error: {0}")]
    Pagination(#[from] PaginationError),
    #[error("Έχετε φτάσει το όριο των {0} εγγραφών")]
    LimitExceeded(usize),
    #[error("Το σύνολο προμηθειών για την εταιρεία '{0}' είναι πολύ μεγάλο")]
    CommissionOverflow(String),
}

type Result<T> = std::result::Result<T, RecordServiceError>;

/// Where a listing currently is: page and search term. Kept in the dialogue
/// so a listing can be rebuilt after a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCursor {
    pub page: usize,
    pub search_term: String,
}

impl Default for ListingCursor {
    fn default() -> Self {
        Self { page: 1, search_term: String::new() }
    }
}

/// A navigation request applied on top of a restored cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    GoTo(usize),
    Next,
    Prev,
    First,
    Last,
}

/// One row of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: i64,
    pub label: String,
}

/// One page of an agent's records, after search filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub kind: RecordKind,
    pub page: Paginated<ListEntry>,
    pub search_term: String,
}

impl Listing {
    pub fn cursor(&self) -> ListingCursor {
        ListingCursor { page: self.page.page, search_term: self.search_term.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordDetails {
    Application(ApplicationEntity),
    Customer(CustomerEntity),
}

/// Commission earned through one insurance company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommissionTotal {
    pub company: String,
    pub applications: usize,
    pub total_cents: i64,
    pub paid_cents: i64,
}

#[automock]
#[async_trait]
pub trait RecordService: Send + Sync {
    /// Rebuilds the listing at `cursor` and applies `navigation` to it.
    /// A stored page that no longer exists falls back to the first page.
    async fn browse(
        &self,
        chat_id: ChatId,
        kind: RecordKind,
        cursor: ListingCursor,
        navigation: Navigation,
    ) -> Result<Listing>;

    /// Starts a new search. Always lands on the first page.
    async fn search(&self, chat_id: ChatId, kind: RecordKind, term: String) -> Result<Listing>;

    async fn details(
        &self,
        chat_id: ChatId,
        kind: RecordKind,
        id: i64,
    ) -> Result<Option<RecordDetails>>;

    async fn add_customer(&self, chat_id: ChatId, customer: CustomerEntity) -> Result<bool>;

    async fn add_application(&self, chat_id: ChatId, application: ApplicationEntity)
    -> Result<bool>;

    async fn remove(&self, chat_id: ChatId, kind: RecordKind, id: i64) -> Result<bool>;

    /// Commission totals per company, excluding rejected applications.
    async fn commissions(&self, chat_id: ChatId, page: usize) -> Result<Paginated<CommissionTotal>>;
}

pub struct DefaultRecordService {
    storage: Arc<dyn RecordStorage>,
    page_size: usize,
    max_records_per_agent: usize,
}

impl DefaultRecordService {
    pub fn new(
        storage: Arc<dyn RecordStorage>,
        page_size: usize,
        max_records_per_agent: usize,
    ) -> Self {
        Self { storage, page_size, max_records_per_agent }
    }

    async fn ensure_below_limit(&self, chat_id: ChatId, kind: RecordKind) -> Result<()> {
        let count = self.storage.count_records(chat_id, kind).await?;
        if count >= self.max_records_per_agent {
            return Err(RecordServiceError::LimitExceeded(self.max_records_per_agent));
        }
        Ok(())
    }

    fn build_listing<T>(
        &self,
        kind: RecordKind,
        records: Vec<T>,
        matches: fn(&T, &str) -> bool,
        to_entry: fn(&T) -> ListEntry,
        cursor: ListingCursor,
        navigation: Navigation,
    ) -> Result<Listing> {
        let mut search = SearchWithPagination::new(records, self.page_size, matches)?;
        search.set_search_term(cursor.search_term);
        search.go_to_page(cursor.page);

        match navigation {
            Navigation::Stay => false,
            Navigation::GoTo(page) => search.go_to_page(page),
            Navigation::Next => search.go_to_next_page(),
            Navigation::Prev => search.go_to_prev_page(),
            Navigation::First => search.go_to_first_page(),
            Navigation::Last => search.go_to_last_page(),
        };

        let entries = search.current_items().into_iter().map(to_entry).collect();
        let page = Paginated::from_info(entries, &search.page_info());

        tracing::debug!(
            "Built {kind} listing: page {} of {}, {} matching records",
            page.page,
            page.total_pages,
            page.total_items
        );

        Ok(Listing { kind, page, search_term: search.search_term().to_string() })
    }
}

#[async_trait]
impl RecordService for DefaultRecordService {
    async fn browse(
        &self,
        chat_id: ChatId,
        kind: RecordKind,
        cursor: ListingCursor,
        navigation: Navigation,
    ) -> Result<Listing> {
        match kind {
            RecordKind::Applications => {
                let applications = self.storage.get_applications(chat_id).await?;
                self.build_listing(
                    kind,
                    applications,
                    matching::application_matches,
                    |application| ListEntry { id: application.id, label: application.list_label() },
                    cursor,
                    navigation,
                )
            }
            RecordKind::Customers => {
                let customers = self.storage.get_customers(chat_id).await?;
                self.build_listing(
                    kind,
                    customers,
                    matching::customer_matches,
                    |customer| ListEntry { id: customer.id, label: customer.list_label() },
                    cursor,
                    navigation,
                )
            }
        }
    }

    async fn search(&self, chat_id: ChatId, kind: RecordKind, term: String) -> Result<Listing> {
        let cursor = ListingCursor { page: 1, search_term: term };
        self.browse(chat_id, kind, cursor, Navigation::Stay).await
    }

    async fn details(
        &self,
        chat_id: ChatId,
        kind: RecordKind,
        id: i64,
    ) -> Result<Option<RecordDetails>> {
        let details = match kind {
            RecordKind::Applications => {
                self.storage.get_application(chat_id, id).await?.map(RecordDetails::Application)
            }
            RecordKind::Customers => {
                self.storage.get_customer(chat_id, id).await?.map(RecordDetails::Customer)
            }
        };
        Ok(details)
    }

    async fn add_customer(&self, chat_id: ChatId, customer: CustomerEntity) -> Result<bool> {
        self.ensure_below_limit(chat_id, RecordKind::Customers).await?;
        self.storage.add_customer(chat_id, customer).await.map_err(RecordServiceError::from)
    }

    async fn add_application(
        &self,
        chat_id: ChatId,
        application: ApplicationEntity,
    ) -> Result<bool> {
        self.ensure_below_limit(chat_id, RecordKind::Applications).await?;
        self.storage.add_application(chat_id, application).await.map_err(RecordServiceError::from)
    }

    async fn remove(&self, chat_id: ChatId, kind: RecordKind, id: i64) -> Result<bool> {
        let removed = match kind {
            RecordKind::Applications => self.storage.remove_application(chat_id, id).await?,
            RecordKind::Customers => self.storage.remove_customer(chat_id, id).await?,
        };
        Ok(removed)
    }

    async fn commissions(&self, chat_id: ChatId, page: usize) -> Result<Paginated<CommissionTotal>> {
        let applications = self.storage.get_applications(chat_id).await?;

        let mut per_company: BTreeMap<String, CommissionTotal> = BTreeMap::new();
        for application in
            applications.iter().filter(|a| a.status != ApplicationStatus::Rejected)
        {
            let total = per_company.entry(application.company.clone()).or_insert_with(|| {
                CommissionTotal {
                    company: application.company.clone(),
                    applications: 0,
                    total_cents: 0,
                    paid_cents: 0,
                }
            });
            let overflow = || RecordServiceError::CommissionOverflow(application.company.clone());
            total.applications += 1;
            total.total_cents =
                total.total_cents.checked_add(application.commission_cents).ok_or_else(overflow)?;
            if application.status == ApplicationStatus::Paid {
                total.paid_cents =
                    total.paid_cents.checked_add(application.commission_cents).ok_or_else(overflow)?;
            }
        }

        let mut paginator = Paginator::new(per_company.into_values().collect(), self.page_size)?;
        paginator.go_to_page(page);

        Ok(paginator.snapshot())
    }
}

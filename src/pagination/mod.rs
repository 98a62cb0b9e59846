#[cfg(test)]
mod tests;

/// Windowed page-number lists for pagination controls.
pub mod page_numbers;
/// Search filtering composed with pagination.
pub mod search;
/// Toolkit-independent render model for pagination controls.
pub mod view;

pub use page_numbers::{PAGE_WINDOW_DELTA, PageIndicator, page_numbers};
pub use search::SearchWithPagination;
pub use view::{PageControl, PaginationView};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Page size must be a positive integer, got {0}")]
    InvalidPageSize(usize),
}

pub type PaginationResult<T> = Result<T, PaginationError>;

fn validate_page_size(page_size: usize) -> PaginationResult<usize> {
    if page_size == 0 {
        return Err(PaginationError::InvalidPageSize(page_size));
    }
    Ok(page_size)
}

/// Page-window metadata derived from a collection size, a requested page and a
/// page size.
///
/// Pages are 1-indexed. `start_index..end_index` is the half-open range of the
/// current page inside the source collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Number of items in the (possibly filtered) source collection.
    pub total_items: usize,
    /// Maximum number of items per page.
    pub page_size: usize,
    /// The current page, always within `1..=max(1, total_pages)`.
    pub current_page: usize,
    /// `ceil(total_items / page_size)`, zero for an empty collection.
    pub total_pages: usize,
    /// Inclusive start of the current page.
    pub start_index: usize,
    /// Exclusive end of the current page.
    pub end_index: usize,
    /// Whether a page follows the current one.
    pub has_next_page: bool,
    /// Whether a page precedes the current one.
    pub has_prev_page: bool,
}

impl PageInfo {
    /// Derives page metadata. An out-of-range `current_page` is clamped so the
    /// resulting bounds always describe a valid slice.
    pub fn derive(
        total_items: usize,
        current_page: usize,
        page_size: usize,
    ) -> PaginationResult<Self> {
        let page_size = validate_page_size(page_size)?;
        Ok(Self::compute(total_items, current_page, page_size))
    }

    // `page_size` must already be validated.
    fn compute(total_items: usize, current_page: usize, page_size: usize) -> Self {
        let total_pages = total_items.div_ceil(page_size);
        let current_page = current_page.clamp(1, total_pages.max(1));
        let start_index = ((current_page - 1) * page_size).min(total_items);
        let end_index = (start_index + page_size).min(total_items);

        Self {
            total_items,
            page_size,
            current_page,
            total_pages,
            start_index,
            end_index,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
        }
    }
}

/// A derived page over a borrowed source collection.
#[derive(Debug, PartialEq, Eq)]
pub struct PaginationState<'a, T> {
    pub info: PageInfo,
    pub current_items: &'a [T],
}

/// Derives the pagination state of `source` for `current_page`. Pure: the
/// source is only read and nothing is cached.
pub fn derive<T>(
    source: &[T],
    current_page: usize,
    page_size: usize,
) -> PaginationResult<PaginationState<'_, T>> {
    let info = PageInfo::derive(source.len(), current_page, page_size)?;
    Ok(PaginationState { info, current_items: &source[info.start_index..info.end_index] })
}

/// Navigation state over a collection of known size.
///
/// Out-of-range navigation is ignored instead of failing: a stale "next" button
/// pressed after the data shrank simply does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    current_page: usize,
    page_size: usize,
    total_items: usize,
}

impl PageCursor {
    /// Creates a cursor positioned on the first page.
    pub fn new(page_size: usize, total_items: usize) -> PaginationResult<Self> {
        let page_size = validate_page_size(page_size)?;
        Ok(Self { current_page: 1, page_size, total_items })
    }

    pub fn info(&self) -> PageInfo {
        PageInfo::compute(self.total_items, self.current_page, self.page_size)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_prev_page(&self) -> bool {
        self.current_page > 1
    }

    /// Moves to `page` if it is within `1..=total_pages`. Returns whether the
    /// current page changed.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn go_to_next_page(&mut self) -> bool {
        self.has_next_page() && self.go_to_page(self.current_page + 1)
    }

    pub fn go_to_prev_page(&mut self) -> bool {
        self.has_prev_page() && self.go_to_page(self.current_page - 1)
    }

    pub fn go_to_first_page(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn go_to_last_page(&mut self) -> bool {
        self.go_to_page(self.total_pages())
    }

    /// Unconditionally returns to the first page.
    pub fn reset_pagination(&mut self) {
        self.current_page = 1;
    }

    /// Updates the collection size, pulling the current page back into range
    /// if the collection shrank.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = self.current_page.clamp(1, self.total_pages().max(1));
    }
}

/// Client-side pagination over an owned, fully materialized collection.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    items: Vec<T>,
    cursor: PageCursor,
}

impl<T> Paginator<T> {
    pub fn new(items: Vec<T>, page_size: usize) -> PaginationResult<Self> {
        let cursor = PageCursor::new(page_size, items.len())?;
        Ok(Self { items, cursor })
    }

    /// The full source collection.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> PaginationState<'_, T> {
        let info = self.cursor.info();
        PaginationState { info, current_items: &self.items[info.start_index..info.end_index] }
    }

    pub fn page_info(&self) -> PageInfo {
        self.cursor.info()
    }

    pub fn current_items(&self) -> &[T] {
        self.state().current_items
    }

    pub fn current_page(&self) -> usize {
        self.cursor.current_page()
    }

    pub fn page_size(&self) -> usize {
        self.cursor.page_size()
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn total_pages(&self) -> usize {
        self.cursor.total_pages()
    }

    pub fn start_index(&self) -> usize {
        self.cursor.info().start_index
    }

    pub fn end_index(&self) -> usize {
        self.cursor.info().end_index
    }

    pub fn has_next_page(&self) -> bool {
        self.cursor.has_next_page()
    }

    pub fn has_prev_page(&self) -> bool {
        self.cursor.has_prev_page()
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.cursor.go_to_page(page)
    }

    pub fn go_to_next_page(&mut self) -> bool {
        self.cursor.go_to_next_page()
    }

    pub fn go_to_prev_page(&mut self) -> bool {
        self.cursor.go_to_prev_page()
    }

    pub fn go_to_first_page(&mut self) -> bool {
        self.cursor.go_to_first_page()
    }

    pub fn go_to_last_page(&mut self) -> bool {
        self.cursor.go_to_last_page()
    }

    pub fn reset_pagination(&mut self) {
        self.cursor.reset_pagination();
    }

    /// Replaces the source collection wholesale (e.g. after a refetch). The
    /// current page is kept when still valid; call `reset_pagination` to
    /// start over.
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.cursor.set_total_items(items.len());
        self.items = items;
    }

    /// Owned copy of the current page.
    pub fn snapshot(&self) -> Paginated<T>
    where
        T: Clone,
    {
        Paginated::from_info(self.current_items().to_vec(), &self.page_info())
    }
}

/// Pagination structure to hand one page of data (records, totals, etc.) to
/// presentation code.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn from_info(items: Vec<T>, info: &PageInfo) -> Self {
        Paginated {
            items,
            page: info.current_page,
            page_size: info.page_size,
            total_items: info.total_items,
            total_pages: info.total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages && self.total_pages > 0
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1 && self.total_pages > 0
    }

    /// 1-based position of the first item on this page, 0 when empty.
    pub fn first_item_number(&self) -> usize {
        if self.items.is_empty() {
            return 0;
        }
        (self.page - 1) * self.page_size + 1
    }

    /// 1-based position of the last item on this page, 0 when empty.
    pub fn last_item_number(&self) -> usize {
        if self.items.is_empty() {
            return 0;
        }
        (self.page - 1) * self.page_size + self.items.len()
    }

    pub fn page_numbers(&self) -> Vec<PageIndicator> {
        page_numbers(self.page, self.total_pages)
    }
}

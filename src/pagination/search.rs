use super::{PageInfo, Paginated, PaginationResult, Paginator};

/// Search filtering composed with pagination.
///
/// The predicate is fixed at construction. Changing the search term re-filters
/// the source and returns to the first page within the same call, so the page
/// position is never observed against a stale result set.
pub struct SearchWithPagination<T, F = fn(&T, &str) -> bool> {
    source: Vec<T>,
    matches: F,
    search_term: String,
    // Paginates indices into `source` of the items matching `search_term`.
    filtered: Paginator<usize>,
}

impl<T, F> SearchWithPagination<T, F>
where
    F: Fn(&T, &str) -> bool,
{
    /// Creates a search over `source` with an empty term (everything matches).
    pub fn new(source: Vec<T>, page_size: usize, matches: F) -> PaginationResult<Self> {
        let filtered = Paginator::new((0..source.len()).collect(), page_size)?;
        Ok(Self { source, matches, search_term: String::new(), filtered })
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Sets the search term, re-filters and resets to the first page.
    ///
    /// A panicking predicate is not caught.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.refilter();
    }

    /// Replaces the source collection (e.g. after a refetch), keeping the
    /// current term and resetting to the first page.
    pub fn replace_source(&mut self, source: Vec<T>) {
        self.source = source;
        self.refilter();
    }

    fn refilter(&mut self) {
        let indices = if self.search_term.trim().is_empty() {
            (0..self.source.len()).collect()
        } else {
            self.source
                .iter()
                .enumerate()
                .filter(|(_, item)| (self.matches)(item, &self.search_term))
                .map(|(index, _)| index)
                .collect()
        };
        self.filtered.replace_items(indices);
        self.filtered.reset_pagination();
    }

    /// The unfiltered source collection.
    pub fn source(&self) -> &[T] {
        &self.source
    }

    /// Every item matching the current term, in source order.
    pub fn filtered_data(&self) -> Vec<&T> {
        self.resolve(self.filtered.items())
    }

    pub fn current_items(&self) -> Vec<&T> {
        self.resolve(self.filtered.current_items())
    }

    fn resolve(&self, indices: &[usize]) -> Vec<&T> {
        indices.iter().map(|&index| &self.source[index]).collect()
    }

    pub fn page_info(&self) -> PageInfo {
        self.filtered.page_info()
    }

    pub fn current_page(&self) -> usize {
        self.filtered.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.filtered.total_pages()
    }

    /// Number of items matching the current term.
    pub fn filtered_len(&self) -> usize {
        self.filtered.total_items()
    }

    /// Same as `filtered_len`: pagination counts matching items only.
    pub fn total_items(&self) -> usize {
        self.filtered_len()
    }

    pub fn start_index(&self) -> usize {
        self.filtered.start_index()
    }

    pub fn end_index(&self) -> usize {
        self.filtered.end_index()
    }

    pub fn has_next_page(&self) -> bool {
        self.filtered.has_next_page()
    }

    pub fn has_prev_page(&self) -> bool {
        self.filtered.has_prev_page()
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.filtered.go_to_page(page)
    }

    pub fn go_to_next_page(&mut self) -> bool {
        self.filtered.go_to_next_page()
    }

    pub fn go_to_prev_page(&mut self) -> bool {
        self.filtered.go_to_prev_page()
    }

    pub fn go_to_first_page(&mut self) -> bool {
        self.filtered.go_to_first_page()
    }

    pub fn go_to_last_page(&mut self) -> bool {
        self.filtered.go_to_last_page()
    }

    pub fn reset_pagination(&mut self) {
        self.filtered.reset_pagination();
    }

    /// Owned copy of the current page.
    pub fn snapshot(&self) -> Paginated<T>
    where
        T: Clone,
    {
        let items = self.current_items().into_iter().cloned().collect();
        Paginated::from_info(items, &self.page_info())
    }
}

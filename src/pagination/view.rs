use super::{PageIndicator, Paginated};

/// A single clickable (or inert) element of a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    First { target: usize, enabled: bool },
    Prev { target: usize, enabled: bool },
    Page { number: usize, is_current: bool },
    Ellipsis,
    Next { target: usize, enabled: bool },
    Last { target: usize, enabled: bool },
}

impl PageControl {
    /// The page this control navigates to, if it can be activated.
    pub fn target(&self) -> Option<usize> {
        match *self {
            PageControl::First { target, enabled }
            | PageControl::Prev { target, enabled }
            | PageControl::Next { target, enabled }
            | PageControl::Last { target, enabled } => enabled.then_some(target),
            PageControl::Page { number, is_current } => (!is_current).then_some(number),
            PageControl::Ellipsis => None,
        }
    }
}

/// Render model for a pagination control. Holds no state of its own; it is
/// rebuilt from a page snapshot every time the page changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    /// Page numbers and ellipses, in display order.
    pub pages: Vec<PageControl>,
    /// First / previous / next / last controls.
    pub navigation: Vec<PageControl>,
    /// Human readable position summary.
    pub info_line: String,
}

impl PaginationView {
    pub fn from_page<T>(page: &Paginated<T>) -> Self {
        let pages = page
            .page_numbers()
            .into_iter()
            .map(|indicator| match indicator {
                PageIndicator::Page(number) =>
                    PageControl::Page { number, is_current: number == page.page },
                PageIndicator::Ellipsis => PageControl::Ellipsis,
            })
            .collect();

        let has_prev = page.has_prev();
        let has_next = page.has_next();
        let navigation = vec![
            PageControl::First { target: 1, enabled: has_prev },
            PageControl::Prev { target: page.page.saturating_sub(1).max(1), enabled: has_prev },
            PageControl::Next { target: page.page + 1, enabled: has_next },
            PageControl::Last { target: page.total_pages.max(1), enabled: has_next },
        ];

        Self { pages, navigation, info_line: format_info_line(page) }
    }

    /// Whether there is more than one page to navigate between.
    pub fn is_navigable(&self) -> bool {
        self.pages.len() > 1
    }
}

/// Formats the "showing X–Y of N records, page P of T" summary.
pub fn format_info_line<T>(page: &Paginated<T>) -> String {
    if page.total_items == 0 {
        return "Δεν υπάρχουν εγγραφές".to_string();
    }

    format!(
        "Εμφάνιση {}–{} από {} εγγραφές, σελίδα {} από {}",
        page.first_item_number(),
        page.last_item_number(),
        page.total_items,
        page.page,
        page.total_pages
    )
}

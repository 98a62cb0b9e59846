use std::collections::HashSet;

/// Number of pages shown on each side of the current page.
pub const PAGE_WINDOW_DELTA: usize = 2;

/// One element of a rendered page-number list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageIndicator {
    Page(usize),
    Ellipsis,
}

/// Builds the page indicators for a pagination control: the first page, a
/// window of `PAGE_WINDOW_DELTA` pages around `current_page`, the last page,
/// and an ellipsis wherever pages are skipped.
///
/// The list never grows with `total_pages`: it holds at most
/// `2 * PAGE_WINDOW_DELTA + 5` elements.
pub fn page_numbers(current_page: usize, total_pages: usize) -> Vec<PageIndicator> {
    let range_start = current_page.saturating_sub(PAGE_WINDOW_DELTA).max(2);
    let range_end =
        current_page.saturating_add(PAGE_WINDOW_DELTA).min(total_pages.saturating_sub(1));

    let mut indicators = vec![PageIndicator::Page(1)];

    if range_start > 2 {
        indicators.push(PageIndicator::Ellipsis);
    }

    indicators.extend((range_start..=range_end).map(PageIndicator::Page));

    // No trailing ellipsis is possible for 0 and 1 total pages.
    if total_pages >= 2 && range_end < total_pages - 1 {
        indicators.push(PageIndicator::Ellipsis);
    }

    if total_pages > 1 {
        indicators.push(PageIndicator::Page(total_pages));
    }

    let mut seen = HashSet::new();
    indicators.retain(|indicator| match indicator {
        PageIndicator::Page(page) => seen.insert(*page),
        PageIndicator::Ellipsis => true,
    });

    indicators
}

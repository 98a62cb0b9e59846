use super::*;

fn numbers(count: usize) -> Vec<usize> {
    (0..count).collect()
}

#[test]
fn test_derive_middle_page() {
    let items = numbers(23);

    let state = derive(&items, 2, 10).unwrap();

    assert_eq!(state.info.total_pages, 3);
    assert_eq!(state.info.start_index, 10);
    assert_eq!(state.info.end_index, 20);
    assert_eq!(state.current_items, &items[10..20]);
    assert!(state.info.has_next_page);
    assert!(state.info.has_prev_page);
}

#[test]
fn test_derive_empty_collection() {
    let items: Vec<usize> = Vec::new();

    let state = derive(&items, 1, 15).unwrap();

    assert_eq!(state.info.total_pages, 0);
    assert_eq!(state.info.current_page, 1);
    assert!(state.current_items.is_empty());
    assert!(!state.info.has_next_page);
    assert!(!state.info.has_prev_page);
}

#[test]
fn test_derive_clamps_out_of_range_page() {
    let items = numbers(23);

    let past_end = derive(&items, 99, 10).unwrap();
    assert_eq!(past_end.info.current_page, 3);
    assert_eq!(past_end.current_items, &items[20..23]);

    let before_start = derive(&items, 0, 10).unwrap();
    assert_eq!(before_start.info.current_page, 1);
    assert_eq!(before_start.current_items, &items[0..10]);
}

#[test]
fn test_derive_rejects_zero_page_size() {
    assert_eq!(derive(&numbers(5), 1, 0), Err(PaginationError::InvalidPageSize(0)));
    assert!(Paginator::new(numbers(5), 0).is_err());
    assert!(PageCursor::new(0, 5).is_err());
}

#[test]
fn test_total_pages_is_ceiling_division() {
    for total in 0..60 {
        for page_size in 1..12 {
            let info = PageInfo::derive(total, 1, page_size).unwrap();
            assert_eq!(info.total_pages, total.div_ceil(page_size), "{total}/{page_size}");
            assert_eq!(info.total_pages == 0, total == 0);
        }
    }
}

#[test]
fn test_every_page_is_the_exact_contiguous_slice() {
    for total in 0..40 {
        for page_size in 1..8 {
            let items = numbers(total);
            let total_pages = total.div_ceil(page_size);
            for page in 1..=total_pages {
                let state = derive(&items, page, page_size).unwrap();
                let start = (page - 1) * page_size;
                let end = (page * page_size).min(total);
                assert_eq!(state.current_items, &items[start..end]);
                assert_eq!(state.current_items.len(), page_size.min(total - start));
            }
        }
    }
}

#[test]
fn test_go_to_page_moves_within_range() {
    let mut paginator = Paginator::new(numbers(23), 10).unwrap();

    assert!(paginator.go_to_page(2));

    assert_eq!(paginator.current_page(), 2);
    assert_eq!(paginator.current_items(), &numbers(23)[10..20]);
    assert_eq!(paginator.start_index(), 10);
    assert_eq!(paginator.end_index(), 20);
    assert!(paginator.has_next_page());
    assert!(paginator.has_prev_page());
}

#[test]
fn test_go_to_page_out_of_range_is_ignored() {
    let mut paginator = Paginator::new(numbers(23), 10).unwrap();
    paginator.go_to_page(2);

    assert!(!paginator.go_to_page(99));
    assert!(!paginator.go_to_page(0));
    assert!(!paginator.go_to_page(paginator.total_pages() + 1));

    assert_eq!(paginator.current_page(), 2);
}

#[test]
fn test_go_to_current_page_changes_nothing() {
    let mut paginator = Paginator::new(numbers(23), 10).unwrap();
    paginator.go_to_page(2);
    let before = paginator.page_info();

    assert!(!paginator.go_to_page(2));

    assert_eq!(paginator.page_info(), before);
}

#[test]
fn test_sequential_navigation() {
    let mut paginator = Paginator::new(numbers(35), 10).unwrap();

    assert!(!paginator.go_to_prev_page());
    assert!(paginator.go_to_next_page());
    assert!(paginator.go_to_next_page());
    assert!(paginator.go_to_next_page());
    assert_eq!(paginator.current_page(), 4);
    assert!(!paginator.go_to_next_page());
    assert_eq!(paginator.current_items(), &[30, 31, 32, 33, 34]);

    assert!(paginator.go_to_first_page());
    assert_eq!(paginator.current_page(), 1);
    assert!(paginator.go_to_last_page());
    assert_eq!(paginator.current_page(), 4);
    assert!(paginator.go_to_prev_page());
    assert_eq!(paginator.current_page(), 3);

    paginator.reset_pagination();
    assert_eq!(paginator.current_page(), 1);
}

#[test]
fn test_navigation_on_empty_collection() {
    let mut paginator = Paginator::new(Vec::<usize>::new(), 15).unwrap();

    assert!(!paginator.go_to_next_page());
    assert!(!paginator.go_to_last_page());
    assert!(!paginator.go_to_first_page());
    assert_eq!(paginator.current_page(), 1);
    assert_eq!(paginator.total_pages(), 0);
    assert!(paginator.current_items().is_empty());
}

#[test]
fn test_replace_items_clamps_page() {
    let mut paginator = Paginator::new(numbers(50), 10).unwrap();
    paginator.go_to_last_page();

    paginator.replace_items(numbers(12));

    assert_eq!(paginator.current_page(), 2);
    assert_eq!(paginator.current_items(), &[10, 11]);

    paginator.replace_items(Vec::new());
    assert_eq!(paginator.current_page(), 1);
    assert!(paginator.current_items().is_empty());
}

#[test]
fn test_snapshot_reports_item_numbers() {
    let mut paginator = Paginator::new(numbers(23), 10).unwrap();
    paginator.go_to_page(3);

    let page = paginator.snapshot();

    assert_eq!(page, Paginated {
        items: vec![20, 21, 22],
        page: 3,
        page_size: 10,
        total_items: 23,
        total_pages: 3,
    });
    assert_eq!(page.first_item_number(), 21);
    assert_eq!(page.last_item_number(), 23);
    assert!(!page.has_next());
    assert!(page.has_prev());
}

#[test]
fn test_paginated_empty_item_numbers() {
    let page: Paginated<usize> =
        Paginated { items: vec![], page: 1, page_size: 10, total_items: 0, total_pages: 0 };

    assert_eq!(page.first_item_number(), 0);
    assert_eq!(page.last_item_number(), 0);
    assert!(!page.has_next());
    assert!(!page.has_prev());
    assert_eq!(page.page_numbers(), vec![PageIndicator::Page(1)]);
}

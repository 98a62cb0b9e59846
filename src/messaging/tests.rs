use teloxide::types::{InlineKeyboardButtonKind, InlineKeyboardMarkup};

use super::keyboards::{build_commissions_keyboard, build_details_keyboard, build_listing_keyboard};
use crate::{
    bot_handler::CallbackAction,
    pagination::{Paginated, Paginator},
    records::{CommissionTotal, ListEntry, Listing},
    storage::RecordKind,
};

fn listing(total_items: usize, page: usize, search_term: &str) -> Listing {
    let entries: Vec<ListEntry> = (1..=total_items)
        .map(|id| ListEntry { id: id as i64, label: format!("Αίτηση {id}") })
        .collect();
    let mut paginator = Paginator::new(entries, 10).unwrap();
    paginator.go_to_page(page);

    Listing {
        kind: RecordKind::Applications,
        page: paginator.snapshot(),
        search_term: search_term.to_string(),
    }
}

fn rows(keyboard: &InlineKeyboardMarkup) -> Vec<Vec<(String, CallbackAction)>> {
    keyboard
        .inline_keyboard
        .iter()
        .map(|row| {
            row.iter()
                .map(|button| match &button.kind {
                    InlineKeyboardButtonKind::CallbackData(data) => {
                        (button.text.clone(), serde_json::from_str(data).unwrap())
                    }
                    other => panic!("unexpected button kind: {other:?}"),
                })
                .collect()
        })
        .collect()
}

#[test]
fn test_single_page_listing_has_no_pagination_rows() {
    let keyboard = build_listing_keyboard(&listing(3, 1, ""));

    let rows = rows(&keyboard);

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], vec![(
        "Αίτηση 1".to_string(),
        CallbackAction::ViewRecord(RecordKind::Applications, 1)
    )]);
    assert_eq!(rows[3], vec![(
        "🔎 Αναζήτηση".to_string(),
        CallbackAction::Search(RecordKind::Applications)
    )]);
}

#[test]
fn test_middle_page_listing_keyboard() {
    let kind = RecordKind::Applications;
    let keyboard = build_listing_keyboard(&listing(100, 5, ""));

    let rows = rows(&keyboard);

    // 10 entries, two rows of page numbers, navigation, search
    assert_eq!(rows.len(), 14);
    let pages: Vec<(String, CallbackAction)> = rows[10].iter().chain(&rows[11]).cloned().collect();
    assert_eq!(pages, vec![
        ("1".to_string(), CallbackAction::GoToPage(kind, 1)),
        ("…".to_string(), CallbackAction::Noop),
        ("3".to_string(), CallbackAction::GoToPage(kind, 3)),
        ("4".to_string(), CallbackAction::GoToPage(kind, 4)),
        ("· 5 ·".to_string(), CallbackAction::Noop),
        ("6".to_string(), CallbackAction::GoToPage(kind, 6)),
        ("7".to_string(), CallbackAction::GoToPage(kind, 7)),
        ("…".to_string(), CallbackAction::Noop),
        ("10".to_string(), CallbackAction::GoToPage(kind, 10)),
    ]);
    assert_eq!(rows[12], vec![
        ("⏮".to_string(), CallbackAction::FirstPage(kind)),
        ("◀️".to_string(), CallbackAction::PrevPage(kind)),
        ("▶️".to_string(), CallbackAction::NextPage(kind)),
        ("⏭".to_string(), CallbackAction::LastPage(kind)),
    ]);
}

#[test]
fn test_first_page_disables_backward_navigation() {
    let kind = RecordKind::Applications;
    let keyboard = build_listing_keyboard(&listing(25, 1, ""));

    let rows = rows(&keyboard);

    assert_eq!(rows[11], vec![
        ("·".to_string(), CallbackAction::Noop),
        ("·".to_string(), CallbackAction::Noop),
        ("▶️".to_string(), CallbackAction::NextPage(kind)),
        ("⏭".to_string(), CallbackAction::LastPage(kind)),
    ]);
}

#[test]
fn test_listing_with_search_term_offers_clear() {
    let keyboard = build_listing_keyboard(&listing(2, 1, "Generali"));

    let rows = rows(&keyboard);

    assert_eq!(rows.last().unwrap(), &vec![
        ("🔎 Αναζήτηση".to_string(), CallbackAction::Search(RecordKind::Applications)),
        ("✖️ Καθαρισμός".to_string(), CallbackAction::ClearSearch(RecordKind::Applications)),
    ]);
}

#[test]
fn test_empty_listing_keyboard() {
    let keyboard = build_listing_keyboard(&listing(0, 1, ""));

    let rows = rows(&keyboard);

    assert_eq!(rows, vec![vec![(
        "🔎 Αναζήτηση".to_string(),
        CallbackAction::Search(RecordKind::Applications)
    )]]);
}

#[test]
fn test_details_keyboard() {
    let keyboard = build_details_keyboard(RecordKind::Customers, 42);

    assert_eq!(rows(&keyboard), vec![vec![
        ("🔙 Λίστα".to_string(), CallbackAction::BackToList(RecordKind::Customers)),
        ("❌ Διαγραφή".to_string(), CallbackAction::RemoveRecord(RecordKind::Customers, 42)),
    ]]);
}

#[test]
fn test_commissions_keyboard_navigation() {
    let total = |i: usize| CommissionTotal {
        company: format!("Εταιρεία {i}"),
        applications: 1,
        total_cents: 100,
        paid_cents: 0,
    };
    let page = Paginated {
        items: vec![total(11)],
        page: 2,
        page_size: 10,
        total_items: 21,
        total_pages: 3,
    };

    assert_eq!(rows(&build_commissions_keyboard(&page)), vec![vec![
        ("◀️".to_string(), CallbackAction::CommissionsPage(1)),
        ("▶️".to_string(), CallbackAction::CommissionsPage(3)),
    ]]);
}

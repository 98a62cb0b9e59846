use lazy_static::lazy_static;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use super::utils;
use crate::{
    bot_handler::CallbackAction,
    pagination::{PageControl, Paginated, PaginationView},
    records::{CommissionTotal, Listing},
    storage::RecordKind,
};

/// Page numbers wrap onto a new row after this many buttons.
const PAGE_BUTTONS_PER_ROW: usize = 5;

fn button(text: impl Into<String>, action: &CallbackAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text, utils::serialize_action(action))
}

/// Builds the listing keyboard: one row per record, the page numbers, the
/// first/previous/next/last controls and the search controls.
pub fn build_listing_keyboard(listing: &Listing) -> InlineKeyboardMarkup {
    let kind = listing.kind;

    let mut buttons: Vec<Vec<InlineKeyboardButton>> = listing
        .page
        .items
        .iter()
        .map(|entry| {
            vec![button(entry.label.clone(), &CallbackAction::ViewRecord(kind, entry.id))]
        })
        .collect();

    let view = PaginationView::from_page(&listing.page);
    if view.is_navigable() {
        let page_buttons: Vec<InlineKeyboardButton> =
            view.pages.iter().map(|control| page_button(kind, control)).collect();
        buttons.extend(page_buttons.chunks(PAGE_BUTTONS_PER_ROW).map(<[_]>::to_vec));
        buttons.push(
            view.navigation.iter().map(|control| navigation_button(kind, control)).collect(),
        );
    }

    let mut search_row = vec![button("🔎 Αναζήτηση", &CallbackAction::Search(kind))];
    if !listing.search_term.trim().is_empty() {
        search_row.push(button("✖️ Καθαρισμός", &CallbackAction::ClearSearch(kind)));
    }
    buttons.push(search_row);

    InlineKeyboardMarkup::new(buttons)
}

fn page_button(kind: RecordKind, control: &PageControl) -> InlineKeyboardButton {
    match *control {
        PageControl::Page { number, is_current: true } => {
            button(format!("· {number} ·"), &CallbackAction::Noop)
        }
        PageControl::Page { number, is_current: false } => {
            button(number.to_string(), &CallbackAction::GoToPage(kind, number))
        }
        _ => button("…", &CallbackAction::Noop),
    }
}

fn navigation_button(kind: RecordKind, control: &PageControl) -> InlineKeyboardButton {
    let (label, action) = match *control {
        PageControl::First { .. } => ("⏮", CallbackAction::FirstPage(kind)),
        PageControl::Prev { .. } => ("◀️", CallbackAction::PrevPage(kind)),
        PageControl::Next { .. } => ("▶️", CallbackAction::NextPage(kind)),
        PageControl::Last { .. } => ("⏭", CallbackAction::LastPage(kind)),
        PageControl::Page { .. } | PageControl::Ellipsis => ("·", CallbackAction::Noop),
    };

    // Disabled controls keep their slot as inert buttons.
    match control.target() {
        Some(_) => button(label, &action),
        None => button("·", &CallbackAction::Noop),
    }
}

pub fn build_details_keyboard(kind: RecordKind, id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        button("🔙 Λίστα", &CallbackAction::BackToList(kind)),
        button("❌ Διαγραφή", &CallbackAction::RemoveRecord(kind, id)),
    ]])
}

pub fn build_commissions_keyboard(page: &Paginated<CommissionTotal>) -> InlineKeyboardMarkup {
    let view = PaginationView::from_page(page);
    if !view.is_navigable() {
        return COMMAND_KEYBOARD.clone();
    }

    let row: Vec<InlineKeyboardButton> = view
        .navigation
        .iter()
        .filter(|control| matches!(control, PageControl::Prev { .. } | PageControl::Next { .. }))
        .map(|control| {
            let label = match control {
                PageControl::Prev { .. } => "◀️",
                _ => "▶️",
            };
            match control.target() {
                Some(target) => button(label, &CallbackAction::CommissionsPage(target)),
                None => button("·", &CallbackAction::Noop),
            }
        })
        .collect();

    InlineKeyboardMarkup::new(vec![row])
}

lazy_static! {
    pub static ref COMMAND_KEYBOARD: InlineKeyboardMarkup = InlineKeyboardMarkup::new(vec![
        vec![
            button("📋 Αιτήσεις", &CallbackAction::CmdApplications),
            button("👥 Πελάτες", &CallbackAction::CmdCustomers),
        ],
        vec![
            button("➕ Νέα αίτηση", &CallbackAction::CmdAddApplication),
            button("➕ Νέος πελάτης", &CallbackAction::CmdAddCustomer),
        ],
        vec![
            button("💶 Προμήθειες", &CallbackAction::CmdCommissions),
            button("ℹ️ Βοήθεια", &CallbackAction::CmdHelp),
        ],
    ]);
}

use std::collections::BTreeSet;

use teloxide::utils::html;

use crate::{
    bot_handler::{AddSummary, CallbackAction},
    pagination::{Paginated, view::format_info_line},
    records::{CommissionTotal, Listing, RecordDetails},
    storage::RecordKind,
};

const DATE_DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Serializes a `CallbackAction` to a JSON string. Used for keyboard buttons.
/// expect is ok because inputs are simple and controlled.
pub fn serialize_action(action: &CallbackAction) -> String {
    serde_json::to_string(action).expect("Failed to serialize action")
}

/// Formats euro cents the Greek way, e.g. `1.234,50 €`.
pub fn format_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let digits = (cents / 100).to_string();

    let mut euros = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            euros.push('.');
        }
        euros.push(digit);
    }

    format!("{sign}{euros},{:02} €", cents % 100)
}

pub fn listing_title(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Applications => "📋 Οι αιτήσεις σας",
        RecordKind::Customers => "👥 Οι πελάτες σας",
    }
}

pub fn format_listing_text(listing: &Listing) -> String {
    let mut lines = vec![format!("<b>{}</b>", listing_title(listing.kind))];

    if !listing.search_term.trim().is_empty() {
        lines.push(format!("🔎 Αναζήτηση: <i>{}</i>", html::escape(&listing.search_term)));
        if listing.page.total_items == 0 {
            lines.push("Δεν βρέθηκαν εγγραφές που να ταιριάζουν.".to_string());
            return lines.join("\n");
        }
    }

    lines.push(format_info_line(&listing.page));
    lines.join("\n")
}

pub fn format_record_details(details: &RecordDetails) -> String {
    match details {
        RecordDetails::Application(application) => [
            format!("<b>📄 Αίτηση #{}</b>", application.id),
            format!("Πελάτης: {}", html::escape(&application.customer_name)),
            format!("ΑΦΜ: {}", application.tax_id),
            format!("Εταιρεία: {}", html::escape(&application.company)),
            format!("Προϊόν: {}", html::escape(&application.product)),
            format!("Κατάσταση: {}", application.status.label()),
            format!("Προμήθεια: {}", format_amount(application.commission_cents)),
            format!("Υποβολή: {}", application.submitted_on.format(DATE_DISPLAY_FORMAT)),
        ]
        .join("\n"),
        RecordDetails::Customer(customer) => {
            let mut lines = vec![
                format!("<b>👤 Πελάτης #{}</b>", customer.id),
                format!("Ονοματεπώνυμο: {}", html::escape(&customer.full_name)),
                format!("ΑΦΜ: {}", customer.tax_id),
                format!("Τηλέφωνο: {}", html::escape(&customer.phone)),
            ];
            if let Some(email) = &customer.email {
                lines.push(format!("Email: {}", html::escape(email)));
            }
            if let Some(city) = &customer.city {
                lines.push(format!("Πόλη: {}", html::escape(city)));
            }
            lines.join("\n")
        }
    }
}

pub fn format_commissions_text(page: &Paginated<CommissionTotal>) -> String {
    if page.total_items == 0 {
        return "💶 Δεν υπάρχουν προμήθειες ακόμη.".to_string();
    }

    let mut lines = vec!["<b>💶 Προμήθειες ανά εταιρεία</b>".to_string(), String::new()];
    lines.extend(page.items.iter().map(|total| {
        format!(
            "<b>{}</b>: {} ({} αιτήσεις, εξοφλημένα {})",
            html::escape(&total.company),
            format_amount(total.total_cents),
            total.applications,
            format_amount(total.paid_cents)
        )
    }));
    lines.push(String::new());
    lines.push(format_info_line(page));

    lines.join("\n")
}

pub fn format_add_summary(summary: &AddSummary) -> String {
    let mut sections = vec![format!("<b>Αποτέλεσμα καταχώρισης ({}):</b>", summary.kind)];

    let format_category = |title: &str, items: &BTreeSet<String>| {
        (!items.is_empty()).then(|| {
            format!(
                "<b>{}:</b>\n{}",
                title,
                items
                    .iter()
                    .map(|item| format!("- {}", html::escape(item)))
                    .collect::<Vec<_>>()
                    .join("\n")
            )
        })
    };
    let format_reasons = |title: &str, items: &BTreeSet<(String, String)>| {
        (!items.is_empty()).then(|| {
            format!(
                "<b>{}:</b>\n{}",
                title,
                items
                    .iter()
                    .map(|(line, reason)| {
                        format!("- {}: {}", html::escape(line), html::escape(reason))
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            )
        })
    };

    sections.extend(
        [
            format_category("✅ Προστέθηκαν", &summary.added),
            format_category("➡️ Υπάρχουν ήδη", &summary.duplicates),
            format_reasons("⚠️ Μη έγκυρες γραμμές", &summary.invalid),
            format_category("⛔ Εκτός ορίου εγγραφών", &summary.limit_reached),
            format_reasons("❌ Σφάλματα", &summary.errors),
        ]
        .into_iter()
        .flatten(),
    );

    // Only the title
    if sections.len() == 1 {
        sections.push("Δεν δόθηκε καμία εγγραφή.".to_string());
    }

    sections.join("\n\n")
}

use crate::{
    storage::{ApplicationEntity, CustomerEntity},
    text,
};

/// Matches an application by customer, tax id, company, product or status,
/// ignoring case and Greek accents.
pub fn application_matches(application: &ApplicationEntity, term: &str) -> bool {
    [
        application.customer_name.as_str(),
        application.tax_id.as_str(),
        application.company.as_str(),
        application.product.as_str(),
        application.status.label(),
    ]
    .into_iter()
    .any(|field| text::contains_folded(field, term))
}

pub fn customer_matches(customer: &CustomerEntity, term: &str) -> bool {
    [
        Some(customer.full_name.as_str()),
        Some(customer.tax_id.as_str()),
        Some(customer.phone.as_str()),
        customer.email.as_deref(),
        customer.city.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| text::contains_folded(field, term))
}

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::text;

const DATE_INPUT_FORMAT: &str = "%d/%m/%Y";
const TAX_ID_LENGTH: usize = 9;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordParseError {
    #[error("Αναμένονταν τουλάχιστον {expected} πεδία χωρισμένα με ';', βρέθηκαν {found}")]
    MissingFields { expected: usize, found: usize },
    #[error("Το πεδίο '{0}' δεν μπορεί να είναι κενό")]
    EmptyField(&'static str),
    #[error("Μη έγκυρος ΑΦΜ '{0}': απαιτούνται 9 ψηφία")]
    InvalidTaxId(String),
    #[error("Μη έγκυρο ποσό '{0}'")]
    InvalidAmount(String),
    #[error("Μη έγκυρη ημερομηνία '{0}', αναμένεται ΗΗ/ΜΜ/ΕΕΕΕ")]
    InvalidDate(String),
    #[error("Άγνωστη κατάσταση αίτησης '{0}'")]
    InvalidStatus(String),
}

/// The two kinds of records an agent can browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    #[serde(rename = "a")]
    Applications,
    #[serde(rename = "c")]
    Customers,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Applications => write!(f, "αιτήσεις"),
            RecordKind::Customers => write!(f, "πελάτες"),
        }
    }
}

/// Lifecycle of an insurance application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Paid,
}

impl ApplicationStatus {
    /// Storage code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Paid => "paid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Σε εκκρεμότητα",
            ApplicationStatus::Approved => "Εγκρίθηκε",
            ApplicationStatus::Rejected => "Απορρίφθηκε",
            ApplicationStatus::Paid => "Εξοφλήθηκε",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = RecordParseError;

    /// Accepts storage codes as well as Greek words, ignoring case and accents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match text::fold(s).as_str() {
            "pending" | "εκκρεμει" | "σε εκκρεμοτητα" => Ok(ApplicationStatus::Pending),
            "approved" | "εγκριση" | "εγκριθηκε" | "εγκεκριμενη" => Ok(ApplicationStatus::Approved),
            "rejected" | "απορριψη" | "απορριφθηκε" | "απορριφθεισα" =>
                Ok(ApplicationStatus::Rejected),
            "paid" | "εξοφληση" | "εξοφληθηκε" | "πληρωμη" => Ok(ApplicationStatus::Paid),
            _ => Err(RecordParseError::InvalidStatus(s.trim().to_string())),
        }
    }
}

/// An insurance application submitted by an agent on behalf of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApplicationEntity {
    /// Storage id, 0 until persisted.
    pub id: i64,
    pub customer_name: String,
    /// Greek tax registration number (ΑΦΜ).
    pub tax_id: String,
    pub company: String,
    pub product: String,
    pub status: ApplicationStatus,
    /// Agent commission in euro cents.
    pub commission_cents: i64,
    pub submitted_on: NaiveDate,
}

impl ApplicationEntity {
    /// Short label used in listings.
    pub fn list_label(&self) -> String {
        format!("{} · {} · {}", self.customer_name, self.product, self.status.label())
    }
}

impl FromStr for ApplicationEntity {
    type Err = RecordParseError;

    /// Parses `name; tax id; company; product; commission; dd/mm/yyyy[; status]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = split_fields(s);
        if fields.len() < 6 {
            return Err(RecordParseError::MissingFields { expected: 6, found: fields.len() });
        }

        let status = match optional_field(&fields, 6) {
            Some(status) => status.parse()?,
            None => ApplicationStatus::default(),
        };

        Ok(Self {
            id: 0,
            customer_name: required_field(fields[0], "ονοματεπώνυμο")?,
            tax_id: parse_tax_id(fields[1])?,
            company: required_field(fields[2], "εταιρεία")?,
            product: required_field(fields[3], "προϊόν")?,
            status,
            commission_cents: parse_amount_cents(fields[4])?,
            submitted_on: parse_date(fields[5])?,
        })
    }
}

impl fmt::Display for ApplicationEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {} {}", self.customer_name, self.tax_id, self.company, self.product)
    }
}

/// A customer in an agent's portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomerEntity {
    /// Storage id, 0 until persisted.
    pub id: i64,
    pub full_name: String,
    /// Greek tax registration number (ΑΦΜ).
    pub tax_id: String,
    pub phone: String,
    pub email: Option<String>,
    pub city: Option<String>,
}

impl CustomerEntity {
    /// Short label used in listings.
    pub fn list_label(&self) -> String {
        match &self.city {
            Some(city) => format!("{} · {}", self.full_name, city),
            None => self.full_name.clone(),
        }
    }
}

impl FromStr for CustomerEntity {
    type Err = RecordParseError;

    /// Parses `name; tax id; phone[; email[; city]]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = split_fields(s);
        if fields.len() < 3 {
            return Err(RecordParseError::MissingFields { expected: 3, found: fields.len() });
        }

        Ok(Self {
            id: 0,
            full_name: required_field(fields[0], "ονοματεπώνυμο")?,
            tax_id: parse_tax_id(fields[1])?,
            phone: required_field(fields[2], "τηλέφωνο")?,
            email: optional_field(&fields, 3).map(String::from),
            city: optional_field(&fields, 4).map(String::from),
        })
    }
}

impl fmt::Display for CustomerEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name, self.tax_id)
    }
}

fn split_fields(s: &str) -> Vec<&str> {
    s.split(';').map(str::trim).collect()
}

fn required_field(value: &str, name: &'static str) -> Result<String, RecordParseError> {
    if value.is_empty() {
        return Err(RecordParseError::EmptyField(name));
    }
    Ok(value.to_string())
}

fn optional_field<'a>(fields: &[&'a str], index: usize) -> Option<&'a str> {
    fields.get(index).copied().filter(|value| !value.is_empty())
}

fn parse_tax_id(value: &str) -> Result<String, RecordParseError> {
    if value.len() != TAX_ID_LENGTH || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(RecordParseError::InvalidTaxId(value.to_string()));
    }
    Ok(value.to_string())
}

fn parse_date(value: &str) -> Result<NaiveDate, RecordParseError> {
    NaiveDate::parse_from_str(value, DATE_INPUT_FORMAT)
        .map_err(|_| RecordParseError::InvalidDate(value.to_string()))
}

/// Parses a non-negative euro amount with `,` or `.` as decimal separator and
/// at most two decimals, e.g. `125`, `125,5`, `125.50 €`.
pub fn parse_amount_cents(value: &str) -> Result<i64, RecordParseError> {
    let invalid = || RecordParseError::InvalidAmount(value.to_string());
    let cleaned = value.trim_end_matches('€').trim().replace(',', ".");

    let (whole, fraction) = cleaned.split_once('.').unwrap_or((cleaned.as_str(), ""));
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) || fraction.len() > 2 {
        return Err(invalid());
    }

    let euros: i64 = whole.parse().map_err(|_| invalid())?;
    let cents: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => fraction.parse().map_err(|_| invalid())?,
    };

    euros.checked_mul(100).and_then(|value| value.checked_add(cents)).ok_or_else(invalid)
}

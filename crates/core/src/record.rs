//! The medical record model.
//!
//! A [`MedicalRecord`] is immutable once created: there is no update operation, and fields are
//! only reachable through read-only accessors.

use crate::error::DateParseError;
use chrono::{Datelike, NaiveDate};
use medrec_types::NonEmptyText;

/// One patient entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicalRecord {
    patient_name: NonEmptyText,
    date_of_birth: NaiveDate,
    diagnosis: NonEmptyText,
}

impl MedicalRecord {
    pub fn new(
        patient_name: NonEmptyText,
        date_of_birth: NaiveDate,
        diagnosis: NonEmptyText,
    ) -> Self {
        Self {
            patient_name,
            date_of_birth,
            diagnosis,
        }
    }

    pub fn patient_name(&self) -> &NonEmptyText {
        &self.patient_name
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn diagnosis(&self) -> &NonEmptyText {
        &self.diagnosis
    }
}

impl std::fmt::Display for MedicalRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Patient: {}, Date of Birth: {}, Diagnosis: {}",
            self.patient_name,
            format_date_of_birth(self.date_of_birth),
            self.diagnosis
        )
    }
}

/// Parses a date of birth in `dd/MM/yyyy` form.
///
/// Each field is one or more ASCII digits. Only the calendar shape is checked, so dates in the
/// future are accepted, including years past 9999.
///
/// # Errors
///
/// - `DateParseError::Layout` if the text is not three `/`-separated numbers
/// - `DateParseError::NoSuchDate` if the numbers do not name a real day (for example
///   `31/02/2020`), or the year is beyond what `NaiveDate` can hold
pub fn parse_date_of_birth(input: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = input.trim();
    let layout = || DateParseError::Layout(trimmed.to_string());

    let mut fields = trimmed.split('/');
    let (Some(day), Some(month), Some(year), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(layout());
    };

    let day: u32 = parse_digits(day).ok_or_else(layout)?;
    let month: u32 = parse_digits(month).ok_or_else(layout)?;
    let year: i32 = parse_digits(year).ok_or_else(layout)?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DateParseError::NoSuchDate(trimmed.to_string()))
}

fn parse_digits<T: std::str::FromStr>(field: &str) -> Option<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Renders a date of birth in `dd/MM/yyyy` form.
pub fn format_date_of_birth(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

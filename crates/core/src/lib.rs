//! # Medical Records Core
//!
//! Core data operations for the medical records console:
//! - The immutable [`MedicalRecord`] model and `dd/MM/yyyy` date handling
//! - The in-memory [`RecordStore`] with add, delete-by-name, list, save and load
//! - The versioned binary encoding used for records files
//! - Startup configuration for where records files live
//!
//! **No console concerns**: prompting, menus and message wording belong in the `medrec` binary.

pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod record;
pub mod store;

pub use config::StoreConfig;
pub use error::{DateParseError, StoreError, StoreResult};
pub use medrec_types::{NonEmptyText, TextError};
pub use record::{format_date_of_birth, parse_date_of_birth, MedicalRecord};
pub use store::{DeleteOutcome, ListView, RecordStore};

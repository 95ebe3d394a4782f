//! The in-memory record store.
//!
//! [`RecordStore`] holds the ordered record sequence for the lifetime of a session. It is created
//! empty, replaced wholesale by [`RecordStore::load`], written wholesale by
//! [`RecordStore::save`], and discarded when dropped. Nothing is saved automatically.
//!
//! Insertion order is preserved and patient names are not unique; deleting by name removes only
//! the first case-insensitive match.

use crate::codec;
use crate::config::StoreConfig;
use crate::record::MedicalRecord;
use crate::{StoreError, StoreResult};
use chrono::NaiveDate;
use medrec_types::NonEmptyText;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Result of [`RecordStore::delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The first matching record, now removed from the store.
    Removed(MedicalRecord),
    /// No record matched, or the store was empty.
    NotFound,
}

/// Result of [`RecordStore::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView<'a> {
    Empty,
    Records(&'a [MedicalRecord]),
}

#[derive(Debug, Default)]
pub struct RecordStore {
    cfg: StoreConfig,
    records: Vec<MedicalRecord>,
}

impl RecordStore {
    /// Creates an empty store whose save/load file names resolve against `cfg`.
    pub fn new(cfg: StoreConfig) -> Self {
        Self {
            cfg,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MedicalRecord] {
        &self.records
    }

    /// Appends a new record. Duplicates are allowed.
    pub fn add(
        &mut self,
        patient_name: NonEmptyText,
        date_of_birth: NaiveDate,
        diagnosis: NonEmptyText,
    ) {
        let record = MedicalRecord::new(patient_name, date_of_birth, diagnosis);
        tracing::debug!(position = self.records.len() + 1, "adding record");
        self.records.push(record);
    }

    /// Removes the first record whose patient name matches `patient_name`, ignoring case.
    pub fn delete(&mut self, patient_name: &str) -> DeleteOutcome {
        let target = patient_name.trim();
        let position = self
            .records
            .iter()
            .position(|r| r.patient_name().eq_ignore_case(target));

        match position {
            Some(index) => {
                tracing::debug!(position = index + 1, "deleting record");
                DeleteOutcome::Removed(self.records.remove(index))
            }
            None => DeleteOutcome::NotFound,
        }
    }

    pub fn list(&self) -> ListView<'_> {
        if self.records.is_empty() {
            ListView::Empty
        } else {
            ListView::Records(&self.records)
        }
    }

    /// Writes the whole store to `file_name`, overwriting any existing file.
    ///
    /// The `.dat` extension is appended if missing, and relative names resolve against the
    /// configured data directory.
    ///
    /// # Returns
    ///
    /// The path that was written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be written.
    pub fn save(&self, file_name: &str) -> StoreResult<PathBuf> {
        let path = self.cfg.resolve_data_file(file_name.trim());
        let bytes = codec::encode(&self.records);

        fs::write(&path, bytes).map_err(|e| {
            tracing::warn!("failed to save records to {}: {}", path.display(), e);
            StoreError::Io(e)
        })?;

        tracing::info!(count = self.records.len(), "saved records to {}", path.display());
        Ok(path)
    }

    /// Replaces the store with the records held in `file_name`.
    ///
    /// The same extension and directory rules as [`RecordStore::save`] apply. The in-memory
    /// records are only replaced once the whole file has been read and decoded; on any error the
    /// store is left exactly as it was.
    ///
    /// # Returns
    ///
    /// The path that was read.
    ///
    /// # Errors
    ///
    /// - `StoreError::FileNotFound` if no file exists at the resolved path
    /// - `StoreError::Io` for any other read failure
    /// - `StoreError::Decode`, `InvalidFormat`, `UnsupportedVersion` or `InvalidRecord` if the
    ///   contents are not a compatible records file
    pub fn load(&mut self, file_name: &str) -> StoreResult<PathBuf> {
        let path = self.cfg.resolve_data_file(file_name.trim());

        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::FileNotFound(path.clone()),
            _ => StoreError::Io(e),
        })?;

        let records = codec::decode(&bytes).inspect_err(|e| {
            tracing::warn!("rejected records file {}: {}", path.display(), e);
        })?;

        tracing::info!(
            count = records.len(),
            replaced = self.records.len(),
            "loaded records from {}",
            path.display()
        );
        self.records = records;
        Ok(path)
    }
}

//! Binary encoding of the record store.
//!
//! A records file is the 4-byte magic `MREC` followed by a protobuf-encoded [`RecordFile`].
//! Fields are tagged, so later versions can add fields without breaking older files, and the
//! explicit `format_version` lets `decode` refuse files it does not understand instead of
//! misreading them.
//!
//! ```text
//! +------+---------------------------------------------+
//! | MREC | RecordFile { format_version, records: [..] } |
//! +------+---------------------------------------------+
//! ```
//!
//! Dates of birth are stored as a day count from 0001-01-01 (proleptic Gregorian, day 1), which
//! round-trips every `NaiveDate` without depending on the display format.

use crate::constants::{FILE_MAGIC, FORMAT_VERSION};
use crate::record::MedicalRecord;
use crate::{StoreError, StoreResult};
use chrono::{Datelike, NaiveDate};
use medrec_types::NonEmptyText;
use prost::Message;

/// Top-level message of a records file.
#[derive(Clone, PartialEq, Message)]
pub struct RecordFile {
    #[prost(uint32, tag = "1")]
    pub format_version: u32,
    #[prost(message, repeated, tag = "2")]
    pub records: Vec<RecordEntry>,
}

/// Wire form of a single [`MedicalRecord`].
#[derive(Clone, PartialEq, Message)]
pub struct RecordEntry {
    #[prost(string, tag = "1")]
    pub patient_name: String,
    #[prost(int32, tag = "2")]
    pub date_of_birth_days: i32,
    #[prost(string, tag = "3")]
    pub diagnosis: String,
}

impl From<&MedicalRecord> for RecordEntry {
    fn from(record: &MedicalRecord) -> Self {
        Self {
            patient_name: record.patient_name().as_str().to_string(),
            date_of_birth_days: record.date_of_birth().num_days_from_ce(),
            diagnosis: record.diagnosis().as_str().to_string(),
        }
    }
}

impl TryFrom<RecordEntry> for MedicalRecord {
    type Error = StoreError;

    fn try_from(entry: RecordEntry) -> StoreResult<Self> {
        let date_of_birth = NaiveDate::from_num_days_from_ce_opt(entry.date_of_birth_days)
            .ok_or_else(|| {
                StoreError::InvalidFormat(format!(
                    "date of birth day count out of range: {}",
                    entry.date_of_birth_days
                ))
            })?;

        Ok(MedicalRecord::new(
            NonEmptyText::new(entry.patient_name)?,
            date_of_birth,
            NonEmptyText::new(entry.diagnosis)?,
        ))
    }
}

/// Encodes the full record sequence into the on-disk representation.
pub fn encode(records: &[MedicalRecord]) -> Vec<u8> {
    let file = RecordFile {
        format_version: FORMAT_VERSION,
        records: records.iter().map(RecordEntry::from).collect(),
    };

    let mut buf = Vec::with_capacity(FILE_MAGIC.len() + file.encoded_len());
    buf.extend_from_slice(FILE_MAGIC);
    buf.extend(file.encode_to_vec());
    buf
}

/// Decodes a record sequence previously produced by [`encode`].
///
/// # Errors
///
/// - `StoreError::InvalidFormat` if the magic is missing or a date of birth is out of range
/// - `StoreError::Decode` if the protobuf payload is malformed
/// - `StoreError::UnsupportedVersion` if the file was written by an unknown format version
/// - `StoreError::InvalidRecord` if an entry has a blank name or diagnosis
pub fn decode(bytes: &[u8]) -> StoreResult<Vec<MedicalRecord>> {
    let payload = bytes
        .strip_prefix(FILE_MAGIC.as_slice())
        .ok_or_else(|| StoreError::InvalidFormat("missing records file header".into()))?;

    let file = RecordFile::decode(payload)?;
    if file.format_version != FORMAT_VERSION {
        return Err(StoreError::UnsupportedVersion(file.format_version));
    }

    file.records
        .into_iter()
        .map(MedicalRecord::try_from)
        .collect()
}

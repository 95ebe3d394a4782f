//! Constants used throughout the medical records core crate.
//!
//! File format and text format constants live here so the codec, the store and the console
//! agree on them.

/// Extension appended to save/load file names that do not already carry it.
pub const DATA_FILE_EXTENSION: &str = "dat";

/// Magic bytes written at the start of every records file.
pub const FILE_MAGIC: &[u8; 4] = b"MREC";

/// Current version of the records file encoding.
pub const FORMAT_VERSION: u32 = 1;

/// Date of birth layout shown in prompts, used for both input and display.
pub const DATE_FORMAT_HINT: &str = "dd/MM/yyyy";

/// Environment variable naming the directory that relative file names resolve against.
pub const DATA_DIR_ENV: &str = "MEDREC_DATA_DIR";

//! Benchmark file storage for `perfbase`.
//!
//! - `loader`: discovers baseline/new file pairs and parses them
//! - `writer`: 4-space JSON output with float truncation

pub mod loader;
pub mod writer;

pub use loader::{
    DEFAULT_NEW_SUFFIX, FileOutcome, LoadFailure, LoadOptions, LoadReport, classify_stem, discover,
    list_json_files, load_dataset,
};
pub use writer::{to_pretty_json, write_atomic, write_dataset};

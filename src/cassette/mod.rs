//! Cassette format for recording and replaying port interactions.
//!
//! Cassettes are YAML files. A recording session writes one cassette per
//! port; replay accepts either per-port files or a single monolithic file.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;

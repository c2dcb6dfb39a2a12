//! Structured persistence of finished result records.
//!
//! A subject's first result is inserted whole. Any later result for the same
//! subject is treated as a repeat test: only the concept projection is
//! replaced and the test counter advances.

mod json_file;
mod memory;

pub use json_file::JsonFileResultRepository;
pub use memory::InMemoryResultRepository;

use crate::scoring::ResultRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

/// Stored result plus the bookkeeping the results table keeps per subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResult {
    pub record: ResultRecord,
    pub original_test_timestamp: DateTime<Utc>,
    pub latest_test_timestamp: DateTime<Utc>,
    pub tests_taken_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    RepeatUpdated { tests_taken_count: u32 },
}

/// Storage abstraction so the CLI and tests can swap backends.
pub trait ResultRepository {
    fn save_at(
        &mut self,
        record: ResultRecord,
        at: DateTime<Utc>,
    ) -> Result<SaveOutcome, RepositoryError>;

    fn fetch(&self, subject: &str) -> Result<Option<StoredResult>, RepositoryError>;

    fn save(&mut self, record: ResultRecord) -> Result<SaveOutcome, RepositoryError> {
        self.save_at(record, Utc::now())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("cannot store a result without a subject")]
    MissingSubject,
    #[error("result store {path} unavailable: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("result store {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub(crate) fn apply_save(
    records: &mut BTreeMap<String, StoredResult>,
    record: ResultRecord,
    at: DateTime<Utc>,
) -> Result<SaveOutcome, RepositoryError> {
    if record.subject.is_empty() {
        return Err(RepositoryError::MissingSubject);
    }

    match records.get_mut(&record.subject) {
        Some(stored) => {
            stored.record.replace_concept(&record);
            stored.tests_taken_count += 1;
            stored.latest_test_timestamp = at;
            info!(
                subject = %record.subject,
                tests_taken = stored.tests_taken_count,
                "repeat test updated"
            );
            Ok(SaveOutcome::RepeatUpdated {
                tests_taken_count: stored.tests_taken_count,
            })
        }
        None => {
            info!(subject = %record.subject, "result inserted");
            records.insert(
                record.subject.clone(),
                StoredResult {
                    record,
                    original_test_timestamp: at,
                    latest_test_timestamp: at,
                    tests_taken_count: 1,
                },
            );
            Ok(SaveOutcome::Inserted)
        }
    }
}

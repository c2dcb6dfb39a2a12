use super::{apply_save, RepositoryError, ResultRepository, SaveOutcome, StoredResult};
use crate::scoring::ResultRecord;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
pub struct InMemoryResultRepository {
    records: BTreeMap<String, StoredResult>,
}

impl InMemoryResultRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ResultRepository for InMemoryResultRepository {
    fn save_at(
        &mut self,
        record: ResultRecord,
        at: DateTime<Utc>,
    ) -> Result<SaveOutcome, RepositoryError> {
        apply_save(&mut self.records, record, at)
    }

    fn fetch(&self, subject: &str) -> Result<Option<StoredResult>, RepositoryError> {
        Ok(self.records.get(subject).cloned())
    }
}

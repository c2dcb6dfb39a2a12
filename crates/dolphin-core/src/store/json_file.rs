use super::{apply_save, RepositoryError, ResultRepository, SaveOutcome, StoredResult};
use crate::scoring::ResultRecord;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Keeps every subject's stored result in one pretty-printed JSON object,
/// keyed by subject. The file is rewritten on each save.
#[derive(Debug, Clone)]
pub struct JsonFileResultRepository {
    path: PathBuf,
}

impl JsonFileResultRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, StoredResult>, RepositoryError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(self.io_error(source)),
        };

        serde_json::from_reader(BufReader::new(file)).map_err(|source| RepositoryError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, records: &BTreeMap<String, StoredResult>) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
            }
        }

        let file = File::create(&self.path).map_err(|source| self.io_error(source))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records).map_err(|source| {
            RepositoryError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        writer.flush().map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> RepositoryError {
        RepositoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ResultRepository for JsonFileResultRepository {
    fn save_at(
        &mut self,
        record: ResultRecord,
        at: DateTime<Utc>,
    ) -> Result<SaveOutcome, RepositoryError> {
        let mut records = self.read_all()?;
        let outcome = apply_save(&mut records, record, at)?;
        self.write_all(&records)?;
        Ok(outcome)
    }

    fn fetch(&self, subject: &str) -> Result<Option<StoredResult>, RepositoryError> {
        Ok(self.read_all()?.remove(subject))
    }
}

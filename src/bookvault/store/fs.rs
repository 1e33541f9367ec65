use super::{upsert, DataStore};
use crate::error::{Result, VaultError};
use crate::model::Record;
use std::fs;
use std::path::{Path, PathBuf};

pub const RECORDS_FILENAME: &str = "records.json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn records_path(&self) -> PathBuf {
        self.root.join(RECORDS_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(VaultError::Io)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<Vec<Record>> {
        let path = self.records_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).map_err(VaultError::Io)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records: Vec<Record> =
            serde_json::from_str(&content).map_err(VaultError::Serialization)?;
        Ok(records)
    }

    fn persist(&self, records: &[Record]) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(records).map_err(VaultError::Serialization)?;
        fs::write(self.records_path(), content).map_err(VaultError::Io)?;
        log::debug!(
            "wrote {} records to {}",
            records.len(),
            self.records_path().display()
        );
        Ok(())
    }
}

impl DataStore for FileStore {
    fn list_records(&self) -> Result<Vec<Record>> {
        self.load()
    }

    fn get_record(&self, id: &str) -> Result<Record> {
        self.load()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| VaultError::RecordNotFound(id.to_string()))
    }

    fn save_record(&mut self, record: &Record) -> Result<()> {
        let mut records = self.load()?;
        upsert(&mut records, record);
        self.persist(&records)
    }

    fn delete_record(&mut self, id: &str) -> Result<()> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(VaultError::RecordNotFound(id.to_string()));
        }
        self.persist(&records)
    }

    fn replace_all(&mut self, records: Vec<Record>) -> Result<()> {
        self.persist(&records)
    }
}

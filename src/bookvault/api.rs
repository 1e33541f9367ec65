//! # API Facade
//!
//! The single entry point for every vault operation, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the matching command function
//! - **Normalizes inputs** (raw selector strings become [`RecordSelector`]s)
//! - **Notifies** change handlers after each successful mutation
//! - **Returns structured types** (`Result<CmdResult>`), never strings
//!
//! Business logic lives in `commands/*.rs`; nothing here prints.
//!
//! `VaultApi<S: DataStore>` is generic over storage: `VaultApi<FileStore>` in
//! the binary, `VaultApi<InMemoryStore>` in tests. It owns the store and the
//! search engine for its whole lifetime, so there is no global record list.

use crate::commands;
use crate::config::VaultConfig;
use crate::error::{Result, VaultError};
use crate::events::{EventBus, VaultEvent};
use crate::index::{parse_selectors, RecordSelector};
use crate::model::{Field, RecordDraft, RecordPatch};
use crate::query::SearchMode;
use crate::search::SearchEngine;
use crate::store::DataStore;
use crate::validation::{self, ValidationReport};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub struct VaultApi<S: DataStore> {
    store: S,
    data_dir: PathBuf,
    config: VaultConfig,
    engine: SearchEngine,
    events: EventBus,
}

impl<S: DataStore> VaultApi<S> {
    pub fn new(store: S, data_dir: PathBuf, config: VaultConfig) -> Self {
        let engine = SearchEngine::new(config.search_mode);
        Self {
            store,
            data_dir,
            config,
            engine,
            events: EventBus::new(),
        }
    }

    /// Registers a handler called after every successful add, edit, delete or
    /// import. Handler errors are logged, never returned.
    pub fn on_change<F>(&mut self, handler: F)
    where
        F: FnMut(&VaultEvent) -> Result<()> + 'static,
    {
        self.events.subscribe(handler);
    }

    pub fn add_record(&mut self, draft: RecordDraft) -> Result<commands::CmdResult> {
        let result = commands::add::run(&mut self.store, draft)?;
        for record in &result.affected_records {
            self.events.emit(&VaultEvent::Added(record.clone()));
        }
        Ok(result)
    }

    pub fn edit_record(&mut self, selector: &str, patch: &RecordPatch) -> Result<commands::CmdResult> {
        let selector = parse_single_selector(selector)?;
        let result = commands::edit::run(&mut self.store, &selector, patch)?;
        for record in &result.affected_records {
            self.events.emit(&VaultEvent::Edited(record.clone()));
        }
        Ok(result)
    }

    pub fn delete_records<I: AsRef<str>>(&mut self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs);
        let result = commands::delete::run(&mut self.store, &selectors)?;
        let ids = result
            .affected_records
            .iter()
            .map(|r| r.id.clone())
            .collect();
        self.events.emit(&VaultEvent::Deleted(ids));
        Ok(result)
    }

    pub fn list_records(&self, sort: Option<commands::list::SortOrder>) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, sort)
    }

    pub fn view_records<I: AsRef<str>>(&self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs);
        commands::view::run(&self.store, &selectors)
    }

    /// Searches with the configured mode, or `mode` for this call only.
    pub fn search(
        &mut self,
        query: &str,
        category: Option<&str>,
        mode: Option<SearchMode>,
        sort: Option<commands::list::SortOrder>,
    ) -> Result<commands::CmdResult> {
        self.engine.set_mode(mode.unwrap_or(self.config.search_mode));
        commands::search::run(&self.store, &mut self.engine, query, category, sort)
    }

    pub fn tags(&self) -> Result<commands::CmdResult> {
        commands::tags::run(&self.store)
    }

    pub fn stats(&self, today: NaiveDate) -> Result<commands::CmdResult> {
        commands::stats::run(&self.store, &self.config, today)
    }

    pub fn import_records(&mut self, path: &Path) -> Result<commands::CmdResult> {
        let result = commands::import::run(&mut self.store, path)?;
        self.emit_imported(&result);
        Ok(result)
    }

    pub fn seed(&mut self, path: Option<&Path>) -> Result<commands::CmdResult> {
        let result = commands::import::seed(&mut self.store, path)?;
        self.emit_imported(&result);
        Ok(result)
    }

    pub fn export_records(&self, path: Option<PathBuf>, today: NaiveDate) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, path, today)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(&self.data_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    pub fn validate(&self, field: Field, value: &str) -> ValidationReport {
        validation::validate_field(field, value)
    }

    pub fn current_config(&self) -> &VaultConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn emit_imported(&mut self, result: &commands::CmdResult) {
        self.events.emit(&VaultEvent::Imported {
            count: result.affected_records.len(),
        });
    }
}

fn parse_single_selector(input: &str) -> Result<RecordSelector> {
    let mut selectors = parse_selectors(&[input]);
    if selectors.len() != 1 {
        return Err(VaultError::Api(format!(
            "Expected a single record, got '{}'",
            input
        )));
    }
    Ok(selectors.remove(0))
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::list::SortOrder;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

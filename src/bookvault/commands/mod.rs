//! # Commands
//!
//! One module per user operation. Each takes a [`DataStore`](crate::store::DataStore)
//! plus typed arguments and returns a [`CmdResult`]: the records touched or
//! listed, any computed report, and user-facing messages. Nothing here prints.

use crate::config::VaultConfig;
use crate::index::DisplayRecord;
use crate::model::Record;
use crate::search::MatchResult;
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod helpers;
pub mod import;
pub mod list;
pub mod search;
pub mod stats;
pub mod tags;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<Record>,
    pub listed_records: Vec<DisplayRecord>,
    pub match_result: Option<MatchResult>,
    pub stats: Option<stats::VaultStats>,
    pub tags: Vec<tags::TagCount>,
    pub config: Option<VaultConfig>,
    pub export_path: Option<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<DisplayRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_match_result(mut self, result: MatchResult) -> Self {
        self.match_result = Some(result);
        self
    }

    pub fn with_stats(mut self, stats: stats::VaultStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_tags(mut self, tags: Vec<tags::TagCount>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_config(mut self, config: VaultConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_export_path(mut self, path: PathBuf) -> Self {
        self.export_path = Some(path);
        self
    }
}

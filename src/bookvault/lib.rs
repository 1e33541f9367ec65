//! # Book Vault Architecture
//!
//! Book Vault is a **UI-agnostic catalog library** for books and reading notes.
//! The terminal client in `cli/` is one consumer of it; the library itself
//! never prints, never exits and never assumes a terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders text / json / html output      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Facade over commands, owns store and search engine       │
//! │  - Normalizes selectors (indexes, ranges, ids)              │
//! │  - Notifies change handlers after mutations                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, search, stats, import/export                 │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Search and highlighting
//!
//! [`query`] turns user text into a [`query::Matcher`] (literal or pattern,
//! detected from the text or forced by config). [`search`] filters records with
//! it and counts matches; [`highlight`] marks matches for display. Records are
//! never mutated by a search: highlighting is computed per cell, on demand.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: unit tests against `InMemoryStore` fixtures. Most tests live here.
//! 2. **API**: dispatch and change notification.
//! 3. **CLI**: `tests/` drives the binary against a temporary data directory.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `Record`, `Field`, drafts and patches
//! - [`validation`]: Field validators and validation reports
//! - [`query`], [`search`], [`highlight`]: Search pipeline
//! - [`events`]: Change notifications
//! - [`index`]: Display indexes and selectors (`3`, `2-4`, `book_0001`)
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and context setup
//! - [`error`]: Error types
//! - `cli`: Argument parsing and rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod highlight;
pub mod index;
pub mod init;
pub mod model;
pub mod query;
pub mod search;
pub mod store;
pub mod validation;

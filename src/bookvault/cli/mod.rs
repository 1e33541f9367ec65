//! # CLI Behavior
//!
//! One possible UI client for the vault. It is the only place that knows
//! about terminal I/O, exit codes and output formats.
//!
//! ## Naked Execution
//!
//! Running `bookvault` with no arguments lists the catalog.
//!
//! ## Output Formats
//!
//! `list`, `search` and `view` accept `--output`:
//!
//! - `text` (default): aligned rows, matches styled in the terminal.
//! - `json`: the records (and search outcome) as JSON.
//! - `html`: table rows whose cells are escaped, with matches wrapped in
//!   `<mark class="search-highlight">` elements.
//!
//! ## Data Directory
//!
//! `--data-dir`, then `BOOK_VAULT_HOME`, then the platform data directory.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and print output
//! - `render`: Output formatting (rows, stats, messages)
//! - `setup`: Argument parsing via clap, help text
//! - `styles`: Terminal styling constants
//! - `templates`: Output templates

mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;

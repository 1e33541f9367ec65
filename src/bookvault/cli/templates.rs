//! Output templates, embedded at compile time.
//!
//! Templates receive pre-computed layout (padding, truncation, bars) from
//! `render.rs` and only choose styles. Text cells arrive as lists of
//! `{kind, text}` segments so that search matches can be styled on their own.

pub const LIST_TEMPLATE: &str = include_str!("templates/list.tmp");
pub const RECORD_TEMPLATE: &str = include_str!("templates/record.tmp");
pub const HTML_ROWS_TEMPLATE: &str = include_str!("templates/html_rows.tmp");
pub const STATS_TEMPLATE: &str = include_str!("templates/stats.tmp");
pub const TAGS_TEMPLATE: &str = include_str!("templates/tags.tmp");
pub const TEXT_LIST_TEMPLATE: &str = include_str!("templates/text_list.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");

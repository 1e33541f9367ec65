//! # Rendering Module
//!
//! Styled terminal output through `outstanding` templates, plus the json and
//! html renditions of record lists.
//!
//! Layout (widths, truncation, padding, bars) is computed here because it needs
//! Unicode-aware measuring. Templates only pick styles. Search matches reach
//! the text templates as segments, so a match keeps its own style even inside
//! a truncated cell; the html rendition goes through [`highlight`] instead.

use super::styles::{names, VAULT_THEME};
use super::templates::{
    HTML_ROWS_TEMPLATE, LIST_TEMPLATE, MESSAGES_TEMPLATE, RECORD_TEMPLATE, STATS_TEMPLATE,
    TAGS_TEMPLATE, TEXT_LIST_TEMPLATE,
};
use bookvault::api::{CmdMessage, MessageLevel};
use bookvault::commands::stats::{GoalProgress, VaultStats};
use bookvault::commands::tags::TagCount;
use bookvault::config::PageUnit;
use bookvault::error::Result;
use bookvault::highlight::{escape_html, highlight, highlight_segments, MatchSegment};
use bookvault::index::DisplayRecord;
use bookvault::model::Field;
use bookvault::query::Matcher;
use bookvault::search::MatchResult;
use chrono::{DateTime, Utc};
use outstanding::{render, render_with_color, ThemeChoice};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const INDEX_WIDTH: usize = 3;
pub const COLUMN_GAP: usize = 2;
pub const GOAL_BAR_WIDTH: usize = 20;
pub const ELLIPSIS: char = '…';

/// Column widths for the text table, in display order. The last column is
/// never padded.
const COLUMNS: [(Field, &str, usize); 5] = [
    (Field::Title, "Title", 30),
    (Field::Author, "Author", 22),
    (Field::Pages, "Pages", 5),
    (Field::Tag, "Tag", 16),
    (Field::DateAdded, "Added", 10),
];

#[derive(Serialize)]
struct CellData {
    segments: Vec<MatchSegment>,
    padding: String,
    style: &'static str,
}

#[derive(Serialize)]
struct RowData {
    index: String,
    cells: Vec<CellData>,
}

#[derive(Serialize)]
struct ListData {
    header: String,
    rows: Vec<RowData>,
    empty: bool,
    empty_message: String,
}

#[derive(Serialize)]
struct HtmlRow {
    id: String,
    index: usize,
    cells: Vec<String>,
}

#[derive(Serialize)]
struct HtmlData {
    rows: Vec<HtmlRow>,
    status: String,
}

#[derive(Serialize)]
struct RecordEntry {
    index: String,
    id: String,
    title: String,
    author: String,
    pages: u32,
    tag: String,
    date_added: String,
    updated: String,
}

#[derive(Serialize)]
struct RecordData {
    records: Vec<RecordEntry>,
    empty: bool,
}

#[derive(Serialize)]
struct DayLine {
    date: String,
    bar: String,
    padding: String,
    books: usize,
}

#[derive(Serialize)]
struct CategoryLine {
    tag: String,
    padding: String,
    books: usize,
}

#[derive(Serialize)]
struct GoalLine {
    label: String,
    padding: String,
    bar: String,
    percent: u64,
    current: u64,
    target: u32,
    message: String,
    message_style: &'static str,
}

#[derive(Serialize)]
struct RecentLine {
    date: String,
    title: String,
    author: String,
}

#[derive(Serialize)]
struct StatsData {
    total_books: usize,
    total_pages: u64,
    unit_line: String,
    average_pages: u64,
    top_tag: String,
    days: Vec<DayLine>,
    categories: Vec<CategoryLine>,
    goals: Vec<GoalLine>,
    recent: Vec<RecentLine>,
}

#[derive(Serialize)]
struct TagLine {
    tag: String,
    padding: String,
    books: usize,
    books_label: &'static str,
    pages: u64,
}

#[derive(Serialize)]
struct TagsData {
    tags: Vec<TagLine>,
    empty: bool,
}

#[derive(Serialize)]
struct TextListData {
    lines: Vec<String>,
    empty_message: String,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: String,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchJson<'a> {
    status: &'a str,
    match_count: Option<usize>,
    records: &'a [DisplayRecord],
}

fn render_template<T: Serialize>(template: &str, data: &T, use_color: Option<bool>) -> String {
    match use_color {
        Some(c) => render_with_color(template, data, ThemeChoice::from(&*VAULT_THEME), c),
        None => render(template, data, ThemeChoice::from(&*VAULT_THEME)),
    }
    .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

/// Renders records as an aligned table, styling search matches.
pub fn render_record_list(records: &[DisplayRecord], matcher: Option<&Matcher>) -> String {
    render_record_list_internal(records, matcher, None)
}

fn render_record_list_internal(
    records: &[DisplayRecord],
    matcher: Option<&Matcher>,
    use_color: Option<bool>,
) -> String {
    let rows = records
        .iter()
        .map(|dr| RowData {
            index: format!("{:>width$}. ", dr.index, width = INDEX_WIDTH),
            cells: COLUMNS
                .iter()
                .enumerate()
                .map(|(i, (field, _, width))| {
                    let width = (i + 1 < COLUMNS.len()).then_some(*width);
                    make_cell(&dr.record.field_text(*field), matcher, width, cell_style(*field))
                })
                .collect(),
        })
        .collect();

    let data = ListData {
        header: table_header(),
        rows,
        empty: records.is_empty(),
        empty_message: "No books found.".to_string(),
    };
    render_template(LIST_TEMPLATE, &data, use_color)
}

fn table_header() -> String {
    let mut header = " ".repeat(INDEX_WIDTH + 2);
    for (i, (_, label, width)) in COLUMNS.iter().enumerate() {
        if i + 1 < COLUMNS.len() {
            header.push_str(&format!("{:<w$}", label, w = width + COLUMN_GAP));
        } else {
            header.push_str(label);
        }
    }
    header
}

fn cell_style(field: Field) -> &'static str {
    match field {
        Field::Pages => names::PAGES,
        Field::Tag => names::TAG,
        Field::DateAdded => names::TIME,
        Field::Title | Field::Author => names::CELL,
    }
}

fn make_cell(
    text: &str,
    matcher: Option<&Matcher>,
    width: Option<usize>,
    style: &'static str,
) -> CellData {
    let segments = highlight_segments(text, matcher);
    let Some(width) = width else {
        return CellData {
            segments,
            padding: String::new(),
            style,
        };
    };

    let segments = truncate_segments(segments, width);
    let used: usize = segments.iter().map(|s| s.text().width()).sum();
    CellData {
        segments,
        padding: " ".repeat(width.saturating_sub(used) + COLUMN_GAP),
        style,
    }
}

/// Cuts segments to `max_width` columns, ending with an ellipsis when anything
/// was dropped.
fn truncate_segments(segments: Vec<MatchSegment>, max_width: usize) -> Vec<MatchSegment> {
    let total: usize = segments.iter().map(|s| s.text().width()).sum();
    if total <= max_width {
        return segments;
    }

    let mut remaining = max_width.saturating_sub(1);
    let mut kept = Vec::new();
    for segment in segments {
        let width = segment.text().width();
        if width <= remaining {
            remaining -= width;
            kept.push(segment);
            continue;
        }
        let head = take_width(segment.text(), remaining).to_string();
        if !head.is_empty() {
            kept.push(match segment {
                MatchSegment::Plain(_) => MatchSegment::Plain(head),
                MatchSegment::Match(_) => MatchSegment::Match(head),
            });
        }
        break;
    }
    kept.push(MatchSegment::Plain(ELLIPSIS.to_string()));
    kept
}

/// Renders records as `<tr>` rows with escaped, highlighted cells.
pub fn render_records_html(
    records: &[DisplayRecord],
    matcher: Option<&Matcher>,
    status: Option<&str>,
) -> String {
    let rows = records
        .iter()
        .map(|dr| HtmlRow {
            id: escape_html(&dr.record.id),
            index: dr.index.0,
            cells: Field::all()
                .iter()
                .map(|field| highlight(&dr.record.field_text(*field), matcher))
                .collect(),
        })
        .collect();

    let data = HtmlData {
        rows,
        status: status.map(escape_html).unwrap_or_default(),
    };
    render_template(HTML_ROWS_TEMPLATE, &data, Some(false))
}

pub fn render_records_json(records: &[DisplayRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn render_search_json(records: &[DisplayRecord], outcome: &MatchResult) -> Result<String> {
    let payload = SearchJson {
        status: &outcome.status_message,
        match_count: outcome.match_count,
        records,
    };
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Renders every field of each record, one block per record.
pub fn render_full_records(records: &[DisplayRecord]) -> String {
    render_full_records_internal(records, None)
}

fn render_full_records_internal(records: &[DisplayRecord], use_color: Option<bool>) -> String {
    let entries = records
        .iter()
        .map(|dr| RecordEntry {
            index: format!("{}.", dr.index),
            id: dr.record.id.clone(),
            title: dr.record.title.clone(),
            author: dr.record.author.clone(),
            pages: dr.record.pages,
            tag: dr.record.tag.clone(),
            date_added: dr.record.date_added.clone(),
            updated: dr
                .record
                .updated_at
                .map(format_time_ago)
                .unwrap_or_default(),
        })
        .collect();

    let data = RecordData {
        records: entries,
        empty: records.is_empty(),
    };
    render_template(RECORD_TEMPLATE, &data, use_color)
}

pub fn render_stats(stats: &VaultStats) -> String {
    render_stats_internal(stats, None)
}

fn render_stats_internal(stats: &VaultStats, use_color: Option<bool>) -> String {
    let busiest = stats
        .last_seven_days
        .iter()
        .map(|d| d.books)
        .max()
        .unwrap_or(0);
    let days = stats
        .last_seven_days
        .iter()
        .map(|d| DayLine {
            date: d.date.clone(),
            bar: "█".repeat(d.books),
            padding: " ".repeat(busiest - d.books),
            books: d.books,
        })
        .collect();

    let tag_width = stats
        .top_categories
        .iter()
        .map(|c| c.tag.width())
        .max()
        .unwrap_or(0);
    let categories = stats
        .top_categories
        .iter()
        .map(|c| CategoryLine {
            tag: c.tag.clone(),
            padding: " ".repeat(tag_width - c.tag.width() + COLUMN_GAP),
            books: c.books,
        })
        .collect();

    let books_message = if stats.yearly_books.achieved() {
        "Goal reached!".to_string()
    } else {
        format!(
            "{} books to go",
            u64::from(stats.yearly_books.target) - stats.yearly_books.current
        )
    };
    let goals = vec![
        goal_line(
            "Pages this month",
            &stats.monthly_pages,
            stats.monthly_pages.remaining_message(),
        ),
        goal_line("Books this year", &stats.yearly_books, books_message),
    ];

    let recent = stats
        .recent_books
        .iter()
        .map(|r| RecentLine {
            date: r.date_added.clone(),
            title: truncate_to_width(&r.title, 40),
            author: r.author.clone(),
        })
        .collect();

    let unit_line = match stats.page_unit {
        PageUnit::Pages => String::new(),
        unit => format!("{:.1} {}", stats.total_in_unit, unit),
    };

    let data = StatsData {
        total_books: stats.total_books,
        total_pages: stats.total_pages,
        unit_line,
        average_pages: stats.average_pages,
        top_tag: stats.top_tag.clone().unwrap_or_else(|| "-".to_string()),
        days,
        categories,
        goals,
        recent,
    };
    render_template(STATS_TEMPLATE, &data, use_color)
}

fn goal_line(label: &str, progress: &GoalProgress, message: String) -> GoalLine {
    let filled = (progress.bar_percent as usize * GOAL_BAR_WIDTH) / 100;
    GoalLine {
        label: label.to_string(),
        padding: " ".repeat(18usize.saturating_sub(label.width())),
        bar: format!(
            "{}{}",
            "█".repeat(filled),
            "░".repeat(GOAL_BAR_WIDTH - filled)
        ),
        percent: progress.percent,
        current: progress.current,
        target: progress.target,
        message,
        message_style: if progress.achieved() {
            names::SUCCESS
        } else {
            names::INFO
        },
    }
}

pub fn render_tags(tags: &[TagCount]) -> String {
    render_tags_internal(tags, None)
}

fn render_tags_internal(tags: &[TagCount], use_color: Option<bool>) -> String {
    let width = tags.iter().map(|t| t.tag.width()).max().unwrap_or(0);
    let lines = tags
        .iter()
        .map(|t| TagLine {
            tag: t.tag.clone(),
            padding: " ".repeat(width - t.tag.width() + COLUMN_GAP),
            books: t.books,
            books_label: if t.books == 1 { "book" } else { "books" },
            pages: t.pages,
        })
        .collect();

    let data = TagsData {
        tags: lines,
        empty: tags.is_empty(),
    };
    render_template(TAGS_TEMPLATE, &data, use_color)
}

pub fn render_text_list(lines: &[String], empty_message: &str) -> String {
    render_text_list_internal(lines, empty_message, None)
}

fn render_text_list_internal(
    lines: &[String],
    empty_message: &str,
    use_color: Option<bool>,
) -> String {
    let data = TextListData {
        lines: lines.to_vec(),
        empty_message: empty_message.to_string(),
    };
    render_template(TEXT_LIST_TEMPLATE, &data, use_color)
}

/// Renders command messages using the template system with themed styles.
pub fn render_messages(messages: &[CmdMessage]) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let message_data: Vec<MessageData> = messages
        .iter()
        .map(|msg| {
            let style = match msg.level {
                MessageLevel::Info => names::INFO,
                MessageLevel::Success => names::SUCCESS,
                MessageLevel::Warning => names::WARNING,
                MessageLevel::Error => names::ERROR,
            };
            MessageData {
                content: msg.content.clone(),
                style: style.to_string(),
            }
        })
        .collect();

    let data = MessagesData {
        messages: message_data,
    };

    render(MESSAGES_TEMPLATE, &data, ThemeChoice::from(&*VAULT_THEME)).unwrap_or_else(|_| {
        messages
            .iter()
            .map(|m| format!("{}\n", m.content))
            .collect()
    })
}

pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}

/// Longest prefix of `s` that fits in `max_width` columns.
fn take_width(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (pos, c) in s.char_indices() {
        width += c.width().unwrap_or(0);
        if width > max_width {
            return &s[..pos];
        }
    }
    s
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = take_width(s, max_width.saturating_sub(1)).to_string();
    result.push(ELLIPSIS);
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}

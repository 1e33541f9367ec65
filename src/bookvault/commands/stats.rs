//! Dashboard numbers over the whole catalog.
//!
//! Everything is computed relative to a caller-supplied `today`, so results
//! are reproducible in tests.

use crate::commands::tags::{count_tags, TagCount};
use crate::commands::CmdResult;
use crate::config::{PageUnit, VaultConfig};
use crate::error::Result;
use crate::model::Record;
use crate::store::DataStore;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

const TOP_CATEGORIES: usize = 3;
const RECENT_BOOKS: usize = 3;
const TREND_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub date: String,
    pub books: usize,
}

/// Progress towards a target. `percent` is unclamped; `bar_percent` is capped at 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub current: u64,
    pub target: u32,
    pub percent: u64,
    pub bar_percent: u64,
}

impl GoalProgress {
    fn new(current: u64, target: u32) -> Self {
        let ratio = if target == 0 {
            0.0
        } else {
            current as f64 / f64::from(target) * 100.0
        };
        let percent = ratio.round() as u64;
        Self {
            current,
            target,
            percent,
            bar_percent: percent.min(100),
        }
    }

    pub fn achieved(&self) -> bool {
        self.current >= u64::from(self.target)
    }

    /// `"N pages remaining to reach target"` or `"Target exceeded by N pages!"`.
    pub fn remaining_message(&self) -> String {
        let target = u64::from(self.target);
        if self.current <= target {
            format!("{} pages remaining to reach target", target - self.current)
        } else {
            format!("Target exceeded by {} pages!", self.current - target)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VaultStats {
    pub total_books: usize,
    pub total_pages: u64,
    pub average_pages: u64,
    pub top_tag: Option<String>,
    pub last_seven_days: Vec<DayCount>,
    pub top_categories: Vec<TagCount>,
    pub recent_books: Vec<Record>,
    pub monthly_pages: GoalProgress,
    pub yearly_books: GoalProgress,
    pub page_unit: PageUnit,
    pub total_in_unit: f64,
}

pub fn compute(records: &[Record], config: &VaultConfig, today: NaiveDate) -> VaultStats {
    let total_books = records.len();
    let total_pages: u64 = records.iter().map(|r| u64::from(r.pages)).sum();
    let average_pages = if total_books == 0 {
        0
    } else {
        (total_pages as f64 / total_books as f64).round() as u64
    };

    let tags = count_tags(records);
    // later tags win ties
    let top_tag = tags
        .iter()
        .fold(None::<&TagCount>, |best, candidate| match best {
            Some(b) if b.books > candidate.books => Some(b),
            _ => Some(candidate),
        })
        .map(|t| t.tag.clone());

    let mut top_categories = tags;
    top_categories.sort_by(|a, b| b.books.cmp(&a.books));
    top_categories.truncate(TOP_CATEGORIES);

    let mut recent_books = records.to_vec();
    recent_books.sort_by(|a, b| b.date_added.cmp(&a.date_added));
    recent_books.truncate(RECENT_BOOKS);

    let month_prefix = today.format("%Y-%m-").to_string();
    let monthly: u64 = records
        .iter()
        .filter(|r| r.date_added.starts_with(&month_prefix))
        .map(|r| u64::from(r.pages))
        .sum();

    VaultStats {
        total_books,
        total_pages,
        average_pages,
        top_tag,
        last_seven_days: trend(records, today),
        top_categories,
        recent_books,
        monthly_pages: GoalProgress::new(monthly, config.pages_target),
        yearly_books: GoalProgress::new(total_books as u64, config.books_target),
        page_unit: config.page_unit,
        total_in_unit: config.page_unit.convert(total_pages),
    }
}

fn trend(records: &[Record], today: NaiveDate) -> Vec<DayCount> {
    (0..TREND_DAYS)
        .rev()
        .map(|offset| {
            let date = (today - Duration::days(offset)).format("%Y-%m-%d").to_string();
            let books = records.iter().filter(|r| r.date_added == date).count();
            DayCount { date, books }
        })
        .collect()
}

pub fn run<S: DataStore>(store: &S, config: &VaultConfig, today: NaiveDate) -> Result<CmdResult> {
    let records = store.list_records()?;
    Ok(CmdResult::default().with_stats(compute(&records, config, today)))
}

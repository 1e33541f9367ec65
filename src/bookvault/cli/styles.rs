use console::Style;
use once_cell::sync::Lazy;
use outstanding::{rgb_to_ansi256, Theme};

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const MUTED: &str = "muted";
    pub const MATCH: &str = "match";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
    pub const TITLE: &str = "title";
    pub const TIME: &str = "time";
    pub const LIST_INDEX: &str = "list-index";
    pub const CELL: &str = "cell";
    pub const PAGES: &str = "pages";
    pub const TAG: &str = "tag";
    pub const LABEL: &str = "label";
    pub const HEADER: &str = "header";
    pub const BAR: &str = "bar";
}

pub static VAULT_THEME: Lazy<Theme> = Lazy::new(|| {
    let muted = Style::new().color256(rgb_to_ansi256((154, 154, 154)));
    let gold = Style::new().color256(rgb_to_ansi256((196, 140, 0)));

    Theme::new()
        .add(names::MUTED, muted.clone())
        .add(
            names::MATCH,
            Style::new()
                .black()
                .on_color256(rgb_to_ansi256((255, 235, 59))),
        )
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted.clone())
        .add(names::TITLE, Style::new().bold())
        .add(names::TIME, muted.clone().italic())
        .add(names::LIST_INDEX, gold.clone())
        .add(names::CELL, Style::new())
        .add(names::PAGES, Style::new().cyan())
        .add(names::TAG, Style::new().color256(rgb_to_ansi256((0, 128, 0))))
        .add(names::LABEL, muted)
        .add(names::HEADER, gold.bold())
        .add(names::BAR, Style::new().color256(rgb_to_ansi256((229, 185, 0))))
});

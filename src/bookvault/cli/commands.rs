//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the logger
//! - Handles argument parsing
//! - Formats output for human (or script) consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Resolves the data directory and builds the API
//! - `handle_*()`: Per-command handlers that call the API and print output

use super::render::{
    print_messages, render_full_records, render_record_list, render_records_html,
    render_records_json, render_search_json, render_stats, render_tags, render_text_list,
};
use super::setup::{
    print_grouped_help, print_help_for_command, print_subcommand_help, Cli, Commands,
    CoreCommands, DataCommands, MiscCommands, OutputFormat, RecordCommands,
};
use bookvault::api::{CmdMessage, ConfigAction, SortOrder, VaultApi};
use bookvault::commands::helpers::ensure_valid;
use bookvault::error::Result;
use bookvault::init::{initialize, resolve_data_dir};
use bookvault::model::{Field, RecordDraft, RecordPatch};
use bookvault::query::SearchMode;
use bookvault::store::fs::FileStore;
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;

struct AppContext {
    api: VaultApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.help {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(());
    }

    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        return handle_help(command.clone());
    }

    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Core(cmd)) => match cmd {
            CoreCommands::List { sort, output } => handle_list(&mut ctx, sort, output),
            CoreCommands::Search {
                query,
                tag,
                mode,
                sort,
                output,
            } => handle_search(&mut ctx, query, tag, mode, sort, output),
            CoreCommands::Add {
                title,
                author,
                pages,
                tag,
                date,
            } => handle_add(
                &mut ctx,
                RecordDraft {
                    title,
                    author,
                    pages,
                    tag,
                    date_added: date,
                },
            ),
            CoreCommands::Stats => handle_stats(&mut ctx),
            CoreCommands::Tags => handle_tags(&mut ctx),
        },
        Some(Commands::Record(cmd)) => match cmd {
            RecordCommands::View { indexes, output } => handle_view(&mut ctx, indexes, output),
            RecordCommands::Edit {
                index,
                title,
                author,
                pages,
                tag,
                date,
            } => handle_edit(
                &mut ctx,
                index,
                RecordPatch {
                    title,
                    author,
                    pages,
                    tag,
                    date_added: date,
                },
            ),
            RecordCommands::Delete { indexes } => handle_delete(&mut ctx, indexes),
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Import { file } => handle_import(&mut ctx, file),
            DataCommands::Export { file } => handle_export(&mut ctx, file),
            DataCommands::Seed { file } => handle_seed(&mut ctx, file),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Config { key, value } => handle_config(&mut ctx, key, value),
            MiscCommands::Validate { field, value } => handle_validate(&ctx, field, value),
            MiscCommands::Help { command } => handle_help(command),
        },
        None => handle_list(&mut ctx, None, OutputFormat::Text),
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    let ctx = initialize(&data_dir)?;
    Ok(AppContext { api: ctx.api })
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn handle_list(ctx: &mut AppContext, sort: Option<SortOrder>, output: OutputFormat) -> Result<()> {
    let result = ctx.api.list_records(sort)?;
    match output {
        OutputFormat::Text => print!("{}", render_record_list(&result.listed_records, None)),
        OutputFormat::Json => println!("{}", render_records_json(&result.listed_records)?),
        OutputFormat::Html => print!("{}", render_records_html(&result.listed_records, None, None)),
    }
    Ok(())
}

fn handle_search(
    ctx: &mut AppContext,
    query: Vec<String>,
    tag: Option<String>,
    mode: Option<SearchMode>,
    sort: Option<SortOrder>,
    output: OutputFormat,
) -> Result<()> {
    let query = query.join(" ");
    let result = ctx.api.search(&query, tag.as_deref(), mode, sort)?;
    let outcome = result.match_result.as_ref();
    let matcher = outcome.and_then(|m| m.matcher.as_ref());

    match output {
        OutputFormat::Text => {
            print!("{}", render_record_list(&result.listed_records, matcher));
            print_messages(&result.messages);
        }
        OutputFormat::Json => {
            if let Some(outcome) = outcome {
                println!("{}", render_search_json(&result.listed_records, outcome)?);
            }
        }
        OutputFormat::Html => {
            let status = outcome.map(|m| m.status_message.as_str());
            print!("{}", render_records_html(&result.listed_records, matcher, status));
        }
    }
    Ok(())
}

fn handle_add(ctx: &mut AppContext, draft: RecordDraft) -> Result<()> {
    let result = ctx.api.add_record(draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.stats(today())?;
    if let Some(stats) = &result.stats {
        print!("{}", render_stats(stats));
    }
    Ok(())
}

fn handle_tags(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.tags()?;
    print!("{}", render_tags(&result.tags));
    Ok(())
}

fn handle_view(ctx: &mut AppContext, indexes: Vec<String>, output: OutputFormat) -> Result<()> {
    let result = ctx.api.view_records(&indexes)?;
    match output {
        OutputFormat::Text => print!("{}", render_full_records(&result.listed_records)),
        OutputFormat::Json => println!("{}", render_records_json(&result.listed_records)?),
        OutputFormat::Html => print!("{}", render_records_html(&result.listed_records, None, None)),
    }
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, index: String, patch: RecordPatch) -> Result<()> {
    let result = ctx.api.edit_record(&index, &patch)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_records(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: PathBuf) -> Result<()> {
    let result = ctx.api.import_records(&file)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &mut AppContext, file: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export_records(file, today())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_seed(ctx: &mut AppContext, file: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.seed(file.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.clone(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if key.is_none() {
        let lines: Vec<String> = result
            .config
            .iter()
            .flat_map(|config| config.list_all())
            .map(|(k, v)| format!("{} = {}", k, v))
            .collect();
        print!("{}", render_text_list(&lines, "No configuration values."));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_validate(ctx: &AppContext, field: Field, value: String) -> Result<()> {
    let report = ctx.api.validate(field, &value);
    let warnings: Vec<CmdMessage> = report
        .warnings
        .iter()
        .map(|w| CmdMessage::warning(w.to_string()))
        .collect();
    print_messages(&warnings);
    ensure_valid(&report)?;
    print_messages(&[CmdMessage::success(format!("{}: valid", field))]);
    Ok(())
}

fn handle_help(command: Option<String>) -> Result<()> {
    match command {
        Some(cmd) => print_help_for_command(&cmd),
        None => print_grouped_help(),
    }
    Ok(())
}

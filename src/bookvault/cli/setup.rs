use bookvault::api::SortOrder;
use bookvault::model::Field;
use bookvault::query::SearchMode;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "bookvault",
    bin_name = "bookvault",
    version = get_version(),
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Personal book & notes catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Vault directory (defaults to $BOOK_VAULT_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Core,
    Record,
    Data,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Core => "Core Commands:",
            CommandGroup::Record => "Per-Book Commands:",
            CommandGroup::Data => "Data Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "search" | "add" | "stats" | "tags" => Some(CommandGroup::Core),
            "view" | "edit" | "delete" => Some(CommandGroup::Record),
            "import" | "export" | "seed" => Some(CommandGroup::Data),
            "config" | "validate" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    /// Returns all groups in display order
    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Core,
            CommandGroup::Record,
            CommandGroup::Data,
            CommandGroup::Misc,
        ]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("bookvault {version}\n"));
    output.push_str("Personal book & notes catalog\n");
    output.push('\n');
    output.push_str("Usage: bookvault [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --data-dir <DIR>  Vault directory\n");
    output.push_str("  -v, --verbose         Verbose output\n");
    output.push_str("  -h, --help            Print help\n");
    output.push_str("  -V, --version         Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a specific subcommand using clap's built-in rendering
pub fn print_subcommand_help(command: &Option<Commands>) {
    let subcommand_name = match command {
        Some(Commands::Core(c)) => match c {
            CoreCommands::List { .. } => "list",
            CoreCommands::Search { .. } => "search",
            CoreCommands::Add { .. } => "add",
            CoreCommands::Stats => "stats",
            CoreCommands::Tags => "tags",
        },
        Some(Commands::Record(c)) => match c {
            RecordCommands::View { .. } => "view",
            RecordCommands::Edit { .. } => "edit",
            RecordCommands::Delete { .. } => "delete",
        },
        Some(Commands::Data(c)) => match c {
            DataCommands::Import { .. } => "import",
            DataCommands::Export { .. } => "export",
            DataCommands::Seed { .. } => "seed",
        },
        Some(Commands::Misc(c)) => match c {
            MiscCommands::Config { .. } => "config",
            MiscCommands::Validate { .. } => "validate",
            MiscCommands::Help { .. } => "help",
        },
        None => {
            print_grouped_help();
            return;
        }
    };

    print_help_for_command(subcommand_name);
}

pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            let help = subcmd.render_help();
            print!("{}", help);
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Record(RecordCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum CoreCommands {
    /// List books
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Sort order, e.g. title-asc, pages-desc, date-desc
        #[arg(short, long)]
        sort: Option<SortOrder>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Search books by title, author or tag
    #[command(alias = "s", display_order = 2)]
    Search {
        /// Query words (joined with spaces). `* ? [ (` switch to pattern matching
        #[arg(num_args = 0..)]
        query: Vec<String>,

        /// Only show books with exactly this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Override the configured search mode (auto, literal, advanced)
        #[arg(short, long)]
        mode: Option<SearchMode>,

        /// Sort the matches, e.g. title-asc, pages-desc
        #[arg(short, long)]
        sort: Option<SortOrder>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Add a book
    #[command(alias = "n", display_order = 3)]
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        author: String,

        #[arg(long)]
        pages: String,

        /// Category (letters, spaces and hyphens)
        #[arg(long)]
        tag: String,

        /// Date added, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Show reading statistics and goals
    #[command(display_order = 4)]
    Stats,

    /// List tags with book and page counts
    #[command(display_order = 5)]
    Tags,
}

#[derive(Subcommand, Debug)]
pub enum RecordCommands {
    /// View one or more books
    #[command(alias = "v", display_order = 10)]
    View {
        /// Indexes, ranges or ids (e.g. 1 2-4 book_0001)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Edit fields of a book
    #[command(alias = "e", display_order = 11)]
    Edit {
        /// Index or id of the book
        index: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        pages: Option<String>,

        #[arg(long)]
        tag: Option<String>,

        #[arg(long)]
        date: Option<String>,
    },

    /// Delete one or more books
    #[command(alias = "rm", display_order = 12)]
    Delete {
        /// Indexes, ranges or ids (e.g. 1 3-5 book_0002)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Replace the catalog with records from a JSON file
    #[command(display_order = 20)]
    Import {
        /// JSON array of records
        file: PathBuf,
    },

    /// Write the catalog to a JSON file
    #[command(display_order = 21)]
    Export {
        /// Target file (defaults to book-vault-YYYY-MM-DD.json in the current dir)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Load the sample catalog, or a seed file
    #[command(display_order = 22)]
    Seed {
        /// Seed file (defaults to the bundled sample catalog)
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (e.g., search_mode)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Check a value against a field's rules
    #[command(display_order = 31)]
    Validate {
        /// title, author, pages, tag or date
        field: Field,

        value: String,
    },

    /// Print help for bookvault or a subcommand
    #[command(display_order = 32)]
    Help {
        /// Subcommand to get help for
        command: Option<String>,
    },
}

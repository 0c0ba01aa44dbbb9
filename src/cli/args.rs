use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "logbook",
    version,
    about = "client for a remote event log",
    long_about = "logbook submits dated entries to a remote event-log API and browses them as a filterable, paginated table.\n\nExamples:\n  logbook list\n  logbook list --type alert --date 2024-01-05 --page 2\n  logbook submit --datetime 2024-03-01T12:00 --description \"backup finished\"\n  logbook shell\n\nTip: Use init-config once, then keep the API URL and key in ~/.logbook/config.yml."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        global = true,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        global = true,
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        global = true,
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        global = true,
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.logbook/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'U',
        long = "api-url",
        visible_alias = "url",
        value_name = "URL",
        global = true,
        help_heading = "HTTP",
        help = "Base URL of the log API (e.g. http://localhost:3000/api/logs)."
    )]
    pub api_url: Option<String>,

    #[arg(
        short = 'k',
        long = "api-key",
        visible_alias = "key",
        value_name = "KEY",
        global = true,
        help_heading = "HTTP",
        help = "API key sent in the x-api-key header (or set LOGBOOK_API_KEY)."
    )]
    pub api_key: Option<String>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        global = true,
        help_heading = "HTTP",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        global = true,
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch entries and print one page of the filtered table.
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Create an entry, then print the refreshed table.
    #[command(visible_alias = "add")]
    Submit(SubmitArgs),

    /// Browse interactively: one command per line.
    Shell(ViewArgs),

    /// Write a commented default config file.
    InitConfig,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    #[arg(
        short = 's',
        long = "ps",
        visible_alias = "page-size",
        value_name = "N",
        help_heading = "Table",
        help = "Entries per page."
    )]
    pub page_size: Option<usize>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "format",
        value_name = "FORMAT",
        help_heading = "Table",
        help = "Output format (text or json)."
    )]
    pub output_format: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[arg(
        short = 't',
        long = "type",
        visible_alias = "event-type",
        value_name = "TEXT",
        help_heading = "Filters",
        help = "Only entries whose type contains TEXT (case-insensitive)."
    )]
    pub type_filter: Option<String>,

    #[arg(
        short = 'd',
        long = "date",
        value_name = "YYYY-MM-DD",
        help_heading = "Filters",
        help = "Only entries dated on this UTC day."
    )]
    pub date: Option<String>,

    #[arg(
        short = 'P',
        long = "page",
        value_name = "N",
        help_heading = "Table",
        help = "Page to show (out-of-range pages fall back to page 1)."
    )]
    pub page: Option<usize>,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SubmitArgs {
    #[arg(
        short = 'd',
        long = "datetime",
        visible_alias = "when",
        value_name = "DATETIME",
        help_heading = "Entry",
        help = "Event date-time (e.g. 2024-03-01T12:00)."
    )]
    pub datetime: String,

    #[arg(
        short = 'm',
        long = "description",
        visible_alias = "desc",
        value_name = "TEXT",
        help_heading = "Entry",
        help = "Event description."
    )]
    pub description: String,

    #[command(flatten)]
    pub view: ViewArgs,
}

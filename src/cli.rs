use clap::{Parser, Subcommand};

// Display order for log level option (placed at end of help text)
const LOG_LEVEL_DISPLAY_ORDER: usize = 100;

/// CLI arguments
#[derive(Parser)]
#[command(name = "covnav", version, about = "Navigate coding-standard violations and apply guarded one-line fixes", long_about = None)]
pub struct Cli {
    /// Log level (see https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
    /// [env: COVNAV_LOG=] [default: info]
    #[arg(
        long,
        env = "COVNAV_LOG",
        default_value = "info",
        global = true,
        hide_default_value = true,
        hide_env = true,
        display_order = LOG_LEVEL_DISPLAY_ORDER,
        verbatim_doc_comment
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Build a violation index from analyzer findings in a directory
    Scan(ScanArgs),
    /// Apply a guarded single-line fix
    Apply(ApplyArgs),
    /// Resolve a violation identifier and jump to its location
    Resolve(ResolveArgs),
}

/// Arguments for the scan command
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Directory holding the analyzer findings; the index is written here.
    /// A leading ~ expands to the home directory
    #[arg(verbatim_doc_comment)]
    pub directory: String,

    /// Findings file to read, relative to the directory
    /// [default: from config, findings.json]
    #[arg(long, verbatim_doc_comment)]
    pub findings: Option<String>,

    /// Path to config file
    #[arg(long, default_value = "covnav.toml")]
    pub config: String,
}

/// Arguments for the apply command
#[derive(Parser, Debug)]
pub struct ApplyArgs {
    /// File to fix
    pub file: String,

    /// 1-based line number to replace
    pub line: u32,

    /// Exact current content the line must have (not a pattern)
    #[arg(long, allow_hyphen_values = true)]
    pub expected: String,

    /// Content to write in its place
    #[arg(long, allow_hyphen_values = true)]
    pub replacement: String,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Identifier token, e.g. violation_3
    pub token: String,

    /// Path to the index file
    #[arg(long, default_value = "index.covrst")]
    pub index: String,
}

use clap::Parser;
use std::path::PathBuf;

/// Filtered, deduplicated tree view of a Playwright test catalog.
#[derive(Parser, Debug)]
#[command(name = "pwtree")]
#[command(about = "Filtered tree view of a Playwright test catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Project(s) to show (repeatable or space-separated)
    #[arg(long = "project", value_name = "NAME", value_delimiter = ' ', action = clap::ArgAction::Append)]
    pub projects: Vec<String>,

    /// Semicolon-separated filter terms; prefix a term with '-' to exclude
    #[arg(long = "filter", value_name = "TERMS", allow_hyphen_values = true)]
    pub filter: Option<String>,

    /// Show only tests related to changed files
    #[arg(long = "only-changed")]
    pub only_changed: bool,

    /// Show only tests that failed last run
    #[arg(long = "last-failed")]
    pub last_failed: bool,

    /// Show only tests with a [skipped] annotation
    #[arg(long = "skipped")]
    pub skipped: bool,

    /// Show only tests with a [fixme] annotation
    #[arg(long = "fixme")]
    pub fixme: bool,

    /// Show only tests with a [fail] annotation
    #[arg(long = "fail")]
    pub fail: bool,

    /// Path to the Playwright config file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read listing JSON from a file instead of invoking Playwright
    #[arg(long = "json-data-path", value_name = "FILE")]
    pub json_data_path: Option<PathBuf>,

    /// Disable colors and emojis for CI environments
    #[arg(long = "ci")]
    pub ci: bool,
}

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "locscope", about = "Explore a repository's commit history as an interactive timeline")]
pub struct Cli {
    /// Path to the git repository
    #[arg(default_value = ".")]
    pub repo_path: PathBuf,

    /// Prefix for commit links (defaults to the GitHub origin remote, if any)
    #[arg(long)]
    pub url_base: Option<String>,

    /// Let the all-zero root commit widen the time axis
    #[arg(long)]
    pub include_root: bool,

    /// Fit the time axis to the filtered commits instead of the whole history
    #[arg(long)]
    pub rescale_x: bool,

    /// Attribute uncommitted working-tree lines to the all-zero root commit
    #[arg(long)]
    pub uncommitted: bool,

    /// Always re-run blame instead of reading the index cache
    #[arg(long)]
    pub no_cache: bool,

    /// Print commits and summary statistics as JSON instead of starting the UI
    #[arg(long)]
    pub json: bool,

    /// Enable profiling mode (prints phase timings)
    #[arg(long)]
    pub profile: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

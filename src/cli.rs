use crate::model::Bucket;
use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use console::Term;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitstat")]
#[command(about = "Per-author contribution statistics and commit activity for git repositories")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(long, help = "Start from this commit or date (RFC3339, YYYY-MM-DD, or natural language)")]
    pub since: Option<String>,

    #[arg(long, help = "End at this commit or date (RFC3339, YYYY-MM-DD, or natural language)")]
    pub until: Option<String>,

    #[arg(long, short = 'j', help = "Number of diff worker threads (default: one per CPU)")]
    pub jobs: Option<usize>,

    #[arg(long, short = 'v', action = ArgAction::Count, help = "More log output (-v debug, -vv trace)")]
    pub verbose: u8,

    #[arg(long, short = 'q', help = "Only log errors and hide progress")]
    pub quiet: bool,
}

impl CommonArgs {
    /// Progress goes to stderr, and only when a person is likely watching it.
    pub fn show_progress(&self, machine_readable: bool) -> bool {
        !self.quiet && !machine_readable && Term::stderr().is_term()
    }
}

#[derive(Args, Clone)]
pub struct TimelineArgs {
    #[arg(long, help = "Output as JSON")]
    pub json: bool,

    #[arg(long, help = "Output as NDJSON")]
    pub ndjson: bool,

    #[arg(long, help = "Output parallel date/commit/addition/deletion arrays for charting")]
    pub chart: bool,

    #[arg(long, help = "Emit zero records for buckets without commits")]
    pub fill_gaps: bool,

    #[arg(long, value_enum, default_value_t = Bucket::Day, help = "Bucket width")]
    pub bucket: Bucket,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Commits, additions and deletions per author
    Authors {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Commit activity over time
    Timeline(TimelineArgs),
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        crate::logging::init(self.common.verbose, self.common.quiet);

        match self.command {
            Commands::Authors { json, ndjson } => crate::authors::exec(self.common, json, ndjson),
            Commands::Timeline(args) => crate::timeline::exec(self.common, args),
        }
    }
}

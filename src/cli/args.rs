use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "scoopdesk",
    about = "One front-end for Scoop, Winget and Chocolatey",
    long_about = "Search, install and provision Windows packages across Scoop, Winget and Chocolatey, \
                  with replayable provisioning plans and environment snapshots",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalFlags {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Config file to use instead of ~/.scoopdesk/config.json
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

/// Package selector shared by install, uninstall and check
#[derive(Args, Debug, Clone)]
pub struct PackageArgs {
    /// Package name
    pub name: String,

    /// Manager-specific identifier (winget ids)
    #[arg(long)]
    pub id: Option<String>,

    /// Manager to route to; defaults to the first active manager
    #[arg(short = 'm', long)]
    pub manager: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search packages in every active manager
    Search {
        query: String,

        /// Use these managers for this search only
        #[arg(short = 'm', long = "manager", value_name = "ID")]
        managers: Vec<String>,

        /// Category filters, overriding the stored selection
        #[arg(short = 'c', long = "category", value_name = "TAG")]
        categories: Vec<String>,
    },

    /// List installed packages
    List {
        #[arg(short = 'm', long = "manager", value_name = "ID")]
        managers: Vec<String>,
    },

    /// Install a package (queued)
    Install(PackageArgs),

    /// Uninstall a package (queued)
    Uninstall(PackageArgs),

    /// Check whether a package has an update available
    Check(PackageArgs),

    /// Manage Scoop buckets
    Bucket {
        #[command(subcommand)]
        command: BucketCommand,
    },

    /// Show or set the active package managers
    Managers {
        /// New active set; omit to show the current one
        ids: Vec<String>,
    },

    /// Show or edit the search category filters
    Categories {
        #[command(subcommand)]
        command: Option<CategoryCommand>,
    },

    /// Provisioning plans
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },

    /// Export or inspect environment snapshots
    Snapshot {
        #[command(subcommand)]
        command: SnapshotCommand,
    },

    /// Restore an environment from a snapshot file
    Restore {
        file: PathBuf,
    },

    /// Move the Scoop storage root and reinstall everything there
    Migrate {
        target: PathBuf,
    },

    /// Install Scoop itself
    Provision,

    /// Show managers, base manager presence and available actions
    Status,

    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum BucketCommand {
    /// Add a bucket, optionally from a git URL
    Add { name: String, url: Option<String> },

    /// Remove a bucket
    #[command(alias = "remove")]
    Rm { name: String },

    /// List buckets
    List,

    /// Add the default bucket set
    Defaults,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// Add a category filter
    Add { category: String },

    /// Remove a category filter
    #[command(alias = "remove")]
    Rm { category: String },

    /// Replace all category filters
    Set { categories: Vec<String> },

    /// Remove all category filters
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    /// Print a starter plan
    Template,

    /// Validate a plan file and store it
    Load { file: PathBuf },

    /// Show the stored plan
    Show,

    /// Run every step of the stored plan
    Run,

    /// Run one step (1-based)
    Step { number: usize },
}

#[derive(Subcommand, Debug)]
pub enum SnapshotCommand {
    /// Write installed apps and buckets to a file
    Export {
        #[arg(default_value = "scoopdesk-backup.json")]
        file: PathBuf,
    },

    /// Validate a snapshot and preview the restore it would run
    Import { file: PathBuf },

    /// Print the contents of a snapshot file
    Show { file: PathBuf },
}

#[cfg(test)]
mod tests;

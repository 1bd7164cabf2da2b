use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nexus", bin_name = "nexus", version)]
#[command(about = "Browse, share and discuss media from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (default: $NEXUS_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with a display name
    Login {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List the feed
    #[command(alias = "ls")]
    List {
        /// Only items whose title contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only your own uploads
        #[arg(short, long)]
        channel: bool,
    },

    /// Open an item: counts a view, shows details, comments and an insight
    #[command(alias = "v")]
    View {
        id: String,

        /// Skip the generated insight
        #[arg(long)]
        no_insight: bool,
    },

    /// Comment on an item
    #[command(alias = "c")]
    Comment {
        id: String,

        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Upload a local file
    #[command(alias = "up")]
    Upload {
        path: PathBuf,

        /// Title (defaults to the file name)
        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Thumbnail image URL
        #[arg(long)]
        thumbnail: Option<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., insight-model)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

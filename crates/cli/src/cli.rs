//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line client for the EWiki backend
#[derive(Debug, Parser)]
#[command(name = "ewiki", version, about)]
pub struct Cli {
    /// Config file (JSON or TOML); standard locations are probed otherwise
    #[arg(long, global = true, env = "EWIKI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Call the backend at this URL directly instead of `{origin}/api`
    #[arg(long, global = true, env = "EWIKI_BASE_URL")]
    pub base_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List imported projects
    Projects,

    /// Import a project from a path on the backend host
    Import {
        path: String,
        /// Documentation language (defaults to the configured language)
        #[arg(long)]
        language: Option<String>,
    },

    /// Upload a project archive
    Upload {
        file: PathBuf,
        #[arg(long)]
        language: Option<String>,
    },

    /// Print a project's readme
    Readme { project: String },

    /// List a project's module documents
    Modules { project: String },

    /// Print one module document
    Module { project: String, name: String },

    /// Ask a single question about a project
    Chat {
        project: String,
        question: String,
        /// JSON file holding the prior conversation as an array of turns
        #[arg(long)]
        history: Option<PathBuf>,
        /// Number of retrieved passages the backend should use
        #[arg(long)]
        top_k: Option<u32>,
        /// Print the full reply (answer, sources, context count) as JSON
        #[arg(long)]
        detailed: bool,
    },

    /// Interactive chat; history is kept across questions
    Repl {
        project: String,
        #[arg(long)]
        top_k: Option<u32>,
    },

    /// Readme and module list of a project, fetched together
    Overview { project: String },

    /// Delete a project and its generated documents
    Delete { project: String },

    /// Manage a project's knowledge-base files
    #[command(subcommand)]
    Knowledge(KnowledgeCommand),

    /// Run the development server (API proxy + SPA routes)
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Backend the API prefix is forwarded to
        #[arg(long)]
        target: Option<String>,
        /// Built frontend directory
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum KnowledgeCommand {
    /// List uploaded knowledge files
    List { project: String },

    /// Upload a knowledge file
    Upload {
        project: String,
        file: PathBuf,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a knowledge file
    Delete { project: String, filename: String },
}

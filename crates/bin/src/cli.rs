//! CLI argument definitions for the Notelock binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Note store type
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// JSON file rewritten on every change (default)
    Json,
    /// In-memory with a JSON snapshot on shutdown (for development)
    Inmemory,
}

impl Backend {
    pub fn name(self) -> &'static str {
        match self {
            Backend::Json => "json",
            Backend::Inmemory => "inmemory",
        }
    }
}

/// Backing store for password-locked problem notes
#[derive(Parser, Debug)]
#[command(name = "notelock")]
#[command(about = "Notelock: password-locked sticky notes for coding problems")]
#[command(version)]
pub struct Cli {
    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the note message API over HTTP
    Serve(ServeArgs),
    /// Check health of a running Notelock server
    Health(HealthArgs),
    /// Inspect or change notes in a local store
    #[command(subcommand)]
    Notes(NotesCommand),
}

/// Where notes are stored
#[derive(clap::Args, Debug, Clone)]
pub struct StoreConfig {
    /// Store implementation to use
    #[arg(short, long, default_value = "json", env = "NOTELOCK_BACKEND")]
    pub backend: Backend,

    /// Data directory holding notelock.json
    #[arg(short = 'D', long, env = "NOTELOCK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3000, env = "NOTELOCK_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "127.0.0.1", env = "NOTELOCK_HOST")]
    pub host: String,

    #[command(flatten)]
    pub store: StoreConfig,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Port of the server to check
    #[arg(short, long, default_value_t = 3000, env = "NOTELOCK_PORT")]
    pub port: u16,

    /// Host of the server to check
    #[arg(long, default_value = "127.0.0.1", env = "NOTELOCK_HOST")]
    pub host: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum NotesCommand {
    /// List notes, optionally for one problem page
    List(NotesListArgs),
    /// Lock a note under a password
    Lock(NotePasswordArgs),
    /// Unlock a note and print its content
    Unlock(NotePasswordArgs),
    /// Delete a note
    Delete(NoteIdArgs),
}

#[derive(clap::Args, Debug)]
pub struct NotesListArgs {
    /// Only notes for this problem URL
    #[arg(long)]
    pub problem_url: Option<String>,

    #[command(flatten)]
    pub store: StoreConfig,
}

#[derive(clap::Args, Debug)]
pub struct NoteIdArgs {
    /// Note id, e.g. note_3
    pub id: String,

    #[command(flatten)]
    pub store: StoreConfig,
}

#[derive(clap::Args, Debug)]
pub struct NotePasswordArgs {
    /// Note id, e.g. note_3
    pub id: String,

    /// Note password
    #[arg(long, env = "NOTELOCK_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[command(flatten)]
    pub store: StoreConfig,
}

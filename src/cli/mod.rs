//! Command-line front end.

mod commands;
pub mod draft;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

pub use commands::run;

/// Author and browse virtual museum exhibitions.
#[derive(Parser, Debug)]
#[command(name = "exhibition-constructor", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the config file (default: platform config dir)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and remember the access token
    Login {
        #[arg(short, long)]
        username: String,
        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the access token and selected organization
    Logout,

    /// Create an account
    Signup {
        #[arg(short, long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
    },

    /// Show or edit your profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Organizations you belong to
    #[command(subcommand)]
    Orgs(OrgsCommand),

    /// Browse, preview and publish exhibitions
    #[command(subcommand)]
    Exhibitions(ExhibitionsCommand),

    /// Manage standalone exhibits
    #[command(subcommand)]
    Exhibits(ExhibitsCommand),
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    Show,
    Update {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        about: Option<String>,
        /// Image file to upload as avatar
        #[arg(long, value_name = "FILE")]
        avatar: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum OrgsCommand {
    List,
    /// Publish new exhibitions under this organization
    Select { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ExhibitionsCommand {
    List {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    /// Fetch an exhibition and render it read-only
    Show { id: Uuid },
    /// Render a draft file as the editor would show it
    Preview {
        #[arg(value_name = "DRAFT")]
        draft: PathBuf,
    },
    /// Save a draft file as a new exhibition
    Publish {
        #[arg(value_name = "DRAFT")]
        draft: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum ExhibitsCommand {
    List {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    Show {
        id: Uuid,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,
    },
    Update {
        id: Uuid,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,
    },
    Delete {
        id: Uuid,
    },
}

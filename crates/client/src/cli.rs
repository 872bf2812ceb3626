//! Command-line interface definition using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use stockroom_core::ClientResult;

use crate::ClientConfig;

/// Stockroom - inventory client
#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API base URL (overrides STOCKROOM_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory holding the persisted session (overrides STOCKROOM_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn config(&self) -> ClientResult<ClientConfig> {
        let mut config = ClientConfig::from_env()?;
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url.clone());
        }
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir.clone());
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and persist the session
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "STOCKROOM_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Register a new account (does not log in)
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "STOCKROOM_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Clear the persisted session
    Logout,

    /// Show the current user
    Whoami,

    /// Exit successfully only when the current user may open admin views
    AdminCheck,

    /// Inventory item operations against the backend
    Items {
        #[command(subcommand)]
        command: ItemCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// List all items
    List,

    /// Create an item from a JSON object
    Create {
        /// Item JSON, e.g. '{"id": 1, "name": "Bolt"}'
        json: String,
    },

    /// Update an item from a JSON object (matched by id)
    Update {
        json: String,
    },

    /// Delete an item by id
    Delete {
        id: String,
    },
}

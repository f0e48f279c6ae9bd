//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! pelicanapi binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Pelican panel API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "pelicanapi", about = "Pelican panel API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Panel URL.
    #[arg(long, global = true, env = "PELICAN_SERVER")]
    pub server: Option<String>,

    /// Application API token.
    #[arg(long, global = true, env = "PELICAN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The numeric ID.
        id: u64,
    },

    /// List entities with pagination.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Page number (1-indexed).
        #[arg(long, conflicts_with = "all")]
        page: Option<u32>,

        /// Number of items per page.
        #[arg(long, conflicts_with = "all")]
        per_page: Option<u32>,

        /// Follow pagination and list every entity.
        #[arg(long)]
        all: bool,
    },

    /// Print the declarative state document for an entity collection.
    State {
        /// The type of entity to project.
        entity: Entity,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A panel user.
    #[value(alias = "users")]
    User,
}

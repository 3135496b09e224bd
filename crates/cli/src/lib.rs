//! The `chart-query` command line: check chart configurations, show the SQL they build,
//! and run them against a database.

pub mod commands;
pub mod state;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use chart_query_configuration::connection_settings::DEFAULT_CONNECTION_URI_VARIABLE;

#[derive(Debug, Parser)]
#[command(name = "chart-query")]
#[command(about = "Turn chart configurations into parameterized SQL")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Where to find the database, for the commands that need one.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConnectionArgs {
    /// A JSON file of connection settings
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// The database connection URI; overrides the settings file
    #[arg(long, global = true, env = DEFAULT_CONNECTION_URI_VARIABLE, hide_env_values = true)]
    pub connection_uri: Option<String>,

    /// Print the database metrics to stderr once the command finishes
    #[arg(long, global = true)]
    pub metrics: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a chart configuration and print it normalized
    Validate {
        /// A file holding one chart configuration
        file: PathBuf,
    },

    /// Print the SQL and parameters built for each chart in a file
    Build {
        /// A file holding one chart configuration, or an array of them
        file: PathBuf,

        /// Format the SQL for reading
        #[arg(long)]
        pretty: bool,
    },

    /// Show the database's plan for each chart in a file
    Explain { file: PathBuf },

    /// Run each chart in a file and print its rows as JSON
    Run { file: PathBuf },

    /// Describe the tables and custom types of a schema
    Introspect {
        /// The schema to describe; defaults to the one in the settings
        #[arg(long)]
        schema: Option<String>,
    },

    /// Print the JSON schema of chart configurations
    Schema {
        /// Write the schema to this file instead
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for gw-rdb using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// gw-rdb - Groundwater RDB export
#[derive(Parser, Debug)]
#[command(name = "gw-rdb")]
#[command(version, about, long_about = None)]
#[command(author = "gw-rdb Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "gw-rdb.toml", env = "GWRDB_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GWRDB_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export one region group, or every group with ALL
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// List configured region groups
    Groups(commands::groups::GroupsArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

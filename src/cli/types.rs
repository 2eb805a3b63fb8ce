//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cachemux")]
#[command(about = "Cachemux - per-tenant pluggable cache engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Application config file (defaults to .cachemux/config.yaml)
    #[arg(short, long, global = true, env = "CACHEMUX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Tenant documents file, overriding `source.tenants_file`
    #[arg(long, global = true)]
    pub tenants_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered cache drivers
    Drivers,

    /// Resolve a tenant's cache configuration and build its provider
    Check(TenantArgs),

    /// Read cache commands from stdin and run them against a tenant's provider
    Run(TenantArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TenantArgs {
    /// Tenant id (defaults to `default_tenant` from config)
    #[arg(short, long)]
    pub tenant: Option<String>,
}

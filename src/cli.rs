use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ods-catalog")]
#[command(about = "Browse and download datasets from an Opendatasoft portal", long_about = None)]
pub struct Cli {
    /// Catalog base URL, overrides the configured `catalog.url`
    #[arg(long, global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the catalog is reachable
    Prepare,
    /// List one page of datasets
    List(ListArgs),
    /// Download a dataset export and its attachments
    Get(GetArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Full-text search
    #[arg(long)]
    pub q: Option<String>,

    /// Results per page
    #[arg(long)]
    pub size: Option<u32>,

    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<u32>,
}

#[derive(clap::Args, Debug)]
pub struct GetArgs {
    /// Dataset identifier on the portal
    pub resource_id: String,

    /// Directory receiving the downloaded files
    #[arg(long)]
    pub tmp_dir: PathBuf,

    /// JSON file with filters, attachments and compatODS
    #[arg(long)]
    pub import_config: Option<PathBuf>,
}

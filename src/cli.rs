use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "reqrecon",
    version,
    about = "Checklist identifier reconciliation tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Reconcile(ReconcileArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ReconcileArgs {
    #[arg(long, default_value = ".cache/reqrecon")]
    pub output_root: PathBuf,

    #[arg(long)]
    pub authoritative_path: PathBuf,

    #[arg(long)]
    pub scrape_path: PathBuf,

    #[arg(long)]
    pub canonical_path: Option<PathBuf>,

    #[arg(long)]
    pub discrepancy_path: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".cache/reqrecon")]
    pub output_root: PathBuf,
}

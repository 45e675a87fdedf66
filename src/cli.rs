use clap::Parser;
use std::path::PathBuf;

/// API Explorer - browse discovery documents, build requests, read responses
#[derive(Parser, Debug, Clone)]
#[command(name = "explorer", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "EXPLORER_CONFIG", default_value = "explorer.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "EXPLORER_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "EXPLORER_PORT")]
    pub port: Option<u16>,

    /// Directory of discovery documents (JSON or YAML)
    #[arg(long, env = "EXPLORER_DISCOVERY_DIR")]
    pub discovery_dir: Option<PathBuf>,

    /// Load and validate the configuration, then exit
    #[arg(long)]
    pub check: bool,
}

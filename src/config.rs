use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use tokio::fs;

/// Live-reloading static file server for local development.
#[derive(Parser)]
#[command(name = "lantern", version)]
pub struct Args {
    /// Directory to serve
    pub root: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// Do not open the browser on startup
    #[arg(long)]
    pub no_open: bool,

    /// Best-effort kill of whatever currently occupies the port
    #[arg(long)]
    pub takeover: bool,

    /// Path to a configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    root: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    open: Option<bool>,
}

pub struct Config {
    pub root: PathBuf,
    pub host: String,
    pub port: u16,
    pub open: bool,
    pub takeover: bool,
}

impl Config {
    /// Resolves the effective configuration: an optional `lantern.toml` (or
    /// `--config` path) provides defaults, command line flags win.
    pub async fn load(args: Args) -> Result<Self> {
        let base = env::current_dir()?;
        let path = match &args.config {
            Some(p) => Some(p.clone()),
            None => {
                let path = base.join("lantern.toml");
                fs::try_exists(&path).await.unwrap_or(false).then_some(path)
            }
        };

        let file = match path {
            Some(path) => Self::load_from_file(&path).await?,
            None => FileConfig::default(),
        };

        let root = args
            .root
            .or(file.root)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Config {
            root: base.join(root),
            host: args
                .host
                .or(file.host)
                .unwrap_or_else(|| "127.0.0.1".to_string()),
            port: args.port.or(file.port).unwrap_or(8000),
            open: !args.no_open && file.open.unwrap_or(true),
            takeover: args.takeover,
        })
    }

    async fn load_from_file(path: &Path) -> Result<FileConfig> {
        let contents = fs::read_to_string(path).await?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

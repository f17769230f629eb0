//! Handles settings for the application.
//!
//! Settings are read from `settings.toml` (path overridable with `--config`)
//! and from `TALLY__`-prefixed environment variables, e.g.
//! `TALLY__AUTH__SECRET_KEY`.

use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use server::AuthConfig;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Server,
    pub auth: AuthConfig,
}

#[derive(Debug, Parser)]
#[command(name = "tally", version)]
struct Args {
    /// Settings file path, with or without extension.
    #[arg(long, env = "TALLY_CONFIG")]
    config: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;

const DEFAULT_DATABASE_URL: &str = "sqlite:./data/teachers.db";
const DEFAULT_EXPORT_BASE_URL: &str = "https://docs.google.com/spreadsheets";

fn database_url_from_env() -> String {
    let database_url = env::var("DATABASE_URL")
        .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    if database_url.trim().is_empty() {
        DEFAULT_DATABASE_URL.to_string()
    } else {
        database_url
    }
}

fn path_from_env(name: &str, default: &str) -> PathBuf {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value.trim()),
        _ => PathBuf::from(default),
    }
}

/// Settings for the serving bot.
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub http_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;
        
        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }
        
        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;
        
        Ok(Config {
            telegram_bot_token: token,
            database_url: database_url_from_env(),
            http_port,
        })
    }
}

/// Settings for the offline dataset build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub database_url: String,
    /// JSON map of group name to spreadsheet address
    pub addresses_file: PathBuf,
    /// Directory holding `schedule_<group>.csv` exports
    pub schedule_dir: PathBuf,
    /// Teacher display names, one per line
    pub teachers_file: PathBuf,
    /// Spreadsheet service root that export URLs are built on
    pub export_base_url: String,
}

impl BuildConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: database_url_from_env(),
            addresses_file: path_from_env("ADDRESSES_FILE", "addresses.json"),
            schedule_dir: path_from_env("SCHEDULE_DIR", "./data/schedules"),
            teachers_file: path_from_env("TEACHERS_FILE", "./data/teachers.txt"),
            export_base_url: match env::var("EXPORT_BASE_URL") {
                Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
                _ => DEFAULT_EXPORT_BASE_URL.to_string(),
            },
        }
    }
}

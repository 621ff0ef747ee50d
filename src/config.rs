use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
const DEFAULT_LEGACY_API_URL: &str = "http://legacy-api:4040/candidates";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database: DatabaseConfig,
    pub legacy_api_url: Option<String>,
    pub legacy_api_timeout: Duration,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn in_memory() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 1,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected `text` or `json`, got `{}`", other)),
        }
    }
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            database: DatabaseConfig {
                url: get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
                max_connections: get_env_parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
            },
            // An explicitly empty value turns forwarding off.
            legacy_api_url: Some(get_env_or("LEGACY_API_URL", DEFAULT_LEGACY_API_URL))
                .filter(|url| !url.trim().is_empty()),
            legacy_api_timeout: Duration::from_secs(get_env_parse_or(
                "LEGACY_API_TIMEOUT_SECS",
                5,
            )?),
            log_format: get_env_parse_or("LOG_FORMAT", LogFormat::Text)?,
        })
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_helper_falls_back_when_unset() {
        let value: u32 = get_env_parse_or("RECRUITMENT_INTAKE_TEST_UNSET", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn parse_helper_names_the_bad_variable() {
        env::set_var("RECRUITMENT_INTAKE_TEST_BAD_NUMBER", "five");
        let err = get_env_parse_or::<u64>("RECRUITMENT_INTAKE_TEST_BAD_NUMBER", 5).unwrap_err();
        assert!(err.to_string().contains("RECRUITMENT_INTAKE_TEST_BAD_NUMBER"));
    }

    #[test]
    fn log_format_accepts_known_values() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn memory_urls_are_detected() {
        assert!(DatabaseConfig::in_memory().is_in_memory());
        assert!(DatabaseConfig {
            url: "sqlite:file:intake?mode=memory&cache=shared".into(),
            max_connections: 4,
        }
        .is_in_memory());
        assert!(!DatabaseConfig {
            url: "sqlite://data/intake.db".into(),
            max_connections: 4,
        }
        .is_in_memory());
    }
}

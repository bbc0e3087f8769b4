use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bookstore")]
#[command(about = "Runs the bookstore api", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bookstore")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_database")]
    database: String,
    #[serde(default)]
    database_url: Option<String>,
    #[serde(default)]
    auth_token: Option<String>,
}

fn default_port() -> u16 {
    8000
}

fn default_database() -> String {
    "books.db".to_string()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl App {
    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub fn get_db(&self) -> &str {
        &self.database
    }

    /// Remote url and token, only when both are set.
    pub fn remote(&self) -> Option<(&str, &str)> {
        match (non_empty(&self.database_url), non_empty(&self.auth_token)) {
            (Some(url), Some(token)) => Some((url, token)),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub app: App,
}

impl Config {
    pub fn new(path: &str) -> Result<Self> {
        let yaml_str = fs::read_to_string(path)?;
        Config::parse(&yaml_str)
    }

    pub fn parse(yaml_str: &str) -> Result<Self> {
        let yaml_with_env = Config::substitute_env_vars(yaml_str);
        let config: Config = serde_yaml::from_str(&yaml_with_env)?;
        Ok(config)
    }

    /// Expands `${VAR}` and `${VAR:-fallback}`. An unterminated `${` is left as is.
    fn substitute_env_vars(yaml_str: &str) -> String {
        let mut out = String::with_capacity(yaml_str.len());
        let mut rest = yaml_str;

        while let Some(open) = rest.find("${") {
            out.push_str(&rest[..open]);
            let tail = &rest[open + 2..];
            let Some(close) = tail.find('}') else {
                rest = &rest[open..];
                break;
            };
            out.push_str(&lookup_env(&tail[..close]));
            rest = &tail[close + 1..];
        }

        out.push_str(rest);
        out
    }
}

fn lookup_env(expr: &str) -> String {
    match expr.split_once(":-") {
        Some((name, fallback)) => env::var(name).unwrap_or_else(|_| fallback.to_string()),
        None => env::var(expr).unwrap_or_else(|_| {
            tracing::warn!(var = expr, "environment variable not set, using empty value");
            String::new()
        }),
    }
}

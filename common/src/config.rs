use dotenv::dotenv;
use std::env;
use thiserror::Error;

use crate::db::StorageBackend;

const DEFAULT_LOCAL_DB_PATH: &str = "./customers.db";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub server_host: String,
    pub server_port: u16,

    // Database configuration
    pub local_db: bool,
    pub local_db_path: String,
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let server_port = match lookup("SERVER_PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "SERVER_PORT",
                value,
            })?,
            None => 8080,
        };

        let local_db = lookup("LOCAL_DB").ok_or(ConfigError::Missing("LOCAL_DB"))?;
        let local_db = parse_bool(&local_db).ok_or(ConfigError::Invalid {
            var: "LOCAL_DB",
            value: local_db,
        })?;

        let local_db_path =
            lookup("LOCAL_DB_PATH").unwrap_or_else(|| DEFAULT_LOCAL_DB_PATH.to_string());

        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        if !local_db && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        Ok(Config {
            server_host,
            server_port,
            local_db,
            local_db_path,
            database_url,
        })
    }

    pub fn storage_backend(&self) -> StorageBackend {
        match (&self.database_url, self.local_db) {
            (Some(url), false) => StorageBackend::Server { url: url.clone() },
            _ => StorageBackend::Local {
                path: self.local_db_path.clone(),
            },
        }
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Accepts the usual spellings: 1/0, t/f, true/false in any of the common cases.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

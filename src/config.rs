use anyhow::{Context, Result};

/// Credential is accepted under either name, first non-empty wins.
pub const API_TOKEN_VARS: &[&str] = &["OPENELECTRICITY_API_TOKEN", "OPEN_ELECTRICITY_API_KEY"];

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub api_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            api_token: resolve_api_token(),
        })
    }
}

fn resolve_api_token() -> Option<String> {
    API_TOKEN_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
}

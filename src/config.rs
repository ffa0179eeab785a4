use anyhow::{bail, Result};
use std::env;

/// Production Trello endpoint; override with TRELLO_API_BASE for testing.
pub const DEFAULT_API_BASE: &str = "https://api.trello.com";

/// Credentials and endpoint for the Trello API
#[derive(Debug, Clone)]
pub struct Config {
    /// API key issued for the Trello account
    pub key: String,
    /// Server token authorizing board access
    pub token: String,
    /// Base URL of the API
    pub api_base: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Reads credentials once, before any network activity, so a missing
    /// variable fails without issuing a single request.
    pub fn from_env() -> Result<Self> {
        let key = env::var("TRELLO_API_KEY").ok().filter(|v| !v.is_empty());
        let token = env::var("TRELLO_TOKEN").ok().filter(|v| !v.is_empty());

        let (Some(key), Some(token)) = (key, token) else {
            bail!(
                "Trello API key and token are required. \
                 Set them as environment variables TRELLO_API_KEY and TRELLO_TOKEN."
            );
        };

        let api_base =
            env::var("TRELLO_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        Ok(Self {
            key,
            token,
            api_base,
        })
    }
}

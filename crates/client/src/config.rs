//! Client configuration from environment variables

use std::env;
use std::time::Duration;

use xiangqi_core::Side;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the game server, without a trailing slash
    pub api_url: String,

    /// Per-request timeout for the HTTP client
    pub request_timeout: Duration,

    /// The side this client plays
    pub player_side: Side,

    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_secs(30),
            player_side: Side::Red,
            user_agent: "XiangqiClient/1.0".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_url);

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(v) => {
                let secs: u64 = v.trim().parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::Invalid {
                        name: "REQUEST_TIMEOUT_SECS",
                        value: v.clone(),
                        reason: e.to_string(),
                    }
                })?;
                Duration::from_secs(secs)
            }
            None => defaults.request_timeout,
        };

        let player_side = match lookup("PLAYER_SIDE") {
            Some(v) => v.parse::<Side>().map_err(|reason| ConfigError::Invalid {
                name: "PLAYER_SIDE",
                value: v.clone(),
                reason,
            })?,
            None => defaults.player_side,
        };

        let user_agent = lookup("USER_AGENT").unwrap_or(defaults.user_agent);

        Ok(Self {
            api_url,
            request_timeout,
            player_side,
            user_agent,
        })
    }
}

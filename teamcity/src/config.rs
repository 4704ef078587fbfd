use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(250);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Upper bound of the doubling delay between attempts.
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct ClientConfig {
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    /// Total number of attempts per request, at least one is always made.
    pub retries: u32,
    pub retry_delay: Duration,
    pub timeout: Duration,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Please provide the {0} environment variable")]
    Missing(&'static str),
    #[error("{name} needs to be {expected}")]
    Malformed {
        name: &'static str,
        expected: &'static str,
    },
}

impl ClientConfig {
    pub fn new(url: Url, username: impl Into<String>, password: SecretString) -> Self {
        Self {
            url,
            username: username.into(),
            password,
            retries: DEFAULT_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_environment() -> Result<ClientConfig, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<ClientConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("TEAMCITY_URL")
            .ok_or(ConfigError::Missing("TEAMCITY_URL"))?
            .parse()
            .map_err(|_| ConfigError::Malformed {
                name: "TEAMCITY_URL",
                expected: "an absolute URL",
            })?;
        let username = lookup("TEAMCITY_USERNAME").ok_or(ConfigError::Missing("TEAMCITY_USERNAME"))?;
        let password = SecretString::new(
            lookup("TEAMCITY_PASSWORD").ok_or(ConfigError::Missing("TEAMCITY_PASSWORD"))?,
        );

        let mut config = ClientConfig::new(url, username, password);

        if let Some(retries) = lookup("TEAMCITY_RETRIES") {
            config.retries = retries
                .parse::<u32>()
                .ok()
                .filter(|retries| *retries > 0)
                .ok_or(ConfigError::Malformed {
                    name: "TEAMCITY_RETRIES",
                    expected: "a positive integer",
                })?;
        }

        Ok(config)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url.as_str())
            .field("username", &self.username)
            .field("retries", &self.retries)
            .field("retry_delay", &self.retry_delay)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

use crate::session::{SessionOptions, DEFAULT_USER_NAME};
use crate::mood::DEFAULT_MOOD_LEVEL;
use std::{env, time::Duration};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_USER_ID: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub backend_url: String,
    pub user_id: i64,
    pub user_name: String,
    pub chat_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            user_id: DEFAULT_USER_ID,
            user_name: DEFAULT_USER_NAME.to_string(),
            chat_timeout: None,
        }
    }
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// - `PORT`: listen port, default 8080
    /// - `MINDWELL_BACKEND_URL`: companion backend, default `http://localhost:8000`
    /// - `MINDWELL_USER_ID`: id sent with wellness calls, default 1
    /// - `MINDWELL_USER_NAME`: initial display name, default `Alex`
    /// - `MINDWELL_CHAT_TIMEOUT_SECS`: unset or 0 waits forever
    ///
    /// Values that fail to parse fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = parse_or(lookup("PORT"), defaults.port);
        let backend_url = lookup("MINDWELL_BACKEND_URL")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.backend_url);
        let user_id = parse_or(lookup("MINDWELL_USER_ID"), defaults.user_id);
        let user_name = lookup("MINDWELL_USER_NAME")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.user_name);
        let chat_timeout = lookup("MINDWELL_CHAT_TIMEOUT_SECS")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            port,
            backend_url,
            user_id,
            user_name,
            chat_timeout,
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            user_name: self.user_name.clone(),
            mood_level: DEFAULT_MOOD_LEVEL,
            timeout: self.chat_timeout,
        }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, Config::default());
        assert_eq!(config.chat_timeout, None);
    }

    #[test]
    fn values_are_read_and_trimmed() {
        let config = config_from(&[
            ("PORT", "9090"),
            ("MINDWELL_BACKEND_URL", "http://backend:8000/"),
            ("MINDWELL_USER_ID", "42"),
            ("MINDWELL_USER_NAME", "  Sam "),
            ("MINDWELL_CHAT_TIMEOUT_SECS", "30"),
        ]);
        assert_eq!(config.port, 9090);
        assert_eq!(config.backend_url, "http://backend:8000");
        assert_eq!(config.user_id, 42);
        assert_eq!(config.user_name, "Sam");
        assert_eq!(config.chat_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn bad_values_fall_back_and_zero_timeout_means_none() {
        let config = config_from(&[
            ("PORT", "not-a-port"),
            ("MINDWELL_USER_ID", "x"),
            ("MINDWELL_CHAT_TIMEOUT_SECS", "0"),
        ]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.user_id, DEFAULT_USER_ID);
        assert_eq!(config.chat_timeout, None);
        assert_eq!(config.session_options().timeout, None);
    }
}

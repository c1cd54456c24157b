use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local single-user install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite connection string (default: `sqlite://impulso.db`).
    pub database_url: String,
    /// Upper bound on any single store operation, in seconds (default: `5`).
    pub store_timeout_secs: u64,
    /// Insert sample data when the store is empty (default: `true`).
    pub seed_sample_data: bool,
    /// Broadcast buffer size of the event bus (default: `256`).
    pub event_bus_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://impulso.db".into(),
            store_timeout_secs: 5,
            seed_sample_data: true,
            event_bus_capacity: impulso_events::bus::DEFAULT_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default               |
    /// |----------------------|-----------------------|
    /// | `DATABASE_URL`       | `sqlite://impulso.db` |
    /// | `STORE_TIMEOUT_SECS` | `5`                   |
    /// | `SEED_SAMPLE_DATA`   | `true`                |
    /// | `EVENT_BUS_CAPACITY` | `256`                 |
    ///
    /// Malformed values are logged and replaced by the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let database_url = lookup("DATABASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.database_url);

        Self {
            database_url,
            store_timeout_secs: parse_or(
                &lookup,
                "STORE_TIMEOUT_SECS",
                defaults.store_timeout_secs,
            ),
            seed_sample_data: parse_or(&lookup, "SEED_SAMPLE_DATA", defaults.seed_sample_data),
            event_bus_capacity: parse_or(
                &lookup,
                "EVENT_BUS_CAPACITY",
                defaults.event_bus_capacity,
            ),
        }
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = %raw, ?default, "Malformed configuration value, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config(&[]), AppConfig::default());
        assert_eq!(AppConfig::default().store_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn values_are_read() {
        let cfg = config(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("STORE_TIMEOUT_SECS", " 10 "),
            ("SEED_SAMPLE_DATA", "false"),
            ("EVENT_BUS_CAPACITY", "16"),
        ]);
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert_eq!(cfg.store_timeout_secs, 10);
        assert!(!cfg.seed_sample_data);
        assert_eq!(cfg.event_bus_capacity, 16);
    }

    #[test]
    fn malformed_values_fall_back() {
        let cfg = config(&[
            ("DATABASE_URL", "  "),
            ("STORE_TIMEOUT_SECS", "soon"),
            ("SEED_SAMPLE_DATA", "yes"),
            ("EVENT_BUS_CAPACITY", "-1"),
        ]);
        assert_eq!(cfg, AppConfig::default());
    }
}

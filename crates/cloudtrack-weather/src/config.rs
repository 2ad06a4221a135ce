use eyre::WrapErr;
use eyre::eyre;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Semaphore;

pub const DEFAULT_BASE_URL: &str = "https://wttr.in";
pub const DEFAULT_HISTORY_FILE: &str = "weather_history.json";

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherConfig {
    pub base_url: String,
    pub history_file: PathBuf,
    pub aggregator: AggregatorConfig,
}

/// Bounds applied to one aggregation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatorConfig {
    /// Units allowed to have a request in flight at once.
    pub max_concurrency: usize,
    /// Deadline for a single unit's fetch and decode.
    pub request_timeout: Option<Duration>,
    /// Deadline for the whole join; in-flight units are aborted when it passes.
    pub deadline: Option<Duration>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            request_timeout: Some(Duration::from_secs(15)),
            deadline: Some(Duration::from_secs(60)),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            aggregator: AggregatorConfig::default(),
        }
    }
}

impl WeatherConfig {
    /// Read `WEATHER_*` variables, falling back to defaults for unset ones.
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let mut config = Self::default();
        if let Some(x) = lookup("WEATHER_BASE_URL") {
            config.base_url = x;
        }
        if let Some(x) = lookup("WEATHER_HISTORY_FILE") {
            config.history_file = PathBuf::from(x);
        }
        if let Some(x) = lookup("WEATHER_MAX_CONCURRENCY") {
            config.aggregator.max_concurrency = parse_concurrency(&x)
                .wrap_err("Invalid WEATHER_MAX_CONCURRENCY")?;
        }
        if let Some(x) = lookup("WEATHER_REQUEST_TIMEOUT_SECS") {
            config.aggregator.request_timeout =
                parse_seconds(&x).wrap_err("Invalid WEATHER_REQUEST_TIMEOUT_SECS")?;
        }
        if let Some(x) = lookup("WEATHER_DEADLINE_SECS") {
            config.aggregator.deadline =
                parse_seconds(&x).wrap_err("Invalid WEATHER_DEADLINE_SECS")?;
        }
        Ok(config)
    }
}

pub fn parse_concurrency(raw: &str) -> eyre::Result<usize> {
    let value = raw.trim().parse::<usize>()?;
    if value == 0 {
        return Err(eyre!("Concurrency must be at least 1"));
    }
    if value > Semaphore::MAX_PERMITS {
        return Err(eyre!(
            "Concurrency must be at most {}",
            Semaphore::MAX_PERMITS
        ));
    }
    Ok(value)
}

pub fn parse_seconds(raw: &str) -> eyre::Result<Option<Duration>> {
    Ok(seconds(raw.trim().parse::<u64>()?))
}

/// `0` disables the deadline.
pub fn seconds(value: u64) -> Option<Duration> {
    (value > 0).then(|| Duration::from_secs(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = WeatherConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, WeatherConfig::default());
        assert_eq!(config.aggregator.max_concurrency, 8);
    }

    #[test]
    fn reads_overrides() {
        let config = WeatherConfig::from_lookup(lookup(&[
            ("WEATHER_BASE_URL", "http://localhost:1234"),
            ("WEATHER_HISTORY_FILE", "/tmp/h.json"),
            ("WEATHER_MAX_CONCURRENCY", "2"),
            ("WEATHER_REQUEST_TIMEOUT_SECS", "3"),
            ("WEATHER_DEADLINE_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:1234");
        assert_eq!(config.history_file, PathBuf::from("/tmp/h.json"));
        assert_eq!(config.aggregator.max_concurrency, 2);
        assert_eq!(config.aggregator.request_timeout, Some(Duration::from_secs(3)));
        assert_eq!(config.aggregator.deadline, None);
    }

    #[test]
    fn rejects_zero_concurrency() {
        let result = WeatherConfig::from_lookup(lookup(&[("WEATHER_MAX_CONCURRENCY", "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_malformed_seconds() {
        let result = WeatherConfig::from_lookup(lookup(&[("WEATHER_DEADLINE_SECS", "soon")]));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_concurrency_above_permit_limit() {
        assert!(parse_concurrency(&usize::MAX.to_string()).is_err());
        assert!(parse_concurrency(&(Semaphore::MAX_PERMITS + 1).to_string()).is_err());
        assert_eq!(
            parse_concurrency(&Semaphore::MAX_PERMITS.to_string()).unwrap(),
            Semaphore::MAX_PERMITS
        );
    }

    #[test]
    fn accepts_huge_seconds() {
        let config = WeatherConfig::from_lookup(lookup(&[(
            "WEATHER_DEADLINE_SECS",
            &u64::MAX.to_string(),
        )]))
        .unwrap();
        assert_eq!(config.aggregator.deadline, Some(Duration::from_secs(u64::MAX)));
    }
}

use crate::report::WeatherReport;
use eyre::WrapErr;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::warn;

/// Entries kept on disk.
pub const HISTORY_CAP: usize = 20;

/// Entries printed by `--history`.
pub const SHOW_LIMIT: usize = 10;

/// Past reports in append order, oldest first.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryLog {
    #[serde(default)]
    pub searches: Vec<WeatherReport>,
}

impl HistoryLog {
    /// Append `items` and drop from the front until at most `cap` remain.
    pub fn extend_capped(&mut self, items: impl IntoIterator<Item = WeatherReport>, cap: usize) {
        self.searches.extend(items);
        let excess = self.searches.len().saturating_sub(cap);
        self.searches.drain(..excess);
    }

    pub fn len(&self) -> usize {
        self.searches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.searches.is_empty()
    }
}

/// JSON file holding a [`HistoryLog`], rewritten in full on every append.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    cap: usize,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cap: HISTORY_CAP,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored log, or `None` when it is missing or unusable.
    async fn read(&self) -> Option<HistoryLog> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(x) => x,
            Err(e) => {
                debug!("No history at {}: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(x) => Some(x),
            Err(e) => {
                warn!("Ignoring corrupt history at {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Stored log, falling back to empty.
    pub async fn load(&self) -> HistoryLog {
        self.read().await.unwrap_or_default()
    }

    /// Add `items` after the stored entries, trim to the cap, and overwrite the file.
    ///
    /// Returns the log that was written.
    pub async fn append(&self, items: &[WeatherReport]) -> eyre::Result<HistoryLog> {
        let mut log = self.load().await;
        log.extend_capped(items.iter().cloned(), self.cap);
        tokio::fs::write(&self.path, serde_json::to_string_pretty(&log)?)
            .await
            .wrap_err_with(|| format!("Failed to write history to {}", self.path.display()))?;
        debug!("Wrote {} history entries to {}", log.len(), self.path.display());
        Ok(log)
    }

    /// Up to `limit` entries from the start of the stored log.
    ///
    /// `None` means there is no history to show.
    pub async fn show(&self, limit: usize) -> Option<Vec<WeatherReport>> {
        let log = self.read().await?;
        if log.is_empty() {
            return None;
        }
        Some(log.searches.into_iter().take(limit).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn report(location: &str) -> WeatherReport {
        WeatherReport {
            location: location.to_string(),
            temperature: "1°C".to_string(),
            condition: "Snow".to_string(),
            humidity: "95%".to_string(),
            wind: "20 km/h NE".to_string(),
            forecast: vec!["00:00 - 0°C, Snow".to_string()],
            timestamp: "2026-01-01 00:00:00".to_string(),
        }
    }

    fn locations(log: &[WeatherReport]) -> Vec<String> {
        log.iter().map(|x| x.location.clone()).collect()
    }

    #[test]
    fn extend_capped_keeps_newest() {
        let mut log = HistoryLog::default();
        log.extend_capped((0..25).map(|i| report(&i.to_string())), HISTORY_CAP);
        assert_eq!(log.len(), HISTORY_CAP);
        assert_eq!(log.searches[0].location, "5");
        assert_eq!(log.searches[19].location, "24");
    }

    #[test]
    fn extend_capped_under_cap_keeps_all() {
        let mut log = HistoryLog::default();
        log.extend_capped(vec![report("a"), report("b")], HISTORY_CAP);
        assert_eq!(locations(&log.searches), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn repeated_appends_never_exceed_cap() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        for batch in 0..10 {
            let items: Vec<_> = (0..3).map(|i| report(&format!("{batch}-{i}"))).collect();
            let log = store.append(&items).await.unwrap();
            assert!(log.len() <= HISTORY_CAP);
        }
        let log = store.load().await;
        assert_eq!(log.len(), HISTORY_CAP);
        assert_eq!(log.searches[0].location, "3-1");
        assert_eq!(log.searches[19].location, "9-2");
    }

    #[tokio::test]
    async fn file_uses_searches_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let store = HistoryStore::new(&path);
        store.append(&[report("Oslo")]).await.unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["searches"][0]["location"], "Oslo");
        assert_eq!(raw["searches"][0]["humidity"], "95%");
    }

    #[tokio::test]
    async fn corrupt_file_is_treated_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{ this is not json").unwrap();
        let store = HistoryStore::new(&path);
        assert!(store.load().await.is_empty());
        assert_eq!(store.show(SHOW_LIMIT).await, None);

        let log = store.append(&[report("Cairo")]).await.unwrap();
        assert_eq!(locations(&log.searches), vec!["Cairo"]);
    }

    #[tokio::test]
    async fn show_on_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("absent.json"));
        assert_eq!(store.show(SHOW_LIMIT).await, None);
    }

    #[tokio::test]
    async fn show_returns_first_entries_in_stored_order() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        let items: Vec<_> = (0..15).map(|i| report(&i.to_string())).collect();
        store.append(&items).await.unwrap();
        let shown = store.show(SHOW_LIMIT).await.unwrap();
        assert_eq!(shown.len(), SHOW_LIMIT);
        assert_eq!(shown[0].location, "0");
        assert_eq!(shown[9].location, "9");
    }

    #[tokio::test]
    async fn write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("missing-dir").join("history.json"));
        assert!(store.append(&[report("Doha")]).await.is_err());
    }
}

// Season stats data source: HTTP fetch from the proxy route, fronted by the
// local payload cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::Database;
use crate::fantasy::stats::PlayerSeasonStat;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("API Error: {status}")]
    Status { status: u16 },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed stats payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Anything that can produce the raw season stats JSON.
#[async_trait]
pub trait StatSource: Send + Sync {
    async fn fetch_raw(&self) -> Result<Value, SourceError>;
}

// ---------------------------------------------------------------------------
// HttpStatSource
// ---------------------------------------------------------------------------

/// Fetches the season payload from the proxy's stats route.
pub struct HttpStatSource {
    http: reqwest::Client,
    url: String,
}

impl HttpStatSource {
    pub fn new(url: String, timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url })
    }

    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        Self::new(
            config.source.stats_url.clone(),
            Duration::from_secs(config.upstream.timeout_secs),
        )
    }
}

#[async_trait]
impl StatSource for HttpStatSource {
    async fn fetch_raw(&self) -> Result<Value, SourceError> {
        info!("Fetching fresh stats from {}", self.url);
        let response = self.http.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

// ---------------------------------------------------------------------------
// CachedStatSource
// ---------------------------------------------------------------------------

/// Serves the season from the cache when present; otherwise fetches from
/// `inner` and caches array payloads. Cache entries never expire.
pub struct CachedStatSource<S> {
    inner: S,
    db: Arc<Database>,
    key: String,
}

impl<S: StatSource> CachedStatSource<S> {
    pub fn new(inner: S, db: Arc<Database>, key: impl Into<String>) -> Self {
        Self {
            inner,
            db,
            key: key.into(),
        }
    }

    /// Load the season's player list.
    ///
    /// A cache hit bypasses the network entirely. On a miss, an array
    /// payload is cached and parsed; any other JSON shape yields an empty
    /// list. Cache read or write failures are logged and skipped.
    pub async fn load(&self) -> Result<Vec<PlayerSeasonStat>, SourceError> {
        match self.db.get_cached(&self.key) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<PlayerSeasonStat>>(&text) {
                Ok(players) => {
                    info!("Loaded {} players from cache ({})", players.len(), self.key);
                    return Ok(players);
                }
                Err(e) => warn!("Cached stats under {} are unreadable, refetching: {}", self.key, e),
            },
            Ok(None) => {}
            Err(e) => warn!("Stats cache read failed, fetching instead: {:#}", e),
        }

        let payload = self.inner.fetch_raw().await?;
        if !payload.is_array() {
            warn!("Stats payload is not a JSON array; ignoring it");
            return Ok(Vec::new());
        }

        let players: Vec<PlayerSeasonStat> = serde_json::from_value(payload.clone())?;

        match serde_json::to_string(&payload) {
            Ok(text) => {
                if let Err(e) = self.db.put_cached(&self.key, &text) {
                    warn!("Stats cache write failed, skipping cache: {:#}", e);
                }
            }
            Err(e) => warn!("Failed to serialize stats for cache: {}", e),
        }

        info!("Fetched {} players", players.len());
        Ok(players)
    }
}

/// Anything that can produce the season's parsed player list.
#[async_trait]
pub trait PlayerSource: Send + Sync {
    async fn load_players(&self) -> Result<Vec<PlayerSeasonStat>, SourceError>;
}

#[async_trait]
impl<S: StatSource> PlayerSource for CachedStatSource<S> {
    async fn load_players(&self) -> Result<Vec<PlayerSeasonStat>, SourceError> {
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed payload and counts calls.
    struct FixedSource {
        payload: Value,
        calls: AtomicUsize,
    }

    impl FixedSource {
        fn new(payload: Value) -> Self {
            Self {
                payload,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl StatSource for FixedSource {
        async fn fetch_raw(&self) -> Result<Value, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.payload.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl StatSource for FailingSource {
        async fn fetch_raw(&self) -> Result<Value, SourceError> {
            Err(SourceError::Status { status: 503 })
        }
    }

    fn db() -> Arc<Database> {
        Arc::new(Database::open(":memory:").unwrap())
    }

    fn sample_payload() -> Value {
        json!([
            {"PlayerID": 1, "Name": "Saquon Barkley", "Team": "PHI", "Position": "RB",
             "RushingYards": 2005.0, "RushingTouchdowns": 13},
            {"PlayerID": 2, "Name": "Ja'Marr Chase", "Team": "CIN", "Position": "WR",
             "Receptions": 127, "ReceivingYards": 1708.0, "ReceivingTouchdowns": 17}
        ])
    }

    #[tokio::test]
    async fn miss_fetches_and_caches() {
        let db = db();
        let source = CachedStatSource::new(FixedSource::new(sample_payload()), db.clone(), "k");

        let players = source.load().await.unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[1].display_name(), "Ja'Marr Chase");
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 1);
        assert!(db.get_cached("k").unwrap().is_some());
    }

    #[tokio::test]
    async fn hit_skips_network() {
        let db = db();
        db.put_cached("k", &sample_payload().to_string()).unwrap();
        let source = CachedStatSource::new(FixedSource::new(json!([])), db, "k");

        let players = source.load().await.unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn second_load_uses_cache() {
        let source = CachedStatSource::new(FixedSource::new(sample_payload()), db(), "k");
        source.load().await.unwrap();
        source.load().await.unwrap();
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn non_array_payload_yields_empty_and_is_not_cached() {
        let db = db();
        let source = CachedStatSource::new(
            FixedSource::new(json!({"error": "API error"})),
            db.clone(),
            "k",
        );

        let players = source.load().await.unwrap();
        assert!(players.is_empty());
        assert!(db.get_cached("k").unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_cache_entry_refetches() {
        let db = db();
        db.put_cached("k", "not json").unwrap();
        let source = CachedStatSource::new(FixedSource::new(sample_payload()), db.clone(), "k");

        let players = source.load().await.unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 1);
        assert_ne!(db.get_cached("k").unwrap().as_deref(), Some("not json"));
    }

    #[tokio::test]
    async fn fetch_error_propagates() {
        let source = CachedStatSource::new(FailingSource, db(), "k");
        let err = source.load().await.unwrap_err();
        assert_eq!(err.to_string(), "API Error: 503");
    }

    #[tokio::test]
    async fn malformed_record_is_payload_error() {
        let source = CachedStatSource::new(
            FixedSource::new(json!([{"Name": "No ID"}])),
            db(),
            "k",
        );
        assert!(matches!(
            source.load().await.unwrap_err(),
            SourceError::Payload(_)
        ));
    }
}

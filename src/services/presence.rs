use chrono::{DateTime, TimeZone, Utc};
use redis::aio::ConnectionManager;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with presence operations
#[derive(Debug, Error)]
pub enum PresenceError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),
}

/// Two-tier "who is online" store
///
/// Replaces module-level mutable presence state with an injected,
/// time-indexed store: a local in-process cache (fast path for the instance
/// that saw the heartbeat) over Redis (shared across instances, expiry via
/// key TTL). Entries hold the last-seen timestamp in unix milliseconds.
pub struct PresenceStore {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    local: moka::future::Cache<String, i64>,
    window_secs: u64,
}

impl PresenceStore {
    /// Create a new presence store
    pub async fn new(
        redis_url: &str,
        local_size: u64,
        window_secs: u64,
    ) -> Result<Self, PresenceError> {
        let client = redis::Client::open(redis_url)?;
        let redis = redis::aio::ConnectionManager::new(client).await?;

        let local = moka::future::CacheBuilder::new(local_size)
            .time_to_live(Duration::from_secs(window_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            local,
            window_secs,
        })
    }

    fn key(user_id: &str) -> String {
        format!("presence:{}", user_id)
    }

    fn is_fresh(&self, last_seen_ms: i64) -> bool {
        Self::is_fresh_at(last_seen_ms, Utc::now().timestamp_millis(), self.window_secs)
    }

    fn is_fresh_at(last_seen_ms: i64, now_ms: i64, window_secs: u64) -> bool {
        now_ms - last_seen_ms <= (window_secs as i64) * 1000
    }

    /// Mark a user online now
    pub async fn heartbeat(&self, user_id: &str) -> Result<(), PresenceError> {
        let now_ms = Utc::now().timestamp_millis();

        self.local.insert(user_id.to_string(), now_ms).await;

        let mut conn = self.redis.lock().await;
        redis::cmd("SETEX")
            .arg(Self::key(user_id))
            .arg(self.window_secs)
            .arg(now_ms)
            .query_async::<()>(&mut *conn)
            .await?;
        drop(conn);

        tracing::trace!("Heartbeat recorded for {}", user_id);
        Ok(())
    }

    /// Mark a user offline immediately
    pub async fn set_offline(&self, user_id: &str) -> Result<(), PresenceError> {
        self.local.invalidate(user_id).await;

        let mut conn = self.redis.lock().await;
        redis::cmd("DEL")
            .arg(Self::key(user_id))
            .query_async::<()>(&mut *conn)
            .await?;
        Ok(())
    }

    /// Last heartbeat timestamp, if one is still held
    pub async fn last_seen(&self, user_id: &str) -> Result<Option<DateTime<Utc>>, PresenceError> {
        if let Some(ms) = self.local.get(user_id).await {
            return Ok(Utc.timestamp_millis_opt(ms).single());
        }

        let mut conn = self.redis.lock().await;
        let ms: Option<i64> = redis::cmd("GET")
            .arg(Self::key(user_id))
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        if let Some(ms) = ms {
            // populate the local tier for subsequent lookups
            self.local.insert(user_id.to_string(), ms).await;
            return Ok(Utc.timestamp_millis_opt(ms).single());
        }

        Ok(None)
    }

    /// Whether the user has heartbeated within the liveness window
    ///
    /// The TTLs on both tiers expire stale entries; the timestamp check is a
    /// guard against clock skew between instances.
    pub async fn is_online(&self, user_id: &str) -> Result<bool, PresenceError> {
        if let Some(ms) = self.local.get(user_id).await {
            if self.is_fresh(ms) {
                return Ok(true);
            }
        }

        let mut conn = self.redis.lock().await;
        let ms: Option<i64> = redis::cmd("GET")
            .arg(Self::key(user_id))
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        match ms {
            Some(ms) if self.is_fresh(ms) => {
                self.local.insert(user_id.to_string(), ms).await;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

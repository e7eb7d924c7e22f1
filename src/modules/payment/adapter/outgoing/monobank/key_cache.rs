use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// The acquirer rotates its webhook key rarely; a day is plenty.
pub const KEY_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Last fetched webhook verification key and when it was fetched.
pub struct KeyCache {
    ttl: Duration,
    slot: RwLock<Option<(String, Instant)>>,
}

impl KeyCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    pub async fn get(&self) -> Option<String> {
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|(_, fetched)| fetched.elapsed() < self.ttl)
            .map(|(key, _)| key.clone())
    }

    pub async fn put(&self, key: String) {
        *self.slot.write().await = Some((key, Instant::now()));
    }
}

impl Default for KeyCache {
    fn default() -> Self {
        Self::new(KEY_TTL)
    }
}

// src/draft.rs
//! Form drafts with an expiry checked at read time

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app_log;
use crate::core::store::SharedStore;
use crate::error::ClientResult;

/// Stored shape: `{ "value": ..., "expiry": <epoch millis> }`
#[derive(Debug, Serialize, Deserialize)]
struct DraftRecord<T> {
    value: T,
    expiry: i64,
}

pub struct DraftStore {
    store: SharedStore,
}

impl DraftStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn save_draft<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> ClientResult<()> {
        self.save_draft_at(key, value, ttl, Utc::now()).await
    }

    pub async fn load_draft<T: DeserializeOwned>(&self, key: &str) -> ClientResult<Option<T>> {
        self.load_draft_at(key, Utc::now()).await
    }

    pub async fn save_draft_at<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> ClientResult<()> {
        let ttl_millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let record = DraftRecord {
            value,
            expiry: now.timestamp_millis().saturating_add(ttl_millis),
        };
        let serialized = serde_json::to_string(&record)
            .map_err(|err| anyhow::anyhow!("Failed to serialize draft {}: {}", key, err))?;
        self.store.set(key, &serialized).await?;
        Ok(())
    }

    /// Expired or unreadable drafts are deleted and reported as absent
    pub async fn load_draft_at<T: DeserializeOwned>(
        &self,
        key: &str,
        now: DateTime<Utc>,
    ) -> ClientResult<Option<T>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };

        let record = match serde_json::from_str::<DraftRecord<serde_json::Value>>(&raw) {
            Ok(record) => record,
            Err(err) => {
                app_log!(warn, "Discarding unreadable draft {}: {}", key, err);
                self.store.remove(key).await?;
                return Ok(None);
            }
        };

        if now.timestamp_millis() > record.expiry {
            app_log!(debug, "Draft {} expired", key);
            self.store.remove(key).await?;
            return Ok(None);
        }

        match serde_json::from_value::<T>(record.value) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                app_log!(warn, "Discarding draft {} with unexpected shape: {}", key, err);
                self.store.remove(key).await?;
                Ok(None)
            }
        }
    }

    pub async fn discard(&self, key: &str) -> ClientResult<()> {
        self.store.remove(key).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use chrono::TimeZone;

    const HOUR: Duration = Duration::from_secs(60 * 60);

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, minute, 0).unwrap()
    }

    #[tokio::test]
    async fn test_draft_round_trip_within_ttl() {
        let drafts = DraftStore::new(MemoryStore::shared());
        let value = vec!["B.Tech".to_string(), "M.Tech".to_string()];

        drafts.save_draft_at("signupForm", &value, HOUR, at(10, 0)).await.unwrap();
        let loaded: Option<Vec<String>> =
            drafts.load_draft_at("signupForm", at(10, 59)).await.unwrap();
        assert_eq!(loaded, Some(value));
    }

    #[tokio::test]
    async fn test_expired_draft_is_removed() {
        let store = MemoryStore::shared();
        let drafts = DraftStore::new(store.clone());

        drafts.save_draft_at("signupForm", &"hello", HOUR, at(10, 0)).await.unwrap();
        let loaded: Option<String> = drafts.load_draft_at("signupForm", at(11, 1)).await.unwrap();

        assert_eq!(loaded, None);
        assert_eq!(store.get("signupForm").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_draft_at_exact_expiry_is_still_valid() {
        let drafts = DraftStore::new(MemoryStore::shared());
        drafts.save_draft_at("k", &1u8, HOUR, at(10, 0)).await.unwrap();
        let loaded: Option<u8> = drafts.load_draft_at("k", at(11, 0)).await.unwrap();
        assert_eq!(loaded, Some(1));
    }

    #[tokio::test]
    async fn test_garbage_record_is_discarded() {
        let store = MemoryStore::shared();
        store.set("signupForm", "{not json").await.unwrap();

        let drafts = DraftStore::new(store.clone());
        let loaded: Option<String> = drafts.load_draft("signupForm").await.unwrap();
        assert_eq!(loaded, None);
        assert_eq!(store.get("signupForm").await.unwrap(), None);
    }
}

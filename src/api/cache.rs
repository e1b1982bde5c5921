use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Dataset, YearMonth, decimal_to_cents};
use crate::error::{ChartError, ChartResult};

use super::{EarningsConfig, KeyValueStore};

pub const DATASET_CACHE_SCHEMA_V1: u32 = 1;

/// Store key the cached dataset lives under.
pub const DEFAULT_DATASET_STORAGE_KEY: &str = "earnings_chart.dataset";

/// Deterministic fingerprint of everything that shapes a generated dataset.
///
/// Two configurations with equal keys may share a cached dataset; any
/// difference forces regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationKey {
    pub oldest_month: YearMonth,
    pub today: NaiveDate,
    pub daily_window_days: u32,
    pub min_balance_cents: i64,
    pub min_pending_cents: i64,
    pub lifetime_gross_cents: i64,
    pub net_margin_ppm: i64,
    /// Serialized generator tuning.
    pub tuning: String,
}

impl GenerationKey {
    /// Derives the key of `config`, already adjusted for any manual override.
    pub fn from_config(config: &EarningsConfig) -> ChartResult<Self> {
        Ok(Self {
            oldest_month: config.resolved_oldest_month(),
            today: config.today,
            daily_window_days: config.daily_window_days,
            min_balance_cents: decimal_to_cents(config.min_balance, "min_balance")?,
            min_pending_cents: decimal_to_cents(config.min_pending, "min_pending")?,
            lifetime_gross_cents: decimal_to_cents(config.lifetime_gross, "lifetime_gross")?,
            net_margin_ppm: (config.net_margin * 1_000_000.0).round() as i64,
            tuning: serde_json::to_string(&config.tuning)?,
        })
    }

    /// Compact textual form for logs; the tuning is summarized by its
    /// serialized length.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        format!(
            "{}..{}|w{}|b{}|p{}|g{}|m{}|t{}",
            self.oldest_month,
            self.today,
            self.daily_window_days,
            self.min_balance_cents,
            self.min_pending_cents,
            self.lifetime_gross_cents,
            self.net_margin_ppm,
            self.tuning.len()
        )
    }
}

/// Persisted form of one cached dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedDatasetContractV1 {
    pub schema_version: u32,
    pub key: GenerationKey,
    pub dataset: Dataset,
}

impl CachedDatasetContractV1 {
    pub fn to_json(&self) -> ChartResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses and checks a stored payload.
    ///
    /// Unknown schema versions and datasets breaking their own invariants are
    /// reported as `CorruptCache`.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let payload: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::CorruptCache(format!("unparseable payload: {e}")))?;
        if payload.schema_version != DATASET_CACHE_SCHEMA_V1 {
            return Err(ChartError::CorruptCache(format!(
                "unsupported schema version: {}",
                payload.schema_version
            )));
        }
        payload
            .dataset
            .validate()
            .map_err(|e| ChartError::CorruptCache(e.to_string()))?;
        Ok(payload)
    }
}

/// Cache policy over a host [`KeyValueStore`].
#[derive(Debug)]
pub struct GenerationCache<S: KeyValueStore> {
    store: S,
    storage_key: String,
}

impl<S: KeyValueStore> GenerationCache<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_storage_key(store, DEFAULT_DATASET_STORAGE_KEY)
    }

    #[must_use]
    pub fn with_storage_key(store: S, storage_key: impl Into<String>) -> Self {
        Self {
            store,
            storage_key: storage_key.into(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Returns the stored dataset when it was produced under `key`.
    ///
    /// Corrupt entries are removed and reported as a miss.
    pub fn get(&mut self, key: &GenerationKey) -> Option<Dataset> {
        let raw = self.store.get(&self.storage_key)?;
        match CachedDatasetContractV1::from_json_str(&raw) {
            Ok(payload) if payload.key == *key => {
                debug!(key = %key.fingerprint(), "dataset cache hit");
                Some(payload.dataset)
            }
            Ok(payload) => {
                debug!(
                    stored = %payload.key.fingerprint(),
                    requested = %key.fingerprint(),
                    "dataset cache stale"
                );
                None
            }
            Err(err) => {
                warn!(error = %err, storage_key = %self.storage_key, "discarding cached dataset");
                self.store.remove(&self.storage_key);
                None
            }
        }
    }

    pub fn put(&mut self, key: &GenerationKey, dataset: &Dataset) -> ChartResult<()> {
        let payload = CachedDatasetContractV1 {
            schema_version: DATASET_CACHE_SCHEMA_V1,
            key: key.clone(),
            dataset: dataset.clone(),
        };
        self.store.set(&self.storage_key, payload.to_json()?);
        Ok(())
    }

    pub fn invalidate(&mut self) {
        self.store.remove(&self.storage_key);
    }
}

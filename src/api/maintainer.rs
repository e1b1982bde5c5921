use std::sync::Arc;

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Dataset, DatasetPlan, SeriesGenerator, YearMonth, decimal_to_cents};
use crate::error::ChartResult;

use super::{EarningsConfig, GenerationCache, GenerationKey, KeyValueStore};

/// Store key of the persisted manual override.
pub const DEFAULT_OVERRIDE_STORAGE_KEY: &str = "earnings_chart.override";

/// Why a dataset was (re)generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegenerationReason {
    /// Nothing was loaded or cached yet.
    Missing,
    /// Generation inputs changed.
    KeyChanged,
    /// The most recent month fell below the required minimum.
    BelowMinimum,
    /// A gross amount was supplied manually.
    ManualOverride,
    /// The host asked for a fresh timeline.
    Requested,
}

/// What [`InvariantMaintainer`] did with the current dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MaintainOutcome {
    Reused,
    LoadedFromCache,
    Regenerated { reason: RegenerationReason },
}

impl MaintainOutcome {
    /// `true` when the current dataset was replaced.
    #[must_use]
    pub fn replaced_dataset(self) -> bool {
        !matches!(self, Self::Reused)
    }
}

/// Immutable snapshot handed to renderers.
///
/// The dataset is shared, never mutated; a regeneration installs a new handle
/// with a higher revision.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetHandle {
    pub revision: u64,
    pub key: GenerationKey,
    pub dataset: Arc<Dataset>,
}

/// Manual gross override, persisted so reloads reproduce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossOverride {
    pub gross: Decimal,
    #[serde(default)]
    pub pinned_oldest_month: Option<YearMonth>,
}

/// Sole writer of the current dataset.
///
/// Decides between reuse, cache load and regeneration so the most recent
/// month always exceeds the configured minimum.
#[derive(Debug)]
pub struct InvariantMaintainer<S: KeyValueStore> {
    cache: GenerationCache<S>,
    current: Option<DatasetHandle>,
    next_revision: u64,
    gross_override: Option<GrossOverride>,
}

impl<S: KeyValueStore> InvariantMaintainer<S> {
    /// Wraps `store`, restoring a persisted manual override if one is present.
    #[must_use]
    pub fn new(store: S) -> Self {
        let cache = GenerationCache::new(store);
        let gross_override = cache
            .store()
            .get(DEFAULT_OVERRIDE_STORAGE_KEY)
            .and_then(|raw| match serde_json::from_str::<GrossOverride>(&raw) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(error = %err, "ignoring unreadable gross override");
                    None
                }
            });
        Self {
            cache,
            current: None,
            next_revision: 1,
            gross_override,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&DatasetHandle> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn gross_override(&self) -> Option<GrossOverride> {
        self.gross_override
    }

    #[must_use]
    pub fn cache(&self) -> &GenerationCache<S> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut GenerationCache<S> {
        &mut self.cache
    }

    /// `config` with the manual override and pinned anchor applied.
    #[must_use]
    pub fn effective_config(&self, config: &EarningsConfig) -> EarningsConfig {
        let mut effective = config.clone();
        if let Some(value) = self.gross_override {
            effective.lifetime_gross = value.gross;
            if let Some(anchor) = value.pinned_oldest_month {
                if anchor <= YearMonth::from_date(config.today) {
                    effective.oldest_month = Some(anchor);
                }
            }
        }
        effective
    }

    /// Keeps the current dataset when its key matches and the most recent
    /// month reaches the minimum; otherwise loads or regenerates one.
    pub fn ensure<R: Rng + ?Sized>(
        &mut self,
        generator: &SeriesGenerator,
        config: &EarningsConfig,
        rng: &mut R,
    ) -> ChartResult<MaintainOutcome> {
        let effective = self.effective_config(config);
        let key = GenerationKey::from_config(&effective)?;
        let minimum = effective.minimum_required();

        let reason = match &self.current {
            Some(handle) if handle.key == key => {
                if handle.dataset.most_recent_net() >= minimum {
                    return Ok(MaintainOutcome::Reused);
                }
                RegenerationReason::BelowMinimum
            }
            Some(_) => RegenerationReason::KeyChanged,
            None => RegenerationReason::Missing,
        };

        if reason != RegenerationReason::BelowMinimum {
            if let Some(dataset) = self.cache.get(&key) {
                if dataset.most_recent_net() >= minimum {
                    self.install(key, dataset);
                    return Ok(MaintainOutcome::LoadedFromCache);
                }
                debug!("cached dataset is below the minimum");
            }
        }

        self.regenerate_with(generator, &effective, key, reason, rng)
    }

    /// Generates a fresh dataset even when the current one is still valid.
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        generator: &SeriesGenerator,
        config: &EarningsConfig,
        rng: &mut R,
    ) -> ChartResult<MaintainOutcome> {
        let effective = self.effective_config(config);
        let key = GenerationKey::from_config(&effective)?;
        self.regenerate_with(generator, &effective, key, RegenerationReason::Requested, rng)
    }

    /// Replaces the gross amount and regenerates every period.
    ///
    /// With `preserve_anchor` the current oldest month stays the first month
    /// of the timeline across this and later regenerations.
    pub fn override_gross<R: Rng + ?Sized>(
        &mut self,
        generator: &SeriesGenerator,
        config: &EarningsConfig,
        gross: Decimal,
        preserve_anchor: bool,
        rng: &mut R,
    ) -> ChartResult<MaintainOutcome> {
        decimal_to_cents(gross, "override gross")?;
        let pinned_oldest_month = if preserve_anchor {
            self.current
                .as_ref()
                .and_then(|handle| handle.dataset.oldest_month())
                .or_else(|| self.gross_override.and_then(|value| value.pinned_oldest_month))
                .or(Some(config.resolved_oldest_month()))
        } else {
            None
        };
        let value = GrossOverride {
            gross,
            pinned_oldest_month,
        };
        self.gross_override = Some(value);
        match serde_json::to_string(&value) {
            Ok(raw) => self.cache.store_mut().set(DEFAULT_OVERRIDE_STORAGE_KEY, raw),
            Err(err) => warn!(error = %err, "failed to persist gross override"),
        }

        let effective = self.effective_config(config);
        let key = GenerationKey::from_config(&effective)?;
        self.regenerate_with(
            generator,
            &effective,
            key,
            RegenerationReason::ManualOverride,
            rng,
        )
    }

    /// Drops the manual override; the next `ensure` follows the config again.
    pub fn clear_override(&mut self) {
        self.gross_override = None;
        self.cache.store_mut().remove(DEFAULT_OVERRIDE_STORAGE_KEY);
    }

    fn regenerate_with<R: Rng + ?Sized>(
        &mut self,
        generator: &SeriesGenerator,
        effective: &EarningsConfig,
        key: GenerationKey,
        reason: RegenerationReason,
        rng: &mut R,
    ) -> ChartResult<MaintainOutcome> {
        let plan = DatasetPlan {
            total_gross_cents: key.lifetime_gross_cents,
            net_margin: effective.net_margin,
            oldest_month: key.oldest_month,
            today: effective.today,
            minimum_cents: key.min_balance_cents + key.min_pending_cents,
            daily_window_days: key.daily_window_days,
        };
        let seed: u64 = rng.r#gen();
        let dataset = generator.generate_dataset(&plan, seed)?;
        debug!(
            ?reason,
            key = %key.fingerprint(),
            most_recent_net = %dataset.most_recent_net(),
            "regenerated dataset"
        );
        if let Err(err) = self.cache.put(&key, &dataset) {
            warn!(error = %err, "failed to persist generated dataset");
        }
        self.install(key, dataset);
        Ok(MaintainOutcome::Regenerated { reason })
    }

    fn install(&mut self, key: GenerationKey, dataset: Dataset) {
        let revision = self.next_revision;
        self.next_revision += 1;
        self.current = Some(DatasetHandle {
            revision,
            key,
            dataset: Arc::new(dataset),
        });
    }
}

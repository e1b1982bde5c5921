use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::Category;
use crate::error::{ChartError, ChartResult};

/// How one category takes part in a period's split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ShareRule {
    /// Fraction drawn uniformly from `[min, max)` for every period.
    Share { min: f64, max: f64 },
    /// Whatever is left after all `Share` categories.
    Remainder,
    /// Always zero and never charted.
    Pinned,
}

/// Per-category share rules used by [`CategorySplitter`].
///
/// Exactly one category must be the `Remainder`. The anchor category is the
/// one carrying the majority share; charts center tooltips on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitProfile {
    pub anchor: Category,
    pub rules: Vec<(Category, ShareRule)>,
}

impl Default for SplitProfile {
    fn default() -> Self {
        Self::messages_dominant()
    }
}

impl SplitProfile {
    /// Messages carry 70-80%, posts 2-4%, tips the rest; referrals and
    /// streams are pinned to zero.
    #[must_use]
    pub fn messages_dominant() -> Self {
        Self {
            anchor: Category::Messages,
            rules: vec![
                (Category::Messages, ShareRule::Share { min: 0.70, max: 0.80 }),
                (Category::Posts, ShareRule::Share { min: 0.02, max: 0.04 }),
                (Category::Tips, ShareRule::Remainder),
                (Category::Subscriptions, ShareRule::Share { min: 0.0, max: 0.0 }),
                (Category::Referrals, ShareRule::Pinned),
                (Category::Streams, ShareRule::Pinned),
            ],
        }
    }

    #[must_use]
    pub fn rule(&self, category: Category) -> ShareRule {
        self.rules
            .iter()
            .find(|(candidate, _)| *candidate == category)
            .map_or(ShareRule::Pinned, |(_, rule)| *rule)
    }

    /// Categories that can carry a non-zero amount, in canonical order.
    #[must_use]
    pub fn visible_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| match self.rule(*category) {
                ShareRule::Share { max, .. } => max > 0.0,
                ShareRule::Remainder => true,
                ShareRule::Pinned => false,
            })
            .collect()
    }

    pub fn validate(&self) -> ChartResult<()> {
        let mut remainder_count = 0;
        let mut max_share_sum = 0.0;
        for category in Category::ALL {
            let occurrences = self.rules.iter().filter(|(c, _)| *c == category).count();
            if occurrences > 1 {
                return Err(ChartError::InvalidConfig(format!(
                    "category `{category}` has more than one share rule"
                )));
            }
        }
        for (category, rule) in &self.rules {
            match *rule {
                ShareRule::Share { min, max } => {
                    if !min.is_finite() || !max.is_finite() || min < 0.0 || max < min || max > 1.0 {
                        return Err(ChartError::InvalidConfig(format!(
                            "share range for `{category}` must satisfy 0 <= min <= max <= 1"
                        )));
                    }
                    max_share_sum += max;
                }
                ShareRule::Remainder => remainder_count += 1,
                ShareRule::Pinned => {}
            }
        }
        if remainder_count != 1 {
            return Err(ChartError::InvalidConfig(
                "split profile needs exactly one remainder category".to_owned(),
            ));
        }
        if max_share_sum > 1.0 {
            return Err(ChartError::InvalidConfig(
                "maximum category shares exceed the whole amount".to_owned(),
            ));
        }
        if matches!(self.rule(self.anchor), ShareRule::Pinned) {
            return Err(ChartError::InvalidConfig(format!(
                "anchor category `{}` cannot be pinned",
                self.anchor
            )));
        }
        Ok(())
    }
}

/// Splits a period's net amount across categories.
///
/// Shares are drawn independently per call so the mix drifts over a timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySplitter {
    profile: SplitProfile,
}

impl CategorySplitter {
    pub fn new(profile: SplitProfile) -> ChartResult<Self> {
        profile.validate()?;
        Ok(Self { profile })
    }

    #[must_use]
    pub fn profile(&self) -> &SplitProfile {
        &self.profile
    }

    /// Returns whole cents in `Category::ALL` order, summing to `net_cents`.
    pub fn split<R: Rng + ?Sized>(&self, net_cents: i64, rng: &mut R) -> [i64; 6] {
        let mut out = [0_i64; 6];
        let net_cents = net_cents.max(0);
        let mut assigned = 0_i64;
        let mut remainder_slot = None;

        for (slot, category) in Category::ALL.into_iter().enumerate() {
            match self.profile.rule(category) {
                ShareRule::Share { min, max } => {
                    let share = if max > min { rng.gen_range(min..max) } else { min };
                    let cents = (net_cents as f64 * share).round() as i64;
                    let cents = cents.clamp(0, net_cents - assigned);
                    out[slot] = cents;
                    assigned += cents;
                }
                ShareRule::Remainder => remainder_slot = Some(slot),
                ShareRule::Pinned => {}
            }
        }

        if let Some(slot) = remainder_slot {
            out[slot] = net_cents - assigned;
        }
        out
    }
}

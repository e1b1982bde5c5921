//! Integer-cent arithmetic shared by the generator and the splitter.
//!
//! Generation happens in whole cents so that normalized totals and category
//! sums are exact; `Decimal` is only used at the public boundary.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

/// Number of cents in one currency unit.
pub const CENTS_PER_UNIT: i64 = 100;

#[must_use]
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Converts a non-negative amount to whole cents, rounding half away from zero.
pub fn decimal_to_cents(value: Decimal, field_name: &str) -> ChartResult<i64> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ChartError::InvalidData(format!(
            "{field_name} must be >= 0, got {value}"
        )));
    }
    (value * Decimal::from(CENTS_PER_UNIT))
        .round()
        .to_i64()
        .ok_or_else(|| ChartError::InvalidData(format!("{field_name} does not fit in cents")))
}

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Distributes `total` cents across `weights` with the largest-remainder rule.
///
/// The returned amounts always sum to `total` (for `total >= 0`). Zero or
/// non-finite weights receive nothing unless every weight is unusable, in
/// which case the total is spread evenly.
#[must_use]
pub fn allocate_cents(total: i64, weights: &[f64]) -> Vec<i64> {
    if weights.is_empty() {
        return Vec::new();
    }
    let total = total.max(0);
    let sanitized: Vec<f64> = weights
        .iter()
        .map(|w| if w.is_finite() && *w > 0.0 { *w } else { 0.0 })
        .collect();
    let weight_sum: f64 = sanitized.iter().sum();
    let shares: Vec<f64> = if weight_sum > 0.0 {
        sanitized.iter().map(|w| w / weight_sum).collect()
    } else {
        vec![1.0 / sanitized.len() as f64; sanitized.len()]
    };

    let mut amounts = Vec::with_capacity(shares.len());
    let mut remainders = Vec::with_capacity(shares.len());
    for (idx, share) in shares.iter().enumerate() {
        let exact = total as f64 * share;
        let floor = exact.floor();
        amounts.push(floor as i64);
        remainders.push((idx, exact - floor));
    }

    let mut leftover = total - amounts.iter().sum::<i64>();
    remainders.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    let mut cursor = 0;
    while leftover > 0 && !remainders.is_empty() {
        let idx = remainders[cursor % remainders.len()].0;
        amounts[idx] += 1;
        leftover -= 1;
        cursor += 1;
    }
    while leftover < 0 {
        // Float rounding overshot; take back from the largest amounts.
        let Some((idx, _)) = amounts.iter().enumerate().max_by_key(|(_, v)| **v) else {
            break;
        };
        amounts[idx] -= 1;
        leftover += 1;
    }
    amounts
}

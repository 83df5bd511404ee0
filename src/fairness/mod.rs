//! Group-fairness audit of binary predictions.
//!
//! Undefined statistics never surface as NaN: a rate whose denominator is zero is reported
//! as `0.0`, and a min/max ratio whose maximum is `0.0` is `1.0` (every group is equal).

pub mod types;

#[cfg(test)]
mod tests;

pub use types::{ClassificationMetrics, ConfusionCounts, FairnessRatios, FairnessReport, GroupRates};

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq)]
pub enum FairnessError {
    #[error("input length mismatch: {y_true} labels, {y_pred} predictions, {groups} groups")]
    LengthMismatch {
        y_true: usize,
        y_pred: usize,
        groups: usize,
    },

    #[error("cannot evaluate fairness over an empty population")]
    Empty,
}

/// Computes overall and per-group metrics plus demographic-parity and equalized-odds ratios.
pub fn evaluate<G: AsRef<str>>(
    y_true: &[bool],
    y_pred: &[bool],
    groups: &[G],
) -> Result<FairnessReport, FairnessError> {
    if y_true.len() != y_pred.len() || y_true.len() != groups.len() {
        return Err(FairnessError::LengthMismatch {
            y_true: y_true.len(),
            y_pred: y_pred.len(),
            groups: groups.len(),
        });
    }
    if y_true.is_empty() {
        return Err(FairnessError::Empty);
    }

    let mut overall = ConfusionCounts::default();
    let mut per_group: BTreeMap<String, ConfusionCounts> = BTreeMap::new();
    for ((actual, predicted), group) in y_true.iter().zip(y_pred).zip(groups) {
        overall.record(*actual, *predicted);
        per_group
            .entry(group.as_ref().to_string())
            .or_default()
            .record(*actual, *predicted);
    }

    let rates_by_group: BTreeMap<String, GroupRates> = per_group
        .iter()
        .map(|(group, counts)| (group.clone(), counts.rates()))
        .collect();

    let ratios = FairnessRatios {
        demographic_parity_ratio: demographic_parity_ratio(rates_by_group.values()),
        equalized_odds_ratio: equalized_odds_ratio(rates_by_group.values()),
    };

    debug!(
        rows = y_true.len(),
        groups = per_group.len(),
        demographic_parity_ratio = ratios.demographic_parity_ratio,
        equalized_odds_ratio = ratios.equalized_odds_ratio,
        "Fairness snapshot computed"
    );

    Ok(FairnessReport {
        ratios,
        overall: overall.metrics(),
        by_group: per_group
            .iter()
            .map(|(group, counts)| (group.clone(), counts.metrics()))
            .collect(),
        rates_by_group,
    })
}

/// Smallest over largest per-group selection rate.
pub fn demographic_parity_ratio<'a, I>(rates: I) -> f64
where
    I: IntoIterator<Item = &'a GroupRates>,
{
    min_max_ratio(rates.into_iter().map(|r| r.selection_rate))
}

/// The worse of the TPR and FPR between-group ratios.
pub fn equalized_odds_ratio<'a, I>(rates: I) -> f64
where
    I: IntoIterator<Item = &'a GroupRates> + Clone,
{
    let tpr = min_max_ratio(rates.clone().into_iter().map(|r| r.true_positive_rate));
    let fpr = min_max_ratio(rates.into_iter().map(|r| r.false_positive_rate));
    tpr.min(fpr)
}

fn min_max_ratio<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let (min, max) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !max.is_finite() || max <= 0.0 {
        1.0
    } else {
        (min / max).clamp(0.0, 1.0)
    }
}

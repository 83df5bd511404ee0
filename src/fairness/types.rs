use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Binary confusion counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionCounts {
    pub fn record(&mut self, actual: bool, predicted: bool) {
        match (actual, predicted) {
            (true, true) => self.true_positives += 1,
            (false, true) => self.false_positives += 1,
            (false, false) => self.true_negatives += 1,
            (true, false) => self.false_negatives += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    pub fn actual_positives(&self) -> usize {
        self.true_positives + self.false_negatives
    }

    pub fn actual_negatives(&self) -> usize {
        self.true_negatives + self.false_positives
    }

    pub fn predicted_positives(&self) -> usize {
        self.true_positives + self.false_positives
    }

    pub fn accuracy(&self) -> f64 {
        safe_ratio(self.true_positives + self.true_negatives, self.total())
    }

    pub fn precision(&self) -> f64 {
        safe_ratio(self.true_positives, self.predicted_positives())
    }

    /// Recall, i.e. the true positive rate.
    pub fn recall(&self) -> f64 {
        safe_ratio(self.true_positives, self.actual_positives())
    }

    pub fn false_positive_rate(&self) -> f64 {
        safe_ratio(self.false_positives, self.actual_negatives())
    }

    pub fn f1(&self) -> f64 {
        safe_ratio(
            2 * self.true_positives,
            2 * self.true_positives + self.false_positives + self.false_negatives,
        )
    }

    pub fn selection_rate(&self) -> f64 {
        safe_ratio(self.predicted_positives(), self.total())
    }

    pub fn metrics(&self) -> ClassificationMetrics {
        ClassificationMetrics {
            accuracy: self.accuracy(),
            precision: self.precision(),
            recall: self.recall(),
            f1: self.f1(),
        }
    }

    pub fn rates(&self) -> GroupRates {
        GroupRates {
            count: self.total(),
            selection_rate: self.selection_rate(),
            true_positive_rate: self.recall(),
            false_positive_rate: self.false_positive_rate(),
        }
    }
}

/// `numerator / denominator`, or `0.0` when the denominator is zero.
fn safe_ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// The four-field metric record reported per group and overall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Rates the fairness ratios are built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupRates {
    pub count: usize,
    pub selection_rate: f64,
    pub true_positive_rate: f64,
    pub false_positive_rate: f64,
}

/// Between-group parity ratios, both in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FairnessRatios {
    pub demographic_parity_ratio: f64,
    pub equalized_odds_ratio: f64,
}

/// Fairness snapshot of a classifier over a labeled population.
#[derive(Debug, Clone, PartialEq)]
pub struct FairnessReport {
    pub ratios: FairnessRatios,
    pub overall: ClassificationMetrics,
    pub by_group: BTreeMap<String, ClassificationMetrics>,
    pub rates_by_group: BTreeMap<String, GroupRates>,
}

use super::*;

/// Group A: tp=2 fn=1 fp=1 tn=1. Group B: tp=1 fn=0 fp=1 tn=2.
fn two_group_population() -> (Vec<bool>, Vec<bool>, Vec<&'static str>) {
    let y_true = vec![true, true, false, false, true, true, false, false, false];
    let y_pred = vec![true, false, false, true, true, true, true, false, false];
    let groups = vec!["A", "A", "A", "A", "A", "B", "B", "B", "B"];
    (y_true, y_pred, groups)
}

#[test]
fn test_confusion_counts_record() {
    let mut counts = ConfusionCounts::default();
    counts.record(true, true);
    counts.record(true, false);
    counts.record(false, true);
    counts.record(false, false);
    counts.record(false, false);

    assert_eq!(counts.true_positives, 1);
    assert_eq!(counts.false_negatives, 1);
    assert_eq!(counts.false_positives, 1);
    assert_eq!(counts.true_negatives, 2);
    assert_eq!(counts.total(), 5);
}

#[test]
fn test_per_group_metrics_match_hand_computed_values() {
    let (y_true, y_pred, groups) = two_group_population();
    let report = evaluate(&y_true, &y_pred, &groups).unwrap();

    let a = report.by_group["A"];
    assert_eq!(a.accuracy, 3.0 / 5.0);
    assert_eq!(a.precision, 2.0 / 3.0);
    assert_eq!(a.recall, 2.0 / 3.0);
    assert_eq!(a.f1, 2.0 / 3.0);

    let b = report.by_group["B"];
    assert_eq!(b.accuracy, 3.0 / 4.0);
    assert_eq!(b.precision, 1.0 / 2.0);
    assert_eq!(b.recall, 1.0);
    assert_eq!(b.f1, 2.0 / 3.0);
}

#[test]
fn test_overall_metrics_pool_all_rows() {
    let (y_true, y_pred, groups) = two_group_population();
    let report = evaluate(&y_true, &y_pred, &groups).unwrap();

    // Pooled: tp=3 fn=1 fp=2 tn=3.
    assert_eq!(report.overall.accuracy, 6.0 / 9.0);
    assert_eq!(report.overall.precision, 3.0 / 5.0);
    assert_eq!(report.overall.recall, 3.0 / 4.0);
    assert_eq!(report.overall.f1, 6.0 / 9.0);
}

#[test]
fn test_fairness_ratios_match_hand_computed_values() {
    let (y_true, y_pred, groups) = two_group_population();
    let report = evaluate(&y_true, &y_pred, &groups).unwrap();

    let selection_a = 3.0 / 5.0;
    let selection_b = 2.0 / 4.0;
    assert_eq!(report.rates_by_group["A"].selection_rate, selection_a);
    assert_eq!(report.rates_by_group["B"].selection_rate, selection_b);
    assert_eq!(
        report.ratios.demographic_parity_ratio,
        selection_b / selection_a
    );

    // TPR: A = 2/3, B = 1. FPR: A = 1/2, B = 1/3.
    let tpr_ratio: f64 = (2.0 / 3.0) / 1.0;
    let fpr_ratio = (1.0 / 3.0) / (1.0 / 2.0);
    assert_eq!(report.ratios.equalized_odds_ratio, tpr_ratio.min(fpr_ratio));
}

#[test]
fn test_identical_selection_rates_give_parity_one() {
    let y_true = vec![true, false, true, false];
    let y_pred = vec![true, false, false, true];
    let groups = vec!["A", "A", "B", "B"];

    let report = evaluate(&y_true, &y_pred, &groups).unwrap();
    assert_eq!(report.ratios.demographic_parity_ratio, 1.0);
}

#[test]
fn test_ratios_stay_in_unit_interval() {
    let populations: Vec<(Vec<bool>, Vec<bool>, Vec<&str>)> = vec![
        two_group_population(),
        (
            vec![true, true, false, false],
            vec![true, true, false, false],
            vec!["x", "y", "x", "y"],
        ),
        (
            vec![true, false, true, false, true, false],
            vec![false, false, true, true, true, true],
            vec!["a", "b", "c", "a", "b", "c"],
        ),
    ];

    for (y_true, y_pred, groups) in populations {
        let report = evaluate(&y_true, &y_pred, &groups).unwrap();
        for ratio in [
            report.ratios.demographic_parity_ratio,
            report.ratios.equalized_odds_ratio,
        ] {
            assert!((0.0..=1.0).contains(&ratio), "ratio {ratio} out of bounds");
        }
    }
}

#[test]
fn test_single_class_group_yields_zeros_not_nan() {
    // Group B has only negatives and no positive predictions.
    let y_true = vec![true, false, false, false];
    let y_pred = vec![true, false, false, false];
    let groups = vec!["A", "A", "B", "B"];

    let report = evaluate(&y_true, &y_pred, &groups).unwrap();
    let b = report.by_group["B"];
    assert_eq!(b.accuracy, 1.0);
    assert_eq!(b.precision, 0.0);
    assert_eq!(b.recall, 0.0);
    assert_eq!(b.f1, 0.0);

    for metrics in report.by_group.values() {
        assert!(metrics.accuracy.is_finite());
        assert!(metrics.precision.is_finite());
        assert!(metrics.recall.is_finite());
        assert!(metrics.f1.is_finite());
    }
    assert!(report.ratios.demographic_parity_ratio.is_finite());
    assert!(report.ratios.equalized_odds_ratio.is_finite());
}

#[test]
fn test_no_positive_predictions_anywhere_is_parity_one() {
    let y_true = vec![true, false, true, false];
    let y_pred = vec![false; 4];
    let groups = vec!["A", "A", "B", "B"];

    let report = evaluate(&y_true, &y_pred, &groups).unwrap();
    assert_eq!(report.ratios.demographic_parity_ratio, 1.0);
    assert_eq!(report.ratios.equalized_odds_ratio, 1.0);
    assert_eq!(report.overall.precision, 0.0);
}

#[test]
fn test_single_group_population() {
    let y_true = vec![true, false, true];
    let y_pred = vec![true, true, false];
    let groups = vec!["only"; 3];

    let report = evaluate(&y_true, &y_pred, &groups).unwrap();
    assert_eq!(report.by_group.len(), 1);
    assert_eq!(report.ratios.demographic_parity_ratio, 1.0);
    assert_eq!(report.ratios.equalized_odds_ratio, 1.0);
    assert_eq!(report.by_group["only"], report.overall);
}

#[test]
fn test_groups_are_sorted() {
    let y_true = vec![true, false, true];
    let y_pred = vec![true, false, true];
    let groups = vec!["Male", "Female", "Non-binary"];

    let report = evaluate(&y_true, &y_pred, &groups).unwrap();
    let keys: Vec<&str> = report.by_group.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Female", "Male", "Non-binary"]);
}

#[test]
fn test_owned_group_labels_are_accepted() {
    let groups: Vec<String> = vec!["A".to_string(), "B".to_string()];
    let report = evaluate(&[true, false], &[true, false], &groups).unwrap();
    assert_eq!(report.by_group.len(), 2);
}

#[test]
fn test_length_mismatch() {
    let err = evaluate(&[true, false], &[true], &["A", "B"]).unwrap_err();
    assert_eq!(
        err,
        FairnessError::LengthMismatch {
            y_true: 2,
            y_pred: 1,
            groups: 2
        }
    );
}

#[test]
fn test_empty_population() {
    let groups: [&str; 0] = [];
    assert_eq!(evaluate(&[], &[], &groups).unwrap_err(), FairnessError::Empty);
}

use demandrs::metrics::{regression, AccuracyReport};
use demandrs::Error;

#[test]
fn test_mape_signals_undefined_on_zero_actual() {
    // Actual [0, 4, 8] vs predicted [1, 5, 9]: division by zero on the
    // first element must signal a distinct error, not a numeric value.
    let actual = [0.0, 4.0, 8.0];
    let predicted = [1.0, 5.0, 9.0];

    let result = regression::mean_absolute_percentage_error(&actual, &predicted);
    assert!(matches!(result, Err(Error::MetricUndefined(_))));
}

#[test]
fn test_report_with_undefined_mape() {
    let actual = [0.0, 4.0, 8.0];
    let predicted = [1.0, 5.0, 9.0];

    let report = AccuracyReport::compute(&actual, &predicted).unwrap();
    assert_eq!(report.mape, None);
    assert!((report.mae - 1.0).abs() < 1e-12);
    assert!((report.rmse - 1.0).abs() < 1e-12);
    assert!(report.r2 > 0.0);
}

#[test]
fn test_full_report_on_clean_series() {
    let actual = [10.0, 12.0, 14.0, 16.0];
    let predicted = [11.0, 12.0, 13.0, 17.0];

    let report = AccuracyReport::compute(&actual, &predicted).unwrap();
    assert!((report.mae - 0.75).abs() < 1e-12);
    let mape = report.mape.unwrap();
    // (10% + 0% + 7.142..% + 6.25%) / 4
    assert!((mape - (10.0 + 0.0 + 100.0 / 14.0 + 6.25) / 4.0).abs() < 1e-9);
    assert!(report.r2 > 0.8);
}

#[test]
fn test_metrics_reject_misaligned_series() {
    assert!(matches!(
        regression::r2_score(&[1.0, 2.0], &[1.0]),
        Err(Error::LengthMismatch { .. })
    ));
    assert!(matches!(
        regression::mean_absolute_error(&[], &[]),
        Err(Error::EmptyData(_))
    ));
}

use approx::assert_abs_diff_eq;
use prop_forecast::{DataSet, EngineError, ForecastModel, HistoricalObservation, TrainedForecastModel};
use rstest::rstest;

fn create_test_data() -> DataSet {
    let rows = vec![
        HistoricalObservation::new("Hittin", 2020, 60.0, 55.0, 6200.0),
        HistoricalObservation::new("Hittin", 2021, 65.0, 50.0, 6500.0),
        HistoricalObservation::new("Hittin", 2022, 70.0, 48.0, 6900.0),
        HistoricalObservation::new("Hittin", 2023, 80.0, 45.0, 7600.0),
        HistoricalObservation::new("Hittin", 2024, 85.0, 40.0, 8200.0),
        HistoricalObservation::new("Hittin", 2025, 90.0, 35.0, 8800.0),
    ];

    DataSet::new(rows).unwrap()
}

#[test]
fn test_train_and_forecast() {
    let model = ForecastModel::new();
    let trained = model.train(&create_test_data()).unwrap();

    assert_eq!(trained.area(), "Hittin");
    assert_eq!(trained.coefficients().len(), 3);
    assert!(trained.metrics().r_squared > 0.95);

    // In-sample predictions track the observed prices
    let predicted = trained.predict(&create_test_data()).unwrap();
    for (p, y) in predicted.iter().zip(create_test_data().targets()) {
        assert!((p - y).abs() < 200.0);
    }
}

#[test]
fn test_forecast_is_deterministic() {
    let model = ForecastModel::new();
    model.train(&create_test_data()).unwrap();

    let first = model.forecast_price(2030, 95.0, 30.0).unwrap();
    for _ in 0..50 {
        assert_eq!(model.forecast_price(2030, 95.0, 30.0).unwrap(), first);
    }
}

#[test]
fn test_two_rows_are_enough() {
    let data = DataSet::new(vec![
        HistoricalObservation::new("Small", 2023, 70.0, 50.0, 5000.0),
        HistoricalObservation::new("Small", 2024, 75.0, 45.0, 5300.0),
    ])
    .unwrap();

    let model = ForecastModel::new();
    model.train(&data).unwrap();

    // The fit passes through both observations
    assert_abs_diff_eq!(model.forecast_price(2023, 70.0, 50.0).unwrap(), 5000.0, epsilon = 0.01);
    assert_abs_diff_eq!(model.forecast_price(2024, 75.0, 45.0).unwrap(), 5300.0, epsilon = 0.01);
}

#[rstest]
#[case(2030, 95.0, 30.0)]
#[case(1990, 0.0, 0.0)]
#[case(2100, -40.0, 250.0)]
#[case(2025, 1.0e6, -1.0e6)]
fn test_forecast_is_finite_for_finite_inputs(
    #[case] year: i32,
    #[case] demand: f64,
    #[case] risk: f64,
) {
    let model = ForecastModel::new();
    model.train(&create_test_data()).unwrap();

    assert!(model.forecast_price(year, demand, risk).unwrap().is_finite());
}

#[test]
fn test_degenerate_training_data() {
    // Every year identical: no variance in one feature
    let rows = (0..4)
        .map(|i| HistoricalObservation::new("Flat", 2024, 60.0 + i as f64, 50.0 - i as f64, 5000.0))
        .collect();

    assert!(matches!(
        DataSet::new(rows),
        Err(EngineError::DegenerateDataset(_))
    ));
}

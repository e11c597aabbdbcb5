use pretty_assertions::assert_eq;
use prop_forecast::data::{FEATURE_NAMES, MIN_OBSERVATIONS};
use prop_forecast::{ColumnValues, DataSet, EngineError, HistoricalObservation, ObservationTable};

fn create_table() -> ObservationTable {
    ObservationTable::new()
        .with_column(
            "Area",
            ColumnValues::Text(vec!["Olaya".to_string(); 3]),
        )
        .with_column("Year", ColumnValues::Integer(vec![2022, 2023, 2024]))
        .with_column("Demand_Index", ColumnValues::Integer(vec![70, 74, 81]))
        .with_column("Risk_Score", ColumnValues::Float(vec![50.0, 47.5, 42.0]))
        .with_column("Avg_Price", ColumnValues::Float(vec![5000.0, 5150.0, 5400.0]))
}

#[test]
fn test_table_to_dataset() {
    let data = DataSet::from_table(&create_table()).unwrap();

    assert_eq!(data.area(), "Olaya");
    assert_eq!(data.len(), 3);
    assert_eq!(
        data.observations()[1],
        HistoricalObservation::new("Olaya", 2023, 74.0, 47.5, 5150.0)
    );
    assert_eq!(data.features()[2], [81.0, 42.0, 2024.0]);
    assert_eq!(FEATURE_NAMES, ["Demand_Index", "Risk_Score", "Year"]);
}

#[test]
fn test_missing_columns_are_listed() {
    let table = ObservationTable::new()
        .with_column("Area", ColumnValues::Text(vec!["Olaya".to_string()]))
        .with_column("Year", ColumnValues::Integer(vec![2024]));

    match DataSet::from_table(&table) {
        Err(EngineError::Schema(msg)) => {
            assert_eq!(msg, "Missing required columns: Demand_Index, Risk_Score, Avg_Price")
        }
        other => panic!("expected schema error, got {:?}", other),
    }
}

#[test]
fn test_column_length_and_type_mismatches() {
    let short = create_table().with_column("Avg_Price", ColumnValues::Float(vec![1.0, 2.0]));
    assert!(matches!(DataSet::from_table(&short), Err(EngineError::Schema(_))));

    let text_demand = create_table().with_column(
        "Demand_Index",
        ColumnValues::Text(vec!["high".to_string(); 3]),
    );
    assert!(matches!(
        DataSet::from_table(&text_demand),
        Err(EngineError::Schema(_))
    ));

    let fractional_year =
        create_table().with_column("Year", ColumnValues::Float(vec![2022.0, 2023.5, 2024.0]));
    assert!(matches!(
        DataSet::from_table(&fractional_year),
        Err(EngineError::Schema(_))
    ));
}

#[test]
fn test_too_few_rows() {
    let rows = vec![HistoricalObservation::new("Olaya", 2024, 80.0, 40.0, 5200.0)];
    assert_eq!(MIN_OBSERVATIONS, 2);
    assert!(matches!(
        DataSet::new(rows),
        Err(EngineError::DegenerateDataset(_))
    ));
    assert!(matches!(
        DataSet::new(Vec::new()),
        Err(EngineError::DegenerateDataset(_))
    ));
}

#[test]
fn test_partition_by_area() {
    let rows = vec![
        HistoricalObservation::new("Olaya", 2022, 70.0, 50.0, 5000.0),
        HistoricalObservation::new("Malqa", 2022, 82.0, 35.0, 7100.0),
        HistoricalObservation::new("Olaya", 2023, 74.0, 47.0, 5150.0),
        HistoricalObservation::new("Malqa", 2023, 85.0, 33.0, 7400.0),
    ];

    let parts = DataSet::partition_by_area(rows).unwrap();

    assert_eq!(parts.keys().collect::<Vec<_>>(), vec!["Malqa", "Olaya"]);
    assert_eq!(parts["Malqa"].targets(), &[7100.0, 7400.0]);
    assert_eq!(parts["Olaya"].latest().year, 2023);
}

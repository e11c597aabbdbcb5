use prop_forecast::EngineError;
use prop_math::MathError;

#[test]
fn test_error_conversion() {
    // Math errors keep their message
    let math_error = MathError::CalculationError("singular matrix".to_string());
    let engine_error = EngineError::from(math_error);

    match engine_error {
        EngineError::Math(ref inner) => assert!(inner.to_string().contains("singular matrix")),
        _ => panic!("Expected Math variant"),
    }

    // JSON errors become serialization errors
    let json_error = serde_json::from_str::<f64>("not json").unwrap_err();
    assert!(matches!(
        EngineError::from(json_error),
        EngineError::Serialization(_)
    ));
}

#[test]
fn test_error_display() {
    let error = EngineError::InvalidParameter("runs must be positive".to_string());
    assert_eq!(error.to_string(), "Invalid parameter: runs must be positive");

    assert_eq!(EngineError::NotTrained.to_string(), "Model is not trained");

    let error = EngineError::DegenerateDataset("Feature Year has zero variance".to_string());
    assert!(error.to_string().starts_with("Degenerate dataset"));
}

#[test]
fn test_error_creation() {
    let schema_error = EngineError::Schema("Missing required columns: Year".to_string());

    if let EngineError::Schema(msg) = schema_error {
        assert_eq!(msg, "Missing required columns: Year");
    } else {
        panic!("Wrong error variant");
    }
}

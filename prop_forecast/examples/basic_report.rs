use prop_forecast::{
    DataSet, EngineConfig, ForecastModel, ForecastRequest, HistoricalObservation, ReportAggregator,
};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Historical observations for one area
    let demand = [60.0, 65.0, 70.0, 80.0, 85.0, 90.0];
    let risk = [55.0, 50.0, 48.0, 45.0, 40.0, 35.0];
    let price = [6200.0, 6500.0, 6900.0, 7600.0, 8200.0, 8800.0];
    let rows = (0..demand.len())
        .map(|i| {
            HistoricalObservation::new("North Riyadh", 2020 + i as i32, demand[i], risk[i], price[i])
        })
        .collect();
    let data = DataSet::new(rows)?;

    // Train the price model
    let model = Arc::new(ForecastModel::new());
    let trained = model.train(&data)?;
    println!("Trained on {} observations", trained.observations());
    println!("R²: {:.4}", trained.metrics().r_squared);
    for (feature, coefficient) in trained.named_coefficients() {
        println!("  {:<13} {:>10.2}", feature, coefficient);
    }

    // Build a report with a fixed seed
    let mut config = EngineConfig::default();
    config.simulation.seed = Some(42);
    let aggregator = ReportAggregator::new(model, &config)?;

    let request = ForecastRequest::new("North Riyadh", 2030, 95.0, 30.0);
    let report = aggregator.report_configured(&request)?;

    println!("\nExecutive report:");
    println!("{}", report.to_json()?);

    Ok(())
}

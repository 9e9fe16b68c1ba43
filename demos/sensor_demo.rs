use dualpred_codec::SummaryReport;
use dualpred_core::{Measurements, RunSummary, Series, SimulationBuilder, SimulationConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // A synthetic day of co-located temperature / pressure readings.
    let temperature: Vec<f64> = (0..96).map(|i| 18.0 + (i as f64 / 15.0).sin() * 6.0).collect();
    let pressure: Vec<f64> = (0..96).map(|i| 1013.0 + (i as f64 / 40.0).cos() * 9.0).collect();
    let measurements = Measurements::new(vec![
        Series::new("temperature", temperature),
        Series::new("pressure", pressure),
    ])?;

    let mut config = SimulationConfig::two_dimensional();
    config.set_threshold(1.0);
    let engine = SimulationBuilder::new().with_config(config).build()?;

    let summary = RunSummary::score(&engine.run(&measurements)?);
    println!("{}", SummaryReport::new(&summary));
    Ok(())
}

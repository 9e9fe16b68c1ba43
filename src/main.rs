use clap::{Args, Parser, Subcommand};
use dualpred_codec::{MeasurementCodec, SummaryReport};
use dualpred_core::{DualPredError, PredictorKind, RunSummary, SimulationBuilder, SimulationConfig};
use dualpred_sweep::SweepOrchestrator;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Dual prediction data-reduction simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate one run and print its summary.
    Run {
        #[command(flatten)]
        common: CommonArgs,
        /// Threshold applied to every channel.
        #[arg(short, long)]
        threshold: Option<f64>,
        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run a grid of predictors x thresholds in parallel.
    Sweep {
        #[command(flatten)]
        common: CommonArgs,
        /// Comma separated thresholds, e.g. 1,2.5,10
        #[arg(long, value_delimiter = ',', required = true)]
        thresholds: Vec<f64>,
        /// Comma separated predictor tags; defaults to all of them.
        #[arg(long, value_delimiter = ',')]
        predictors: Vec<String>,
        /// Upper bound on concurrent runs.
        #[arg(long)]
        workers: Option<usize>,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Measurement CSV; overrides `input` from the configuration.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Predictor tag; overrides `predictor` from the configuration.
    #[arg(short, long)]
    predictor: Option<String>,
    /// Use the temperature + pressure preset instead of temperature only.
    #[arg(long, conflicts_with = "config")]
    two_dimensional: bool,
}

impl CommonArgs {
    fn resolve(&self) -> Result<SimulationConfig, DualPredError> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)?,
            None if self.two_dimensional => SimulationConfig::two_dimensional(),
            None => SimulationConfig::one_dimensional(),
        };
        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(predictor) = &self.predictor {
            config.predictor = predictor.clone();
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = execute(cli.command).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn execute(command: Command) -> Result<(), DualPredError> {
    match command {
        Command::Run { common, threshold, json } => {
            let mut config = common.resolve()?;
            if let Some(threshold) = threshold {
                config.set_threshold(threshold);
            }
            // Configuration is fully checked before any input is touched.
            let engine = SimulationBuilder::new().with_config(config.clone()).build()?;
            tracing::info!("dualsim: {} predictor on {}", engine.predictor(), config.input.display());
            let measurements = MeasurementCodec::load(&config.input, &config.channel_names())?;
            let outcome = engine.run(&measurements)?;
            let summary = RunSummary::score(&outcome);

            let report = SummaryReport::new(&summary);
            if json {
                let rendered = report
                    .to_json()
                    .map_err(|e| DualPredError::Io(e.into()))?;
                println!("{}", rendered);
            } else {
                println!("{}", report);
            }
        }
        Command::Sweep { common, thresholds, predictors, workers } => {
            let config = common.resolve()?;
            let predictors = if predictors.is_empty() {
                PredictorKind::ALL.to_vec()
            } else {
                predictors
                    .iter()
                    .map(|p| p.parse::<PredictorKind>())
                    .collect::<Result<Vec<_>, _>>()?
            };
            config.validate()?;
            let channels = config.registry()?;
            let measurements = MeasurementCodec::load(&config.input, &config.channel_names())?;

            let mut orchestrator = SweepOrchestrator::new(Arc::new(measurements), channels);
            if let Some(workers) = workers {
                orchestrator = orchestrator.with_workers(workers);
            }
            let points = orchestrator.run(&predictors, &thresholds).await?;

            println!("predictor,threshold,transmissions,fraction_sent,{}", rmse_columns(&config));
            for point in points {
                let rmses: Vec<String> = point
                    .summary
                    .channels
                    .iter()
                    .map(|c| c.rmse.to_string())
                    .collect();
                println!(
                    "{},{},{},{},{}",
                    point.predictor,
                    point.threshold,
                    point.summary.transmissions,
                    point.summary.efficiency,
                    rmses.join(",")
                );
            }
        }
    }
    Ok(())
}

fn rmse_columns(config: &SimulationConfig) -> String {
    config
        .channel_names()
        .iter()
        .map(|name| format!("{}_rmse", name))
        .collect::<Vec<_>>()
        .join(",")
}

// Fit check binary
//
// Purpose: Score a garment against a user's measurements from JSON files
// Usage: cargo run --bin fit_check -- user.json garment.json shirt
//
// Environment:
//   FIT_STRATEGY  label (default) | averaged
//   FIT_CONFIG    optional JSON threshold file; otherwise FIT_*_TOLERANCE vars

use std::fs;

use anyhow::{bail, Context};
use fit_scorer_rust::{FitCalculator, FitConfig, MeasurementRecord, StrategyKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn read_record(path: &str) -> anyhow::Result<MeasurementRecord> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read measurements: {}", path))?;
    let record = MeasurementRecord::from_json_str(&contents)
        .with_context(|| format!("Failed to parse measurements JSON: {}", path))?;
    record.validate()?;
    Ok(record)
}

fn usage(args: &[String]) -> String {
    let program = args.first().map(String::as_str).unwrap_or(env!("CARGO_BIN_NAME"));
    format!("Usage: {} <user.json> <garment.json> <archetype>", program)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fit_scorer_rust=info,fit_check=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        bail!(usage(&args));
    }

    let config = match std::env::var("FIT_CONFIG") {
        Ok(path) => FitConfig::from_json_file(&path)?,
        Err(_) => {
            let config = FitConfig::from_env();
            config.validate()?;
            config
        }
    };

    let strategy_name = std::env::var("FIT_STRATEGY").unwrap_or_else(|_| "label".to_string());
    let Some(strategy) = StrategyKind::from_name(&strategy_name) else {
        bail!("Unknown FIT_STRATEGY '{}': expected 'label' or 'averaged'", strategy_name);
    };

    tracing::info!("Configuration:");
    tracing::info!("  FIT_STRATEGY: {:?}", strategy);
    tracing::info!("  tolerance: {:?}", config.tolerance);
    tracing::info!("  shoe_tolerance: {:?}", config.shoe_tolerance);

    let user = read_record(&args[1])?;
    let garment = read_record(&args[2])?;
    let calculator = FitCalculator::new(config);

    let output = match strategy {
        StrategyKind::LabelCount => {
            let result = calculator.calculate_fit(&user, &garment, &args[3])?;
            for comp in &result.measurements {
                tracing::info!("  {} [{}]", comp.format_with_context(), comp.fit.display_text());
            }
            if let Some(adjustment) = result.explanation.size_adjustment {
                tracing::info!("Suggestion: {}", adjustment.display_text());
            }
            tracing::info!("{}", result.description);
            serde_json::to_string_pretty(&result)?
        }
        StrategyKind::AveragedBand => {
            let analysis = calculator.analyze_fit(&user, &garment, &args[3])?;
            for detail in &analysis.details {
                tracing::info!(
                    "  {}: {:+.1} [{}]",
                    detail.dimension,
                    detail.difference,
                    detail.status.display_text()
                );
            }
            tracing::info!(
                "{} (mean difference {:.2})",
                analysis.overall.fit_level.display_text(),
                analysis.overall.avg_difference
            );
            serde_json::to_string_pretty(&analysis)?
        }
    };

    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_with_empty_argv() {
        assert_eq!(usage(&[]), "Usage: fit_check <user.json> <garment.json> <archetype>");
        assert_eq!(
            usage(&["/usr/bin/fc".to_string()]),
            "Usage: /usr/bin/fc <user.json> <garment.json> <archetype>"
        );
    }
}

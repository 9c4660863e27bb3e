//! Simulate command implementation
//!
//! Runs the configured portfolio through the chosen sampler and reports
//! per-risk and portfolio statistics.

use serde::Serialize;
use std::str::FromStr;
use tracing::info;

use qra_core::math::statistics::{mean, percentile};
use qra_risk::analysis::{
    tornado_variations, MariqAnalysis, TornadoAttribute, TornadoBar, ToleranceBreach,
    TotalRiskProfile,
};
use qra_simulation::mc::{run_simulation, SimulationMethod};

use crate::config::QraConfig;
use crate::{CliError, Result};

/// Output formats of the simulate command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: table, json",
                other
            ))),
        }
    }
}

/// Summary of one risk
#[derive(Debug, Clone, Serialize)]
pub struct RiskRow {
    pub id: String,
    pub name: String,
    pub mean_occurrences: f64,
    pub mean_total: f64,
    pub p95_total: f64,
    pub expected_loss: f64,
}

/// Portfolio loss statistics
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioRow {
    pub mean: f64,
    pub p95: f64,
    pub p99: f64,
}

/// Everything the simulate command reports
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub method: SimulationMethod,
    pub seed: u64,
    pub iterations: usize,
    pub risks: Vec<RiskRow>,
    pub portfolio: PortfolioRow,
    pub tornado: Vec<TornadoBar>,
    pub total_risk: TotalRiskProfile,
    pub tolerance_breaches: Vec<ToleranceBreach>,
}

/// Simulate the configured portfolio and collect the report
pub fn build_report(config: &QraConfig, buckets: usize) -> Result<SimulationReport> {
    let portfolio = config.portfolio()?;
    if portfolio.is_empty() {
        return Err(CliError::InvalidArgument(
            "No risks configured; add [[risks]] tables to the configuration".to_string(),
        ));
    }
    let sim_config = config.simulation_config()?;
    let tolerance = config.risk_tolerance()?;

    let result = run_simulation(config.simulation.method, &portfolio, sim_config)?;

    let mut mariq = MariqAnalysis::new(&result);
    if let Some(tolerance) = tolerance {
        mariq = mariq.with_tolerance(tolerance);
    }

    let risks = portfolio
        .iter()
        .zip(&result.results)
        .zip(mariq.metrics())
        .map(|((risk, outcome), metrics)| RiskRow {
            id: outcome.id.to_string(),
            name: risk.name().to_string(),
            mean_occurrences: outcome.mean_occurrences(),
            mean_total: outcome.mean_total(),
            p95_total: percentile(&outcome.total, 95.0).unwrap_or(0.0),
            expected_loss: metrics.mean_expected_loss,
        })
        .collect();

    let total = mariq.total_risk();
    let portfolio_row = PortfolioRow {
        mean: mean(total),
        p95: percentile(total, 95.0).unwrap_or(0.0),
        p99: percentile(total, 99.0).unwrap_or(0.0),
    };

    Ok(SimulationReport {
        method: result.summary.method,
        seed: result.summary.seed,
        iterations: result.n_iterations(),
        risks,
        portfolio: portfolio_row,
        tornado: tornado_variations(&result, TornadoAttribute::Total)?,
        total_risk: mariq.total_risk_profile(buckets)?,
        tolerance_breaches: mariq.tolerance_breaches(),
    })
}

/// Run the simulate command
pub fn run(config: &QraConfig, format: OutputFormat, buckets: usize) -> Result<()> {
    info!("Starting simulation...");
    info!("  Method: {}", config.simulation.method);
    info!("  Iterations: {}", config.simulation.iterations);
    info!("  Risks: {}", config.risks.len());

    let report = build_report(config, buckets)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_table(&report),
    }

    info!("Simulation complete");
    Ok(())
}

fn print_table(report: &SimulationReport) {
    println!();
    println!(
        "{} | {} years | seed {}",
        report.method.name(),
        report.iterations,
        report.seed
    );
    println!();
    println!(
        "{:<12} {:<28} {:>10} {:>14} {:>14} {:>14}",
        "Risk", "Name", "Events/yr", "Mean loss", "P95 loss", "Exp. loss"
    );
    println!("{}", "-".repeat(97));
    for row in &report.risks {
        println!(
            "{:<12} {:<28} {:>10.3} {:>14.2} {:>14.2} {:>14.2}",
            row.id, row.name, row.mean_occurrences, row.mean_total, row.p95_total, row.expected_loss
        );
    }
    println!("{}", "-".repeat(97));
    println!(
        "Portfolio: mean {:.2} | P95 {:.2} | P99 {:.2}",
        report.portfolio.mean, report.portfolio.p95, report.portfolio.p99
    );

    println!();
    println!("Tornado (annual total, widest last):");
    for bar in &report.tornado {
        println!(
            "  {:<12} {:>14.2} {:>+14.2} {:>+14.2}",
            bar.id.as_str(),
            bar.mean,
            bar.negative,
            bar.positive
        );
    }

    if !report.tolerance_breaches.is_empty() {
        println!();
        println!("Tolerance breaches:");
        for breach in &report.tolerance_breaches {
            println!(
                "  loss >= {:.2}: simulated {:.2}% > tolerated {:.2}%",
                breach.loss,
                breach.simulated * 100.0,
                breach.tolerated * 100.0
            );
        }
    }
}

//! Check command implementation
//!
//! Validates configuration and risk definitions and lists the portfolio.

use tracing::info;

use crate::config::QraConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &QraConfig) -> Result<()> {
    info!("Checking configuration...");
    config.validate()?;
    let sim = config.simulation_config()?;
    let portfolio = config.portfolio()?;

    println!("Configuration OK");
    println!("  Method:          {}", config.simulation.method.name());
    println!("  Iterations:      {}", sim.n_iterations());
    match sim.seed() {
        Some(seed) => println!("  Seed:            {}", seed),
        None => println!("  Seed:            (random)"),
    }
    println!("  Max parallelism: {}", sim.max_parallelism());
    println!("  Burn-in:         {}", sim.burn_in());
    if let Some(tolerance) = config.risk_tolerance()? {
        println!("  Tolerance:       {} points", tolerance.len());
    }
    if config.simulation.method != qra_simulation::mc::SimulationMethod::StandardMonteCarlo
        && !sim.n_iterations().is_power_of_two()
    {
        println!("  Note: Sobol balance is best with a power-of-two iteration count");
    }

    println!();
    println!("{:<12} {:<28} {:<12} {:<12}", "Risk", "Name", "Frequency", "Impact");
    println!("{}", "-".repeat(66));
    for risk in portfolio.iter() {
        println!(
            "{:<12} {:<28} {:<12} {:<12}",
            risk.id().as_str(),
            risk.name(),
            risk.frequency_kind().name(),
            risk.impact_kind().name()
        );
    }
    println!("{} risk(s)", portfolio.len());

    info!("Check complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    #[test]
    fn test_check_valid_config() {
        let config = QraConfig::from_toml(
            r#"
            [[risks]]
            id = "R1"
            frequency = { distribution = "Uniform", parameters = { low = 1.0, high = 2.0 } }
            impact = { distribution = "PERT", parameters = { low = 1.0, mode = 2.0, high = 3.0 } }
            "#,
        )
        .unwrap();
        assert!(run(&config).is_ok());
    }

    #[test]
    fn test_check_reports_bad_definition() {
        let config = QraConfig::from_toml(
            r#"
            [[risks]]
            id = "R1"
            frequency = { distribution = "Uniform", parameters = { low = 3.0, high = 2.0 } }
            impact = { distribution = "Weibull", parameters = { shape = 1.0 } }
            "#,
        )
        .unwrap();
        assert!(matches!(run(&config), Err(CliError::Portfolio(_))));
    }
}

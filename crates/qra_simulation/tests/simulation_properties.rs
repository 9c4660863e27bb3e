//! Properties every simulator must satisfy.
//!
//! # Test Categories
//!
//! 1. **Shape**: array lengths and the occurrence/impact bookkeeping
//! 2. **Aggregation**: per-year totals with controlled occurrence counts
//! 3. **Reproducibility**: seeds, parallelism and portfolio order
//! 4. **Convergence**: the three methods agree on the expected loss
//! 5. **Failure propagation**: distribution and rate errors abort the call

use approx::assert_relative_eq;
use qra_core::traits::SampleDistribution;
use qra_core::types::DistributionError;
use qra_models::distributions::DistributionModel;
use qra_models::risk::{Portfolio, Risk};
use qra_simulation::mc::{
    run_simulation, OccurrenceModel, QuasiRandomSampling, RandomizedQuasiRandomSampling,
    SamplingError, SimulationConfig, SimulationError, SimulationMethod, Simulator,
    StandardSampling,
};
use rand::Rng;

/// Degenerate distribution returning `c` for every draw.
#[derive(Clone, Copy, Debug)]
struct Constant(f64);

impl SampleDistribution for Constant {
    fn sample<R: Rng + ?Sized>(&self, _rng: &mut R) -> f64 {
        self.0
    }
    fn quantile(&self, _q: f64) -> f64 {
        self.0
    }
    fn mean(&self) -> f64 {
        self.0
    }
}

/// Distribution whose inverse CDF always fails.
#[derive(Clone, Copy, Debug)]
struct BrokenInverse;

impl SampleDistribution for BrokenInverse {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen()
    }
    fn quantile(&self, q: f64) -> f64 {
        q
    }
    fn mean(&self) -> f64 {
        0.5
    }
    fn draw_ppf_into(&self, q: &[f64], _out: &mut Vec<f64>) -> Result<(), DistributionError> {
        Err(DistributionError::QuantileOutOfRange {
            index: 0,
            value: q.first().copied().unwrap_or(f64::NAN),
        })
    }
}

/// Every year has exactly `k` occurrences.
#[derive(Clone, Copy, Debug)]
struct FixedOccurrences(u64);

impl OccurrenceModel for FixedOccurrences {
    fn count<R: Rng + ?Sized>(&self, _rate: f64, _rng: &mut R) -> Result<u64, SamplingError> {
        Ok(self.0)
    }
}

fn config(n: usize, seed: u64) -> SimulationConfig {
    SimulationConfig::builder()
        .n_iterations(n)
        .seed(seed)
        .build()
        .unwrap()
}

fn mixed_portfolio() -> Portfolio {
    Portfolio::new(vec![
        Risk::new(
            "R1",
            "Data centre outage",
            DistributionModel::uniform(1.0, 3.0).unwrap(),
            DistributionModel::pert(10.0, 20.0, 40.0).unwrap(),
        ),
        Risk::new(
            "R2",
            "Regulatory fine",
            DistributionModel::beta(2.0, 18.0).unwrap(),
            DistributionModel::lognormal(1e4, 1e6).unwrap(),
        ),
        Risk::new(
            "R3",
            "Key staff loss",
            DistributionModel::lognormal(0.05, 0.5).unwrap(),
            DistributionModel::uniform(5e3, 5e4).unwrap(),
        ),
    ])
    .unwrap()
}

// ============================================================================
// Shape
// ============================================================================

#[test]
fn test_lengths_and_offsets_for_every_method() {
    for method in SimulationMethod::all() {
        for n in [1, 7, 256] {
            let result = run_simulation(method, &mixed_portfolio(), config(n, 11)).unwrap();
            assert_eq!(result.results.len(), 3);
            for outcome in &result.results {
                assert_eq!(outcome.frequency.len(), n);
                assert_eq!(outcome.occurrences.len(), n);
                assert_eq!(outcome.single_risk_impact.len(), n);
                assert_eq!(outcome.total.len(), n);
                assert_eq!(
                    outcome.occurrences.iter().sum::<u64>() as usize,
                    outcome.impact.len()
                );
                for ((_, impacts), &total) in outcome.years().zip(&outcome.total) {
                    assert_relative_eq!(impacts.iter().sum::<f64>(), total, max_relative = 1e-12);
                }
            }
        }
    }
}

#[test]
fn test_single_year_without_occurrences() {
    let portfolio = Portfolio::new(vec![Risk::new("Z", "Dormant", Constant(0.0), Constant(5.0))])
        .unwrap();
    for method in SimulationMethod::all() {
        let result = run_simulation(method, &portfolio, config(1, 3)).unwrap();
        let outcome = &result.results[0];
        assert_eq!(outcome.occurrences, vec![0]);
        assert!(outcome.impact.is_empty());
        assert_eq!(outcome.total, vec![0.0]);
        assert_eq!(outcome.single_risk_impact, vec![5.0]);
    }
}

#[test]
fn test_single_risk_impact_independent_of_occurrences() {
    let portfolio =
        Portfolio::new(vec![Risk::new("S", "Stub", Constant(1.0), Constant(2.0))]).unwrap();
    for k in [0, 1, 9] {
        let result = Simulator::new(config(64, 1), QuasiRandomSampling, FixedOccurrences(k))
            .simulation(&portfolio)
            .unwrap();
        assert_eq!(result.results[0].single_risk_impact.len(), 64);
        assert_eq!(result.results[0].impact.len(), 64 * k as usize);
    }
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn test_constant_occurrences_give_exact_totals() {
    let portfolio =
        Portfolio::new(vec![Risk::new("C", "Stub", Constant(1.0), Constant(100.0))]).unwrap();
    let k = 3;

    let standard = Simulator::new(config(50, 2), StandardSampling, FixedOccurrences(k));
    let quasi = Simulator::new(config(50, 2), QuasiRandomSampling, FixedOccurrences(k));
    let randomized = Simulator::new(config(50, 2), RandomizedQuasiRandomSampling, FixedOccurrences(k));

    for result in [
        standard.simulation(&portfolio).unwrap(),
        quasi.simulation(&portfolio).unwrap(),
        randomized.simulation(&portfolio).unwrap(),
    ] {
        let outcome = &result.results[0];
        assert_eq!(outcome.occurrences, vec![k; 50]);
        assert_eq!(outcome.impact.len(), 150);
        assert!(outcome.total.iter().all(|&t| t == 300.0));
    }
}

#[test]
fn test_portfolio_total_sums_risks() {
    let result = run_simulation(
        SimulationMethod::StandardMonteCarlo,
        &mixed_portfolio(),
        config(100, 8),
    )
    .unwrap();
    let portfolio_total = result.portfolio_total();
    for (year, &total) in portfolio_total.iter().enumerate() {
        let expected: f64 = result.results.iter().map(|r| r.total[year]).sum();
        assert_relative_eq!(total, expected, max_relative = 1e-12);
    }
}

// ============================================================================
// Reproducibility
// ============================================================================

#[test]
fn test_fixed_seed_is_deterministic() {
    for method in SimulationMethod::all() {
        let a = run_simulation(method, &mixed_portfolio(), config(128, 21)).unwrap();
        let b = run_simulation(method, &mixed_portfolio(), config(128, 21)).unwrap();
        assert_eq!(a, b, "{method} is not reproducible");
    }
}

#[test]
fn test_randomized_quasi_varies_with_seed() {
    let a = run_simulation(
        SimulationMethod::RandomizedQuasiMonteCarlo,
        &mixed_portfolio(),
        config(64, 1),
    )
    .unwrap();
    let b = run_simulation(
        SimulationMethod::RandomizedQuasiMonteCarlo,
        &mixed_portfolio(),
        config(64, 2),
    )
    .unwrap();
    assert_ne!(a.results[0].frequency, b.results[0].frequency);
}

#[test]
fn test_results_follow_portfolio_order() {
    let risks: Vec<Risk<Constant>> = (0..24)
        .map(|i| {
            Risk::new(
                format!("R{:02}", i),
                format!("Risk {}", i),
                Constant(1.0),
                Constant(i as f64),
            )
        })
        .collect();
    let portfolio = Portfolio::new(risks).unwrap();
    let config = SimulationConfig::builder()
        .n_iterations(8)
        .seed(4)
        .max_parallelism(4)
        .build()
        .unwrap();

    let result = Simulator::new(config, StandardSampling, FixedOccurrences(1))
        .simulation(&portfolio)
        .unwrap();
    assert_eq!(result.summary.risk_ids, portfolio.ids());
    for (i, outcome) in result.results.iter().enumerate() {
        assert_eq!(outcome.id.as_str(), format!("R{:02}", i));
        assert!(outcome.total.iter().all(|&t| t == i as f64));
    }
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_methods_agree_on_expected_loss() {
    // E[total] = E[rate] * E[impact] = 2 * (10 + 80 + 40) / 6
    let expected = 2.0 * 130.0 / 6.0;
    let portfolio = Portfolio::new(vec![Risk::new(
        "R1",
        "Outage",
        DistributionModel::uniform(1.0, 3.0).unwrap(),
        DistributionModel::pert(10.0, 20.0, 40.0).unwrap(),
    )])
    .unwrap();

    for method in SimulationMethod::all() {
        let result = run_simulation(method, &portfolio, config(16_384, 99)).unwrap();
        let mean = result.results[0].mean_total();
        assert_relative_eq!(mean, expected, max_relative = 0.05);
    }
}

#[test]
fn test_randomized_quasi_means_agree_across_seeds() {
    let portfolio = Portfolio::new(vec![Risk::new(
        "R1",
        "Outage",
        DistributionModel::uniform(1.0, 3.0).unwrap(),
        DistributionModel::pert(10.0, 20.0, 40.0).unwrap(),
    )])
    .unwrap();
    let means: Vec<f64> = [1, 2, 3]
        .into_iter()
        .map(|seed| {
            run_simulation(
                SimulationMethod::RandomizedQuasiMonteCarlo,
                &portfolio,
                config(16_384, seed),
            )
            .unwrap()
            .results[0]
                .mean_total()
        })
        .collect();
    assert_relative_eq!(means[0], means[1], max_relative = 0.05);
    assert_relative_eq!(means[1], means[2], max_relative = 0.05);
}

#[test]
fn test_quasi_frequency_mean_is_tight() {
    let portfolio = Portfolio::new(vec![Risk::new(
        "R1",
        "Outage",
        DistributionModel::uniform(1.0, 3.0).unwrap(),
        DistributionModel::uniform(1.0, 2.0).unwrap(),
    )])
    .unwrap();
    let result = run_simulation(SimulationMethod::QuasiMonteCarlo, &portfolio, config(1024, 5))
        .unwrap();
    let frequency = &result.results[0].frequency;
    let mean = frequency.iter().sum::<f64>() / frequency.len() as f64;
    assert_relative_eq!(mean, 2.0, max_relative = 0.01);
}

// ============================================================================
// Failure propagation
// ============================================================================

#[test]
fn test_inverse_cdf_failure_aborts_quasi_runs() {
    let portfolio =
        Portfolio::new(vec![Risk::new("BAD", "broken", BrokenInverse, BrokenInverse)]).unwrap();
    for method in [
        SimulationMethod::QuasiMonteCarlo,
        SimulationMethod::RandomizedQuasiMonteCarlo,
    ] {
        let err = run_simulation(method, &portfolio, config(16, 1)).unwrap_err();
        match err {
            SimulationError::Sampling { risk_id, source } => {
                assert_eq!(risk_id.as_str(), "BAD");
                assert!(matches!(source, SamplingError::Distribution(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    // Direct draws never reach the inverse CDF.
    assert!(run_simulation(SimulationMethod::StandardMonteCarlo, &portfolio, config(16, 1)).is_ok());
}

#[test]
fn test_negative_rate_is_rejected() {
    let portfolio =
        Portfolio::new(vec![Risk::new("NEG", "stub", Constant(-1.0), Constant(1.0))]).unwrap();
    let err = run_simulation(SimulationMethod::StandardMonteCarlo, &portfolio, config(4, 1))
        .unwrap_err();
    assert!(matches!(
        err,
        SimulationError::InvalidRate { year: 0, rate, .. } if rate == -1.0
    ));
    assert_eq!(err.risk_id().map(|id| id.as_str()), Some("NEG"));
}

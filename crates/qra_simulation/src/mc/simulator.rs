//! Portfolio simulators.

use std::time::Instant;

use qra_core::traits::SampleDistribution;
use qra_core::types::RiskId;
use qra_models::risk::{Portfolio, Risk};
use tracing::{debug, info};

use super::aggregation::{occurrence_sum, partition_totals};
use super::config::SimulationConfig;
use super::error::{SamplingError, SimulationError};
use super::method::SimulationMethod;
use super::occurrence::{OccurrenceModel, PoissonOccurrences};
use super::parallel::{build_pool, try_map_ordered};
use super::result::{RiskOutcome, SimulationResult, SimulationSummary};
use super::sampler::{
    QuasiRandomSampling, RandomizedQuasiRandomSampling, RiskSampler, SampleStream,
    SamplingStrategy, StandardSampling,
};
use crate::rng::derive_stream_seed;

/// Standard Monte Carlo simulator.
pub type StandardMonteCarlo = Simulator<StandardSampling>;

/// Quasi-Monte Carlo simulator.
pub type QuasiMonteCarlo = Simulator<QuasiRandomSampling>;

/// Randomised quasi-Monte Carlo simulator.
pub type RandomizedQuasiMonteCarlo = Simulator<RandomizedQuasiRandomSampling>;

/// Annual loss simulator.
///
/// For every risk of a portfolio and every simulated year:
/// 1. draw an occurrence rate from the frequency distribution,
/// 2. draw an occurrence count from the [`OccurrenceModel`],
/// 3. draw one impact per occurrence and sum them into the year's total,
/// 4. draw one single-risk impact, whatever the count.
///
/// Risks run in parallel, each from its own seed derived from the call's
/// base seed and the risk's position.
///
/// # Examples
///
/// ```
/// use qra_models::distributions::DistributionModel;
/// use qra_models::risk::{Portfolio, Risk};
/// use qra_simulation::mc::{SimulationConfig, StandardMonteCarlo};
///
/// let portfolio = Portfolio::new(vec![Risk::new(
///     "R1",
///     "Fraud",
///     DistributionModel::beta(2.0, 8.0).unwrap(),
///     DistributionModel::lognormal(1e3, 1e5).unwrap(),
/// )])
/// .unwrap();
/// let config = SimulationConfig::builder().n_iterations(500).seed(1).build().unwrap();
///
/// let result = StandardMonteCarlo::standard(config).simulation(&portfolio).unwrap();
/// assert_eq!(result.summary.number_of_iterations, 500);
/// assert_eq!(result.summary.seed, 1);
/// ```
#[derive(Clone, Debug)]
pub struct Simulator<S, O = PoissonOccurrences> {
    config: SimulationConfig,
    strategy: S,
    occurrences: O,
}

impl Simulator<StandardSampling> {
    /// Standard Monte Carlo with Poisson occurrences.
    pub fn standard(config: SimulationConfig) -> Self {
        Self::new(config, StandardSampling, PoissonOccurrences)
    }
}

impl Simulator<QuasiRandomSampling> {
    /// Quasi-Monte Carlo with Poisson occurrences.
    pub fn quasi(config: SimulationConfig) -> Self {
        Self::new(config, QuasiRandomSampling, PoissonOccurrences)
    }
}

impl Simulator<RandomizedQuasiRandomSampling> {
    /// Randomised quasi-Monte Carlo with Poisson occurrences.
    pub fn randomized_quasi(config: SimulationConfig) -> Self {
        Self::new(config, RandomizedQuasiRandomSampling, PoissonOccurrences)
    }
}

impl<S, O> Simulator<S, O>
where
    S: SamplingStrategy,
    O: OccurrenceModel,
{
    /// Simulator from explicit parts.
    pub fn new(config: SimulationConfig, strategy: S, occurrences: O) -> Self {
        Self {
            config,
            strategy,
            occurrences,
        }
    }

    /// Replaces the occurrence model.
    pub fn with_occurrence_model<P: OccurrenceModel>(self, occurrences: P) -> Simulator<S, P> {
        Simulator {
            config: self.config,
            strategy: self.strategy,
            occurrences,
        }
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Sampling method.
    #[inline]
    pub fn method(&self) -> SimulationMethod {
        self.strategy.method()
    }

    /// Simulates every risk of `portfolio` for the configured number of
    /// years.
    ///
    /// # Errors
    ///
    /// The first failing risk aborts the call; see [`SimulationError`].
    pub fn simulation<D: SampleDistribution>(
        &self,
        portfolio: &Portfolio<D>,
    ) -> Result<SimulationResult, SimulationError> {
        self.config.validate()?;
        self.strategy.prepare(&self.config);

        let n = self.config.n_iterations();
        let base_seed = self.config.seed().unwrap_or_else(rand::random);
        let start = Instant::now();
        info!(
            method = %self.method(),
            n_iterations = n,
            n_risks = portfolio.len(),
            seed = base_seed,
            "Starting simulation"
        );

        let pool = build_pool(self.config.max_parallelism())?;
        let results = try_map_ordered(&pool, portfolio.risks(), |index, risk| {
            self.simulate_risk(risk, derive_stream_seed(base_seed, index))
        })?;

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Simulation complete"
        );

        Ok(SimulationResult {
            summary: SimulationSummary {
                number_of_iterations: n,
                method: self.method(),
                seed: base_seed,
                risk_ids: portfolio.ids(),
            },
            results,
        })
    }

    /// Simulates one risk from its stream seed.
    pub fn simulate_risk<D: SampleDistribution>(
        &self,
        risk: &Risk<D>,
        seed: u64,
    ) -> Result<RiskOutcome, SimulationError> {
        let n = self.config.n_iterations();
        let id = risk.id();
        let sampling = |source: SamplingError| SimulationError::Sampling {
            risk_id: id.clone(),
            source,
        };

        let mut sampler = self.strategy.sampler(seed, &self.config).map_err(sampling)?;

        let mut frequency = reserve(n).map_err(sampling)?;
        sampler
            .draw_into(SampleStream::Frequency, risk.frequency(), n, &mut frequency)
            .map_err(sampling)?;

        let mut occurrences = Vec::with_capacity(n);
        for (year, &rate) in frequency.iter().enumerate() {
            if !rate.is_finite() || rate < 0.0 {
                return Err(SimulationError::InvalidRate {
                    risk_id: id.clone(),
                    year,
                    rate,
                });
            }
            let count = self
                .occurrences
                .count(rate, sampler.rng())
                .map_err(sampling)?;
            occurrences.push(count);
        }

        let k = occurrence_sum(&occurrences).ok_or_else(|| impact_allocation(id, &occurrences))?;
        let mut impact = Vec::new();
        impact
            .try_reserve_exact(k)
            .map_err(|_| impact_allocation(id, &occurrences))?;
        sampler
            .draw_into(SampleStream::Impact, risk.impact(), k, &mut impact)
            .map_err(sampling)?;

        let mut single_risk_impact = reserve(n).map_err(sampling)?;
        sampler
            .draw_into(
                SampleStream::SingleRiskImpact,
                risk.impact(),
                n,
                &mut single_risk_impact,
            )
            .map_err(sampling)?;

        let total = year_totals(id, &impact, &occurrences)?;

        debug!(risk = %id, seed, occurrences = k, "Risk simulated");

        Ok(RiskOutcome {
            id: id.clone(),
            frequency,
            occurrences,
            impact,
            single_risk_impact,
            total,
        })
    }
}

/// Runs `portfolio` with the simulator selected by `method`.
///
/// # Examples
///
/// ```
/// use qra_models::distributions::DistributionModel;
/// use qra_models::risk::{Portfolio, Risk};
/// use qra_simulation::mc::{run_simulation, SimulationConfig, SimulationMethod};
///
/// let portfolio = Portfolio::new(vec![Risk::new(
///     "R1",
///     "Outage",
///     DistributionModel::uniform(0.5, 1.5).unwrap(),
///     DistributionModel::uniform(10.0, 20.0).unwrap(),
/// )])
/// .unwrap();
/// let config = SimulationConfig::with_iterations(256).unwrap();
///
/// let result = run_simulation(SimulationMethod::RandomizedQuasiMonteCarlo, &portfolio, config).unwrap();
/// assert_eq!(result.summary.method, SimulationMethod::RandomizedQuasiMonteCarlo);
/// ```
pub fn run_simulation<D: SampleDistribution>(
    method: SimulationMethod,
    portfolio: &Portfolio<D>,
    config: SimulationConfig,
) -> Result<SimulationResult, SimulationError> {
    match method {
        SimulationMethod::StandardMonteCarlo => {
            StandardMonteCarlo::standard(config).simulation(portfolio)
        }
        SimulationMethod::QuasiMonteCarlo => QuasiMonteCarlo::quasi(config).simulation(portfolio),
        SimulationMethod::RandomizedQuasiMonteCarlo => {
            RandomizedQuasiMonteCarlo::randomized_quasi(config).simulation(portfolio)
        }
    }
}

fn reserve(n: usize) -> Result<Vec<f64>, SamplingError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(n)
        .map_err(|_| SamplingError::Allocation { requested: n })?;
    Ok(buffer)
}

fn impact_allocation(id: &RiskId, occurrences: &[u64]) -> SimulationError {
    SimulationError::ImpactBufferAllocation {
        risk_id: id.clone(),
        occurrences: total_occurrences(occurrences),
    }
}

/// Per-year loss totals for one risk.
fn year_totals(
    id: &RiskId,
    impact: &[f64],
    occurrences: &[u64],
) -> Result<Vec<f64>, SimulationError> {
    partition_totals(impact, occurrences).ok_or_else(|| SimulationError::PartitionMismatch {
        risk_id: id.clone(),
        impacts: impact.len(),
        occurrences: total_occurrences(occurrences),
    })
}

fn total_occurrences(occurrences: &[u64]) -> u128 {
    occurrences.iter().map(|&k| k as u128).sum()
}

//! Sampling strategies.
//!
//! A [`SamplingStrategy`] is shared by all workers of a simulation call and
//! creates one [`RiskSampler`] per risk. The sampler owns that risk's random
//! state: a seeded [`SimulationRng`] and, for the quasi-random strategies, a
//! three-dimensional [`SobolSequence`].
//!
//! ```text
//! SamplingStrategy                 RiskSampler
//! ├── StandardSampling         ->  PseudoRandomSampler   (direct draws)
//! ├── QuasiRandomSampling      ->  QuasiRandomSampler    (Sobol, shuffled)
//! └── RandomizedQuasiRandom... ->  QuasiRandomSampler    (scrambled Sobol)
//! ```

use qra_core::traits::SampleDistribution;
use tracing::warn;

use super::config::SimulationConfig;
use super::error::SamplingError;
use super::method::SimulationMethod;
use crate::rng::{SimulationRng, SobolSequence};

/// Which quantity of the year is being drawn.
///
/// Each stream reads its own Sobol coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SampleStream {
    /// Annual occurrence rates.
    Frequency,
    /// One impact per occurrence.
    Impact,
    /// One representative impact per year.
    SingleRiskImpact,
}

impl SampleStream {
    /// Number of streams, and so the Sobol dimension.
    pub const COUNT: usize = 3;

    /// Sobol coordinate read by this stream.
    #[inline]
    pub fn coordinate(self) -> usize {
        match self {
            SampleStream::Frequency => 0,
            SampleStream::Impact => 1,
            SampleStream::SingleRiskImpact => 2,
        }
    }
}

/// Per-risk source of samples.
pub trait RiskSampler {
    /// Appends `n` draws from `distribution` to `out`.
    ///
    /// A draw of zero values is a no-op and consumes no randomness.
    fn draw_into<D: SampleDistribution>(
        &mut self,
        stream: SampleStream,
        distribution: &D,
        n: usize,
        out: &mut Vec<f64>,
    ) -> Result<(), SamplingError>;

    /// Pseudo-random generator for the occurrence step.
    fn rng(&mut self) -> &mut SimulationRng;
}

/// Factory of per-risk samplers.
pub trait SamplingStrategy: Send + Sync {
    /// Sampler type created for each risk.
    type Sampler: RiskSampler;

    /// Method implemented by this strategy.
    fn method(&self) -> SimulationMethod;

    /// Creates the sampler for one risk from its stream seed.
    fn sampler(&self, seed: u64, config: &SimulationConfig) -> Result<Self::Sampler, SamplingError>;

    /// Called once per simulation call before any risk is sampled.
    fn prepare(&self, _config: &SimulationConfig) {}
}

/// Direct draws from a seeded PRNG.
#[derive(Debug)]
pub struct PseudoRandomSampler {
    rng: SimulationRng,
}

impl PseudoRandomSampler {
    /// Creates a sampler seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SimulationRng::from_seed(seed),
        }
    }
}

impl RiskSampler for PseudoRandomSampler {
    fn draw_into<D: SampleDistribution>(
        &mut self,
        _stream: SampleStream,
        distribution: &D,
        n: usize,
        out: &mut Vec<f64>,
    ) -> Result<(), SamplingError> {
        if n == 0 {
            return Ok(());
        }
        distribution.draw_into(n, &mut self.rng, out)?;
        Ok(())
    }

    #[inline]
    fn rng(&mut self) -> &mut SimulationRng {
        &mut self.rng
    }
}

/// Inverse-CDF draws at Sobol points.
///
/// Each draw consumes the next `n` points of the sequence and keeps the
/// stream's coordinate, so the three streams of one risk read disjoint,
/// consecutive blocks of the same sequence.
#[derive(Debug)]
pub struct QuasiRandomSampler {
    sequence: SobolSequence,
    rng: SimulationRng,
    shuffle: bool,
    quantiles: Vec<f64>,
}

impl QuasiRandomSampler {
    /// Creates a sampler over `sequence`. With `shuffle`, every drawn block
    /// of quantiles is permuted with `rng` before inversion.
    pub fn new(sequence: SobolSequence, rng: SimulationRng, shuffle: bool) -> Self {
        Self {
            sequence,
            rng,
            shuffle,
            quantiles: Vec::new(),
        }
    }

    /// The underlying sequence.
    pub fn sequence(&self) -> &SobolSequence {
        &self.sequence
    }
}

impl RiskSampler for QuasiRandomSampler {
    fn draw_into<D: SampleDistribution>(
        &mut self,
        stream: SampleStream,
        distribution: &D,
        n: usize,
        out: &mut Vec<f64>,
    ) -> Result<(), SamplingError> {
        if n == 0 {
            return Ok(());
        }
        self.quantiles.clear();
        self.quantiles
            .try_reserve_exact(n)
            .map_err(|_| SamplingError::Allocation { requested: n })?;
        self.sequence
            .fill_coordinate(stream.coordinate(), n, &mut self.quantiles)?;
        if self.shuffle {
            self.rng.shuffle(&mut self.quantiles);
        }
        distribution.draw_ppf_into(&self.quantiles, out)?;
        Ok(())
    }

    #[inline]
    fn rng(&mut self) -> &mut SimulationRng {
        &mut self.rng
    }
}

/// Standard Monte Carlo strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardSampling;

impl SamplingStrategy for StandardSampling {
    type Sampler = PseudoRandomSampler;

    fn method(&self) -> SimulationMethod {
        SimulationMethod::StandardMonteCarlo
    }

    fn sampler(&self, seed: u64, _config: &SimulationConfig) -> Result<Self::Sampler, SamplingError> {
        Ok(PseudoRandomSampler::new(seed))
    }
}

/// Quasi-Monte Carlo strategy: unscrambled Sobol points, each block
/// shuffled to break the correlation between consecutive points.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuasiRandomSampling;

impl SamplingStrategy for QuasiRandomSampling {
    type Sampler = QuasiRandomSampler;

    fn method(&self) -> SimulationMethod {
        SimulationMethod::QuasiMonteCarlo
    }

    fn sampler(&self, seed: u64, config: &SimulationConfig) -> Result<Self::Sampler, SamplingError> {
        let mut sequence = SobolSequence::new(SampleStream::COUNT)?;
        sequence.fast_forward(config.burn_in())?;
        Ok(QuasiRandomSampler::new(
            sequence,
            SimulationRng::from_seed(seed),
            true,
        ))
    }

    fn prepare(&self, config: &SimulationConfig) {
        let n = config.n_iterations();
        if !n.is_power_of_two() {
            warn!(
                n_iterations = n,
                "Quasi-Monte Carlo iteration count is not a power of two; Sobol balance properties are lost"
            );
        }
    }
}

/// Randomised quasi-Monte Carlo strategy: scrambled Sobol points, no shuffle.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomizedQuasiRandomSampling;

impl SamplingStrategy for RandomizedQuasiRandomSampling {
    type Sampler = QuasiRandomSampler;

    fn method(&self) -> SimulationMethod {
        SimulationMethod::RandomizedQuasiMonteCarlo
    }

    fn sampler(&self, seed: u64, config: &SimulationConfig) -> Result<Self::Sampler, SamplingError> {
        let mut rng = SimulationRng::from_seed(seed);
        let mut sequence = SobolSequence::scrambled(SampleStream::COUNT, &mut rng)?;
        sequence.fast_forward(config.burn_in())?;
        Ok(QuasiRandomSampler::new(sequence, rng, false))
    }
}

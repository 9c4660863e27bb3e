//! Sobol low-discrepancy sequence.
//!
//! 32-bit generator using the Antonov-Saleev Gray-code ordering and
//! Joe-Kuo direction numbers. Point `n` is
//! `x_n = shift ^ XOR { v[b] : bit b of gray(n) is set }`, which allows
//! constant-time skipping; sequential generation flips a single direction
//! number per point.
//!
//! Scrambling applies a random lower-triangular binary matrix with unit
//! diagonal to every direction number (a linear matrix scramble) and a
//! random digital shift to the starting point. Both are invertible over
//! GF(2), so the scrambled sequence keeps its equidistribution properties.

use rand::Rng;
use thiserror::Error;

/// Highest supported dimension.
pub const MAX_DIMENSION: usize = 8;

/// Number of points a 32-bit sequence can produce.
pub const MAX_POINTS: u64 = u32::MAX as u64;

const BITS: usize = 32;
const SCALE: f64 = 4_294_967_296.0;

/// Joe-Kuo primitive polynomial data `(degree, coefficients, initial m)`
/// for dimensions 2 and above. Dimension 1 is the van der Corput sequence.
const JOE_KUO: [(u32, u32, &[u32]); MAX_DIMENSION - 1] = [
    (1, 0, &[1]),
    (2, 1, &[1, 3]),
    (3, 1, &[1, 3, 1]),
    (3, 2, &[1, 1, 1]),
    (4, 1, &[1, 1, 3, 3]),
    (4, 4, &[1, 3, 5, 13]),
    (5, 2, &[1, 1, 5, 5, 17]),
];

/// Errors raised by low-discrepancy sequences.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// Requested dimension is zero or above [`MAX_DIMENSION`].
    #[error("Invalid sequence dimension {requested}: must be in [1, {max}]")]
    InvalidDimension {
        /// Requested dimension.
        requested: usize,
        /// Supported maximum.
        max: usize,
    },

    /// The sequence cannot produce the requested number of points.
    #[error("Sequence exhausted: {requested} points requested, {remaining} remaining")]
    Exhausted {
        /// Points requested.
        requested: u64,
        /// Points left before exhaustion.
        remaining: u64,
    },

    /// Coordinate index outside the sequence's dimension.
    #[error("Coordinate {coordinate} out of range for dimension {dimension}")]
    InvalidCoordinate {
        /// Requested coordinate.
        coordinate: usize,
        /// Sequence dimension.
        dimension: usize,
    },
}

/// Trait for low-discrepancy sequences used in quasi-Monte Carlo methods.
pub trait LowDiscrepancySequence {
    /// Number of coordinates per point.
    fn dimension(&self) -> usize;

    /// Returns the next point, each coordinate in `[0, 1)`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::Exhausted`] once every point has been produced.
    fn next_point(&mut self) -> Result<&[f64], SequenceError>;

    /// Rewinds to the first point. Scrambling, if any, is kept.
    fn reset(&mut self);

    /// Skips `n` points.
    ///
    /// # Errors
    ///
    /// [`SequenceError::Exhausted`] if fewer than `n` points remain; the
    /// position is unchanged in that case.
    fn skip(&mut self, n: u64) -> Result<(), SequenceError>;
}

/// Sobol sequence generator.
///
/// # Examples
///
/// ```rust
/// use qra_simulation::rng::{LowDiscrepancySequence, SobolSequence};
///
/// let mut sobol = SobolSequence::new(2).unwrap();
/// sobol.skip(2).unwrap();
/// assert_eq!(sobol.next_point().unwrap(), &[0.75, 0.25]);
/// assert_eq!(sobol.next_point().unwrap(), &[0.25, 0.75]);
/// ```
#[derive(Clone, Debug)]
pub struct SobolSequence {
    direction: Vec<[u32; BITS]>,
    shift: Vec<u32>,
    state: Vec<u32>,
    point: Vec<f64>,
    index: u64,
    scrambled: bool,
}

impl SobolSequence {
    /// Unscrambled sequence of `dimension` coordinates, starting at the origin.
    pub fn new(dimension: usize) -> Result<Self, SequenceError> {
        if dimension == 0 || dimension > MAX_DIMENSION {
            return Err(SequenceError::InvalidDimension {
                requested: dimension,
                max: MAX_DIMENSION,
            });
        }
        let direction = (0..dimension).map(direction_numbers).collect();
        let shift = vec![0; dimension];
        Ok(Self {
            direction,
            state: shift.clone(),
            shift,
            point: vec![0.0; dimension],
            index: 0,
            scrambled: false,
        })
    }

    /// Scrambled sequence with matrix and shift drawn from `rng`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use qra_simulation::rng::{LowDiscrepancySequence, SimulationRng, SobolSequence};
    ///
    /// let mut rng = SimulationRng::from_seed(1);
    /// let mut sobol = SobolSequence::scrambled(3, &mut rng).unwrap();
    /// let first = sobol.next_point().unwrap().to_vec();
    /// assert!(first.iter().all(|x| (0.0..1.0).contains(x)));
    /// ```
    pub fn scrambled<R: Rng + ?Sized>(dimension: usize, rng: &mut R) -> Result<Self, SequenceError> {
        let mut sequence = Self::new(dimension)?;
        for (v, shift) in sequence.direction.iter_mut().zip(sequence.shift.iter_mut()) {
            let matrix = random_lower_triangular(rng);
            for value in v.iter_mut() {
                *value = apply_matrix(&matrix, *value);
            }
            *shift = rng.gen();
        }
        sequence.state.copy_from_slice(&sequence.shift);
        sequence.scrambled = true;
        Ok(sequence)
    }

    /// Whether the sequence was randomised.
    #[inline]
    pub fn is_scrambled(&self) -> bool {
        self.scrambled
    }

    /// Index of the next point to be produced.
    #[inline]
    pub fn position(&self) -> u64 {
        self.index
    }

    /// Points left before exhaustion.
    #[inline]
    pub fn remaining(&self) -> u64 {
        MAX_POINTS - self.index
    }

    /// Alias for [`LowDiscrepancySequence::skip`].
    pub fn fast_forward(&mut self, n: u64) -> Result<(), SequenceError> {
        self.skip(n)
    }

    /// Draws the next `n` points and appends coordinate `coordinate` of
    /// each to `out`.
    ///
    /// All coordinates advance together, so consecutive calls consume
    /// consecutive points whichever coordinate they keep. Nothing is
    /// consumed or appended on error.
    pub fn fill_coordinate(
        &mut self,
        coordinate: usize,
        n: usize,
        out: &mut Vec<f64>,
    ) -> Result<(), SequenceError> {
        let dimension = self.dimension();
        if coordinate >= dimension {
            return Err(SequenceError::InvalidCoordinate {
                coordinate,
                dimension,
            });
        }
        self.ensure_available(n as u64)?;
        out.extend((0..n).map(|_| {
            let value = to_unit(self.state[coordinate]);
            self.advance();
            value
        }));
        Ok(())
    }

    fn ensure_available(&self, requested: u64) -> Result<(), SequenceError> {
        if requested > self.remaining() {
            return Err(SequenceError::Exhausted {
                requested,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Moves `state` from point `index` to point `index + 1`.
    #[inline]
    fn advance(&mut self) {
        // index < MAX_POINTS here, so at most 31 trailing ones
        let bit = (self.index as u32).trailing_ones() as usize;
        for (x, v) in self.state.iter_mut().zip(&self.direction) {
            *x ^= v[bit];
        }
        self.index += 1;
    }

    fn jump_to(&mut self, index: u64) {
        let gray = (index ^ (index >> 1)) as u32;
        for ((x, v), shift) in self.state.iter_mut().zip(&self.direction).zip(&self.shift) {
            *x = (0..BITS)
                .filter(|&b| (gray >> b) & 1 == 1)
                .fold(*shift, |acc, b| acc ^ v[b]);
        }
        self.index = index;
    }
}

impl LowDiscrepancySequence for SobolSequence {
    #[inline]
    fn dimension(&self) -> usize {
        self.direction.len()
    }

    fn next_point(&mut self) -> Result<&[f64], SequenceError> {
        self.ensure_available(1)?;
        for (p, &x) in self.point.iter_mut().zip(&self.state) {
            *p = to_unit(x);
        }
        self.advance();
        Ok(&self.point)
    }

    fn reset(&mut self) {
        self.state.copy_from_slice(&self.shift);
        self.index = 0;
    }

    fn skip(&mut self, n: u64) -> Result<(), SequenceError> {
        self.ensure_available(n)?;
        self.jump_to(self.index + n);
        Ok(())
    }
}

#[inline]
fn to_unit(x: u32) -> f64 {
    x as f64 / SCALE
}

/// Direction numbers `v[b]` for 0-based dimension `d`, most significant
/// bit first.
fn direction_numbers(d: usize) -> [u32; BITS] {
    let mut v = [0u32; BITS];
    if d == 0 {
        for (b, value) in v.iter_mut().enumerate() {
            *value = 1 << (BITS - 1 - b);
        }
        return v;
    }

    let (s, a, m) = JOE_KUO[d - 1];
    let s = s as usize;
    for (k, &mk) in m.iter().enumerate() {
        v[k] = mk << (BITS - 1 - k);
    }
    for k in s..BITS {
        let mut value = v[k - s] ^ (v[k - s] >> s);
        for j in 1..s {
            if (a >> (s - 1 - j)) & 1 == 1 {
                value ^= v[k - j];
            }
        }
        v[k] = value;
    }
    v
}

/// Rows of a random lower-triangular matrix with unit diagonal; row `i`
/// produces output bit `31 - i` from input bits `31..=31 - i`.
fn random_lower_triangular<R: Rng + ?Sized>(rng: &mut R) -> [u32; BITS] {
    let mut rows = [0u32; BITS];
    for (i, row) in rows.iter_mut().enumerate() {
        let mask = ((1u64 << BITS) - (1u64 << (BITS - i))) as u32;
        *row = (rng.gen::<u32>() & mask) | (1 << (BITS - 1 - i));
    }
    rows
}

fn apply_matrix(rows: &[u32; BITS], value: u32) -> u32 {
    rows.iter().enumerate().fold(0u32, |acc, (i, row)| {
        acc | (((row & value).count_ones() & 1) << (BITS - 1 - i))
    })
}

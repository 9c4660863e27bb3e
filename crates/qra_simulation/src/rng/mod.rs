//! # Random Number Generation Infrastructure
//!
//! Sources of randomness for the simulators.
//!
//! ## Module Structure
//!
//! - [`prng`]: seeded pseudo-random generator with shuffling support
//! - [`seed`]: derivation of independent per-risk seeds from a base seed
//! - [`sobol`]: Sobol low-discrepancy sequence, plain or scrambled
//!
//! ## Usage Example
//!
//! ```rust
//! use qra_simulation::rng::{derive_stream_seed, LowDiscrepancySequence, SimulationRng, SobolSequence};
//!
//! let mut rng = SimulationRng::from_seed(derive_stream_seed(42, 0));
//! let u = rng.gen_uniform();
//! assert!((0.0..1.0).contains(&u));
//!
//! let mut sobol = SobolSequence::new(2).unwrap();
//! assert_eq!(sobol.next_point().unwrap(), &[0.0, 0.0]);
//! assert_eq!(sobol.next_point().unwrap(), &[0.5, 0.5]);
//! ```

mod prng;
mod seed;
mod sobol;

pub use prng::SimulationRng;
pub use seed::derive_stream_seed;
pub use sobol::{LowDiscrepancySequence, SequenceError, SobolSequence, MAX_DIMENSION, MAX_POINTS};

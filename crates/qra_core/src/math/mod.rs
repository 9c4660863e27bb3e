//! Numerical helpers.

pub mod statistics;

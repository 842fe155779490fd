//! Benchmark support crate for percolation.
//!
//! Provides pre-generated site schedules and parameter types used by the
//! Criterion benchmarks for grid opening and whole experiments.

pub mod error;
pub mod params;
pub mod schedule;

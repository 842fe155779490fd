//! Randomised trial driver and threshold statistics.
//!
//! These collaborators sit on top of [`crate::Percolation`]: they choose which
//! sites to open, detect when a grid first percolates, and aggregate the
//! open-site counts of many independent trials.

mod builder;
mod rng;
mod runner;
mod sources;
mod stats;
mod trial;

pub use self::{
    builder::{ExecutionStrategy, ExperimentBuilder, SiteOrder},
    runner::{Experiment, ExperimentReport},
    sources::{ScriptedSites, ShuffledSites, SiteSource, UniformSites},
    stats::ThresholdStats,
    trial::{TrialOutcome, run_trial},
};

//! Percolation core library.
//!
//! [`ConnectivityGrid`] tracks which sites of an `n`x`n` grid are open and,
//! through a union-find forest with two virtual anchor nodes, answers whether
//! a site is connected to the top anchor and whether the grid percolates. The
//! [`experiment`] module drives randomised trials against any [`Percolation`]
//! implementation and estimates the percolation threshold.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub mod experiment;
mod grid;
mod percolation;
mod site;
mod union_find;

#[cfg(test)]
mod test_utils;

pub use crate::{
    error::{
        ExperimentError, ExperimentErrorCode, GridError, GridErrorCode, GridResult, Result,
    },
    experiment::{
        ExecutionStrategy, Experiment, ExperimentBuilder, ExperimentReport, ScriptedSites,
        ShuffledSites, SiteOrder, SiteSource, ThresholdStats, TrialOutcome, UniformSites,
        run_trial,
    },
    grid::ConnectivityGrid,
    percolation::Percolation,
    site::Site,
};

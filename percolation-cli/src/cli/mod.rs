//! Command-line interface for percolation threshold experiments.
//!
//! `stats` runs a full Monte Carlo experiment and reports the threshold
//! estimate with its confidence interval. `trial` runs a single trial and
//! reports how many sites it opened.

mod commands;

pub use commands::{
    Cli, CliError, Command, CommandSummary, OrderArg, StatsArgs, StatsSummary, StrategyArg,
    TrialArgs, TrialSummary, render_summary, run_cli,
};

#[cfg(test)]
mod tests;

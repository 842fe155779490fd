//! Command implementations and argument parsing for the percolation CLI.

use std::io::{self, Write};

use clap::{Args, Parser, Subcommand, ValueEnum};
use percolation_core::{
    ConnectivityGrid, ExecutionStrategy, ExperimentBuilder, ExperimentError, ExperimentReport,
    GridError, ShuffledSites, SiteOrder, TrialOutcome, UniformSites, run_trial,
};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "percolation",
    about = "Estimate the site percolation threshold of square grids."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run repeated trials and report threshold statistics.
    Stats(StatsArgs),
    /// Run a single trial and report where the grid percolated.
    Trial(TrialArgs),
}

impl Command {
    /// Subcommand name as typed on the command line.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Stats(_) => "stats",
            Self::Trial(_) => "trial",
        }
    }
}

/// Options accepted by the `stats` command.
#[derive(Debug, Args, Clone)]
pub struct StatsArgs {
    /// Side length of each grid.
    pub size: usize,

    /// Number of independent trials; at least two.
    pub trials: usize,

    /// Base seed for the per-trial generators (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// How trials are scheduled.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Order in which sites are opened.
    #[arg(long, value_enum, default_value_t = OrderArg::Uniform)]
    pub order: OrderArg,
}

/// Options accepted by the `trial` command.
#[derive(Debug, Args, Clone)]
pub struct TrialArgs {
    /// Side length of the grid.
    pub size: usize,

    /// Seed for the site generator (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Order in which sites are opened.
    #[arg(long, value_enum, default_value_t = OrderArg::Uniform)]
    pub order: OrderArg,
}

/// Trial scheduling accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Parallel when available, otherwise sequential.
    Auto,
    /// Every trial on the main thread.
    Sequential,
    /// Trials on the rayon thread pool.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Site ordering accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Independent uniform draws; repeated sites count as attempts without
    /// opening anything new.
    Uniform,
    /// A random permutation of every site.
    Shuffled,
}

impl OrderArg {
    const fn label(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Shuffled => "shuffled",
        }
    }
}

impl From<OrderArg> for SiteOrder {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Uniform => Self::Uniform,
            OrderArg::Shuffled => Self::Shuffled,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Grid construction rejected the requested size.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// Experiment configuration or execution failed.
    #[error(transparent)]
    Core(#[from] ExperimentError),
}

impl CliError {
    /// Stable code of the underlying library error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Grid(err) => err.code().as_str(),
            Self::Core(err) => err.code().as_str(),
        }
    }
}

/// Outcome of the `stats` command.
#[derive(Debug, Clone)]
pub struct StatsSummary {
    /// Aggregated experiment results.
    pub report: ExperimentReport,
}

/// Outcome of the `trial` command.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSummary {
    /// Seed that drove the site generator.
    pub seed: u64,
    /// Recorded trial result.
    pub outcome: TrialOutcome,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum CommandSummary {
    /// Result of `stats`.
    Stats(StatsSummary),
    /// Result of `trial`.
    Trial(TrialSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the configuration is invalid or a trial fails.
///
/// # Examples
/// ```
/// use percolation_cli::cli::{Cli, Command, CommandSummary, OrderArg, TrialArgs, run_cli};
///
/// let cli = Cli {
///     command: Command::Trial(TrialArgs {
///         size: 5,
///         seed: Some(3),
///         order: OrderArg::Shuffled,
///     }),
/// };
/// let CommandSummary::Trial(summary) = run_cli(cli)? else {
///     unreachable!("trial commands produce trial summaries");
/// };
/// assert_eq!(summary.outcome.site_count(), 25);
/// # Ok::<(), percolation_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<CommandSummary, CliError> {
    Span::current().record("command", cli.command.name());
    match cli.command {
        Command::Stats(args) => run_stats(args).map(CommandSummary::Stats),
        Command::Trial(args) => run_single_trial(args).map(CommandSummary::Trial),
    }
}

#[instrument(
    name = "cli.stats",
    err,
    skip(args),
    fields(size = args.size, trials = args.trials, seed = field::Empty),
)]
pub(super) fn run_stats(args: StatsArgs) -> Result<StatsSummary, CliError> {
    let mut builder = ExperimentBuilder::new()
        .with_grid_size(args.size)
        .with_trials(args.trials)
        .with_execution_strategy(args.strategy.into())
        .with_site_order(args.order.into());
    if let Some(seed) = args.seed {
        builder = builder.with_seed(seed);
    }
    let experiment = builder.build()?;
    Span::current().record("seed", experiment.seed());

    let report = experiment.run()?;
    info!(
        mean = report.stats().mean(),
        threshold = report.mean_fraction(),
        "stats command completed"
    );
    Ok(StatsSummary { report })
}

#[instrument(
    name = "cli.trial",
    err,
    skip(args),
    fields(size = args.size, order = args.order.label(), seed = field::Empty),
)]
pub(super) fn run_single_trial(args: TrialArgs) -> Result<TrialSummary, CliError> {
    let mut grid = ConnectivityGrid::new(args.size)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    Span::current().record("seed", seed);

    let mut rng = SmallRng::seed_from_u64(seed);
    let outcome = match args.order {
        OrderArg::Uniform => run_trial(&mut grid, &mut UniformSites::new(rng))?,
        OrderArg::Shuffled => run_trial(&mut grid, &mut ShuffledSites::new(args.size, &mut rng))?,
    };
    info!(
        open_sites = outcome.open_sites(),
        threshold = outcome.threshold(),
        "trial command completed"
    );
    Ok(TrialSummary { seed, outcome })
}

/// Renders `summary` to `writer` as `key = value` lines.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// use percolation_cli::cli::{Cli, Command, OrderArg, TrialArgs, render_summary, run_cli};
///
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = run_cli(Cli {
///     command: Command::Trial(TrialArgs {
///         size: 1,
///         seed: Some(0),
///         order: OrderArg::Uniform,
///     }),
/// })?;
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains("open sites = 1"));
/// assert!(text.contains("threshold = 1"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &CommandSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        CommandSummary::Stats(StatsSummary { report }) => {
            let stats = report.stats();
            writeln!(writer, "seed = {}", report.seed())?;
            writeln!(writer, "mean = {}", stats.mean())?;
            writeln!(writer, "stddev = {}", stats.stddev())?;
            writeln!(
                writer,
                "95% confidence interval = [{}, {}]",
                stats.confidence_lo(),
                stats.confidence_hi()
            )?;
            writeln!(writer, "threshold = {}", report.mean_fraction())?;
            writeln!(writer, "elapsed = {:.3}s", report.elapsed().as_secs_f64())?;
        }
        CommandSummary::Trial(TrialSummary { seed, outcome }) => {
            writeln!(writer, "seed = {seed}")?;
            writeln!(writer, "open sites = {}", outcome.open_sites())?;
            writeln!(writer, "sites = {}", outcome.site_count())?;
            writeln!(writer, "threshold = {}", outcome.threshold())?;
        }
    }
    Ok(())
}

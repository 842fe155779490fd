//! Unit tests for CLI parsing, command execution and rendering.

use super::commands::{run_single_trial, run_stats};
use super::{
    Cli, CliError, Command, CommandSummary, OrderArg, StatsArgs, StrategyArg, TrialArgs,
    render_summary, run_cli,
};

use clap::Parser;
use percolation_core::{ExperimentError, GridError};
use percolation_test_support::tracing::RecordingLayer;
use rstest::rstest;
use tracing_subscriber::layer::SubscriberExt;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn stats_args(size: usize, trials: usize) -> StatsArgs {
    StatsArgs {
        size,
        trials,
        seed: Some(7),
        strategy: StrategyArg::Sequential,
        order: OrderArg::Uniform,
    }
}

fn trial_args(size: usize, order: OrderArg) -> TrialArgs {
    TrialArgs {
        size,
        seed: Some(42),
        order,
    }
}

fn render(summary: &CommandSummary) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    render_summary(summary, &mut buffer)?;
    Ok(String::from_utf8(buffer)?
        .lines()
        .map(ToOwned::to_owned)
        .collect())
}

#[test]
fn clap_applies_stats_defaults() -> TestResult {
    let cli = Cli::try_parse_from(["percolation", "stats", "200", "30"])?;
    let Command::Stats(args) = cli.command else {
        panic!("expected the stats command");
    };
    assert_eq!(args.size, 200);
    assert_eq!(args.trials, 30);
    assert_eq!(args.seed, None);
    assert_eq!(args.strategy, StrategyArg::Auto);
    assert_eq!(args.order, OrderArg::Uniform);
    Ok(())
}

#[test]
fn clap_parses_trial_options() -> TestResult {
    let cli = Cli::try_parse_from([
        "percolation",
        "trial",
        "16",
        "--seed",
        "9",
        "--order",
        "shuffled",
    ])?;
    let Command::Trial(args) = cli.command else {
        panic!("expected the trial command");
    };
    assert_eq!(args.size, 16);
    assert_eq!(args.seed, Some(9));
    assert_eq!(args.order, OrderArg::Shuffled);
    Ok(())
}

#[rstest]
#[case::stats(&["percolation", "stats", "10", "3"], "stats")]
#[case::trial(&["percolation", "trial", "10"], "trial")]
fn command_name_matches_subcommand(#[case] args: &[&str], #[case] expected: &str) -> TestResult {
    let cli = Cli::try_parse_from(args)?;
    assert_eq!(cli.command.name(), expected);
    Ok(())
}

#[rstest]
#[case::unknown_strategy(&["percolation", "stats", "4", "4", "--strategy", "gpu"])]
#[case::unknown_order(&["percolation", "trial", "4", "--order", "spiral"])]
#[case::negative_size(&["percolation", "trial", "-3"])]
#[case::missing_trials(&["percolation", "stats", "4"])]
fn clap_rejects_invalid_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[test]
fn stats_reports_every_trial() -> TestResult {
    let summary = run_stats(stats_args(8, 5))?;
    assert_eq!(summary.report.outcomes().len(), 5);
    assert_eq!(summary.report.seed(), 7);
    assert_eq!(summary.report.grid_size(), 8);
    Ok(())
}

#[test]
fn stats_rejects_single_trial() {
    let err = run_stats(stats_args(8, 1)).expect_err("one trial is too few");
    assert!(matches!(
        err,
        CliError::Core(ExperimentError::TooFewTrials { got: 1 })
    ));
    assert_eq!(err.code(), "EXPERIMENT_TOO_FEW_TRIALS");
}

#[test]
fn stats_rejects_zero_size() {
    let err = run_stats(stats_args(0, 3)).expect_err("zero-sized grids are rejected");
    assert_eq!(err.code(), "EXPERIMENT_GRID_FAILURE");
}

#[test]
fn trial_rejects_zero_size() {
    let err = run_single_trial(trial_args(0, OrderArg::Uniform))
        .expect_err("zero-sized grids are rejected");
    assert!(matches!(
        err,
        CliError::Grid(GridError::InvalidSize { got: 0 })
    ));
    assert_eq!(err.code(), "GRID_INVALID_SIZE");
}

#[test]
fn oversized_grids_fail_without_panicking() {
    let size = u32::MAX as usize;
    let stats = run_stats(stats_args(size, 2)).expect_err("grid cannot be allocated");
    assert_eq!(stats.code(), "EXPERIMENT_GRID_FAILURE");
    let trial = run_single_trial(trial_args(size, OrderArg::Shuffled))
        .expect_err("grid cannot be allocated");
    assert!(matches!(
        trial,
        CliError::Grid(GridError::InvalidSize { got }) if got == size
    ));
}

#[rstest]
#[case(OrderArg::Uniform)]
#[case(OrderArg::Shuffled)]
fn trial_is_reproducible_for_a_seed(#[case] order: OrderArg) -> TestResult {
    let first = run_single_trial(trial_args(12, order))?;
    let second = run_single_trial(trial_args(12, order))?;
    assert_eq!(first, second);
    assert_eq!(first.outcome.site_count(), 144);
    assert!(first.outcome.open_sites() >= 12);
    Ok(())
}

#[test]
fn shuffled_trial_never_repeats_sites() -> TestResult {
    let summary = run_single_trial(trial_args(10, OrderArg::Shuffled))?;
    assert_eq!(summary.outcome.attempts(), summary.outcome.open_sites());
    Ok(())
}

#[test]
fn render_stats_outputs_each_line() -> TestResult {
    let summary = run_cli(Cli {
        command: Command::Stats(stats_args(6, 4)),
    })?;
    let CommandSummary::Stats(stats) = &summary else {
        panic!("expected a stats summary");
    };
    let lines = render(&summary)?;
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "seed = 7");
    assert_eq!(
        lines[1],
        format!("mean = {}", stats.report.stats().mean())
    );
    assert!(lines[2].starts_with("stddev = "));
    assert_eq!(
        lines[3],
        format!(
            "95% confidence interval = [{}, {}]",
            stats.report.stats().confidence_lo(),
            stats.report.stats().confidence_hi()
        )
    );
    assert_eq!(
        lines[4],
        format!("threshold = {}", stats.report.mean_fraction())
    );
    assert!(lines[5].starts_with("elapsed = ") && lines[5].ends_with('s'));
    Ok(())
}

#[test]
fn render_trial_outputs_counts() -> TestResult {
    let summary = run_cli(Cli {
        command: Command::Trial(trial_args(1, OrderArg::Uniform)),
    })?;
    let lines = render(&summary)?;
    assert_eq!(
        lines,
        ["seed = 42", "open sites = 1", "sites = 1", "threshold = 1"]
    );
    Ok(())
}

#[test]
fn run_cli_records_command_fields() -> TestResult {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let cli = Cli {
        command: Command::Stats(stats_args(5, 2)),
    };

    tracing::subscriber::with_default(subscriber, || run_cli(cli))?;

    let run_spans = layer.spans_named("cli.run");
    let run_span = run_spans.first().expect("cli.run span must exist");
    assert_eq!(run_span.field("command"), Some("stats"));

    let stats_spans = layer.spans_named("cli.stats");
    let stats_span = stats_spans.first().expect("cli.stats span must exist");
    assert_eq!(stats_span.field("size"), Some("5"));
    assert_eq!(stats_span.field("trials"), Some("2"));
    assert_eq!(stats_span.field("seed"), Some("7"));

    assert_eq!(layer.events_with_message("stats command completed").len(), 1);
    Ok(())
}

#[test]
fn failed_trial_records_error_on_span() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let cli = Cli {
        command: Command::Trial(trial_args(0, OrderArg::Shuffled)),
    };

    let result = tracing::subscriber::with_default(subscriber, || run_cli(cli));
    assert!(result.is_err());

    let trial_spans = layer.spans_named("cli.trial");
    let trial_span = trial_spans.first().expect("cli.trial span must exist");
    assert_eq!(trial_span.field("order"), Some("shuffled"));
    assert!(
        layer
            .events()
            .iter()
            .any(|event| event.level == tracing::Level::ERROR)
    );
}

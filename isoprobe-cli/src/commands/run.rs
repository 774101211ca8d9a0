//! `isoprobe run` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use isoprobe_core::config::IsoprobeConfig;
use isoprobe_scenario::{
    Announce, RunMode, Scenario, ScenarioContext, ScenarioError, ScenarioReport, Step,
};

use crate::cli::{OutputFormat, RunArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `run` command.
///
/// Builds the scenario context from the effective configuration, applies
/// `--data-root`, `--ntrees` and `--seed`, and runs the scenario with the
/// runner selected by `--mode`. Failures are rendered before being returned
/// so that the exit code and the printed outcome agree.
pub fn execute(
    args: RunArgs,
    config: &IsoprobeConfig,
    format: OutputFormat,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut config = config.clone();
    if let Some(root) = &args.data_root {
        config.data.root = root.to_string_lossy().into_owned();
    }

    let mut scenario = Scenario::builtin(&args.scenario)?;
    if let Some(ntrees) = args.ntrees {
        scenario = scenario.with_ntrees(ntrees)?;
    }
    if let Some(seed) = args.seed {
        scenario = scenario.with_seed(seed);
    }

    // stdout carries only the JSON document in json mode
    let announce = match format {
        OutputFormat::Text => Announce::Stdout,
        OutputFormat::Json => Announce::Stderr,
    };
    let start_dir = std::env::current_dir()?;
    let ctx = ScenarioContext::from_config(&config, start_dir).with_announce(announce);

    let mode = RunMode::from(args.mode);
    info!(scenario = scenario.name(), %mode, "running scenario");

    match mode.runner().run(&scenario, &ctx) {
        Ok(report) => writer.render(&report),
        Err(e) => {
            writer.render(&RunFailure::new(&scenario, mode, &e))?;
            Err(e.into())
        }
    }
}

impl Render for ScenarioReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Scenario: {} ({})", self.scenario.bold(), self.mode)?;
        writeln!(w, "  Run ID:      {}", self.run_id)?;
        writeln!(w, "  Algorithm:   {}", self.algorithm)?;
        writeln!(w, "  Train rows:  {}", self.training_rows)?;
        writeln!(w, "  Test rows:   {}", self.test_rows)?;
        writeln!(
            w,
            "  Predictions: {} rows x {} cols ({})",
            self.prediction_rows,
            self.prediction_columns.len(),
            self.prediction_columns.join(", ")
        )?;
        writeln!(w, "  Trees:       {} (seed {})", self.trees_built, self.seed)?;
        writeln!(
            w,
            "  Timings:     locate {} ms, import {} ms, train {} ms, predict {} ms",
            self.timings.locate_ms,
            self.timings.import_ms,
            self.timings.train_ms,
            self.timings.predict_ms
        )?;
        let verdict = if self.passed {
            "PASSED".green().bold()
        } else {
            "FAILED".red().bold()
        };
        writeln!(
            w,
            "  Result:      {} ({} of {} expected rows, {} ms)",
            verdict, self.prediction_rows, self.expected_rows, self.timings.total_ms
        )?;
        Ok(())
    }
}

/// Rendered outcome of a failed run.
#[derive(Debug, Serialize)]
pub struct RunFailure {
    pub scenario: String,
    pub mode: RunMode,
    pub passed: bool,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<Step>,
    pub error: String,
}

impl RunFailure {
    fn new(scenario: &Scenario, mode: RunMode, err: &ScenarioError) -> Self {
        Self {
            scenario: scenario.name().to_owned(),
            mode,
            passed: false,
            kind: err.kind(),
            step: err.step(),
            error: err.to_string(),
        }
    }
}

impl Render for RunFailure {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Scenario: {} ({})", self.scenario.bold(), self.mode)?;
        if let Some(step) = self.step {
            writeln!(w, "  Step:        {step}")?;
        }
        writeln!(w, "  Kind:        {}", self.kind)?;
        writeln!(w, "  Error:       {}", self.error.red())?;
        writeln!(w, "  Result:      {}", "FAILED".red().bold())?;
        Ok(())
    }
}

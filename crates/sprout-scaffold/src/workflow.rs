//! Sequential step execution and progress reporting
//!
//! A workflow is a fixed list of steps. Each step returns a
//! [`StepOutcome`] or a [`ScaffoldError`]; [`run_step`] reports the
//! transition to the [`Reporter`] and hands the result back so the caller
//! can stop at the first failure with `?`. Nothing here exits the process.

use crate::error::{Result, ScaffoldError};
use colored::Colorize;
use std::future::Future;

/// How a step that didn't fail ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded(String),
    /// Nothing to do (e.g. no .gitignore to update)
    Skipped(String),
}

/// Receives step progress for display
pub trait Reporter {
    /// A step has begun and is in progress
    fn step_started(&mut self, label: &str);

    fn step_finished(&mut self, label: &str, outcome: &StepOutcome);

    fn step_failed(&mut self, label: &str, error: &ScaffoldError);

    /// Non-fatal notice, outside any step
    fn warning(&mut self, message: &str);
}

/// Run one step, reporting its start and its result
pub async fn run_step<R, F>(reporter: &mut R, label: &str, step: F) -> Result<StepOutcome>
where
    R: Reporter + ?Sized,
    F: Future<Output = Result<StepOutcome>>,
{
    reporter.step_started(label);
    tracing::debug!(step = label, "step started");

    match step.await {
        Ok(outcome) => {
            tracing::debug!(step = label, ?outcome, "step finished");
            reporter.step_finished(label, &outcome);
            Ok(outcome)
        }
        Err(error) => {
            tracing::debug!(step = label, %error, "step failed");
            reporter.step_failed(label, &error);
            Err(error)
        }
    }
}

/// Line-oriented reporter for non-interactive output (pipes, CI logs)
#[derive(Debug, Default)]
pub struct PlainReporter;

impl Reporter for PlainReporter {
    fn step_started(&mut self, label: &str) {
        println!("{} {}...", "->".blue(), label);
    }

    fn step_finished(&mut self, _label: &str, outcome: &StepOutcome) {
        match outcome {
            StepOutcome::Succeeded(message) => println!("   {} {}", "done".green(), message),
            StepOutcome::Skipped(message) => println!("   {} {}", "skipped".dimmed(), message),
        }
    }

    fn step_failed(&mut self, label: &str, _error: &ScaffoldError) {
        eprintln!("   {} {}", "failed".red(), label);
    }

    fn warning(&mut self, message: &str) {
        eprintln!("{} {}", "Warning:".yellow(), message);
    }
}

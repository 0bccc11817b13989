//! Spinner-based step reporter

use crate::error::ScaffoldError;
use crate::workflow::{Reporter, StepOutcome};

/// Shows one cliclack spinner per step
#[derive(Default)]
pub struct SpinnerReporter {
    spinner: Option<cliclack::ProgressBar>,
}

impl SpinnerReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for SpinnerReporter {
    fn step_started(&mut self, label: &str) {
        let spinner = cliclack::spinner();
        spinner.start(format!("{}...", label));
        self.spinner = Some(spinner);
    }

    fn step_finished(&mut self, label: &str, outcome: &StepOutcome) {
        let message = match outcome {
            StepOutcome::Succeeded(message) => message.clone(),
            StepOutcome::Skipped(message) => format!("{} (skipped)", message),
        };
        match self.spinner.take() {
            Some(spinner) => spinner.stop(message),
            None => {
                let _ = cliclack::log::success(format!("{}: {}", label, message));
            }
        }
    }

    fn step_failed(&mut self, label: &str, _error: &ScaffoldError) {
        let message = format!("{} failed", label);
        match self.spinner.take() {
            Some(spinner) => spinner.error(message),
            None => {
                let _ = cliclack::log::error(message);
            }
        }
    }

    fn warning(&mut self, message: &str) {
        let _ = cliclack::log::warning(message);
    }
}

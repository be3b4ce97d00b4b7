//! UI/Progress presentation layer
//!
//! This module handles:
//! - Status output for every pipeline stage ([`output::Output`])
//! - Progress reporting while CASE files are fetched
//! - Operator tables for `--list` ([`display`])
//!
//! Fetch progress goes through the ProgressReporter trait, so non-interactive
//! runs and tests can swap the progress bar for a no-op.

pub mod display;
pub mod output;

pub use output::Output;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter for the per-operator fetch loop
pub trait ProgressReporter {
    /// Show which operator is being fetched
    fn update_operator(&mut self, literal_name: &str, current: usize, total: usize);

    /// Mark one operator as done
    fn inc_operator(&mut self);

    /// Finish progress display
    fn finish(&mut self);

    /// Abandon on error
    fn abandon(&mut self);

    /// Run `print` with the progress display hidden, then redraw it
    fn suspend(&mut self, print: &mut dyn FnMut());
}

/// Interactive progress reporter with a visual progress bar
pub struct InteractiveProgressReporter {
    operator_pb: ProgressBar,
}

impl InteractiveProgressReporter {
    /// Create a new interactive progress reporter with total operator count
    pub fn new(total_operators: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let operator_pb = ProgressBar::new(total_operators);
        operator_pb.set_style(style);

        Self { operator_pb }
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn update_operator(&mut self, literal_name: &str, current: usize, total: usize) {
        self.operator_pb
            .set_message(format!("({current}/{total}) downloading {literal_name}"));
    }

    fn inc_operator(&mut self) {
        self.operator_pb.inc(1);
    }

    fn finish(&mut self) {
        self.operator_pb.finish_and_clear();
    }

    fn abandon(&mut self) {
        self.operator_pb.abandon();
    }

    fn suspend(&mut self, print: &mut dyn FnMut()) {
        self.operator_pb.suspend(print);
    }
}

/// Silent progress reporter for non-interactive runs and tests
#[derive(Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn update_operator(&mut self, _literal_name: &str, _current: usize, _total: usize) {}

    fn inc_operator(&mut self) {}

    fn finish(&mut self) {}

    fn abandon(&mut self) {}

    fn suspend(&mut self, print: &mut dyn FnMut()) {
        print();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_progress_reporter_no_ops() {
        let mut reporter = SilentProgressReporter;

        reporter.update_operator("ibm-mq", 1, 5);
        reporter.inc_operator();
        reporter.finish();
        reporter.abandon();
    }

    #[test]
    fn test_suspend_runs_the_printer_once() {
        let mut printed = 0;
        SilentProgressReporter.suspend(&mut || printed += 1);
        assert_eq!(printed, 1);

        let mut reporter = InteractiveProgressReporter::new(2);
        reporter.inc_operator();
        reporter.suspend(&mut || printed += 1);
        assert_eq!(printed, 2);
        assert_eq!(reporter.operator_pb.position(), 1);
    }

    #[test]
    fn test_interactive_progress_reporter_inc() {
        let mut reporter = InteractiveProgressReporter::new(5);
        reporter.update_operator("ibm-mq", 1, 5);
        reporter.inc_operator();
        reporter.inc_operator();
        assert_eq!(reporter.operator_pb.position(), 2);
    }
}

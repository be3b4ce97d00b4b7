//! Colored status output
//!
//! Green for progress, yellow for commands about to run and warnings, red for
//! errors. Detail lines only appear with `--verbose`.

use console::Style;

/// Status sink shared by all pipeline stages
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    verbose: bool,
}

impl Output {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Progress line
    pub fn status(&self, message: impl AsRef<str>) {
        println!("{}", Style::new().green().apply_to(message.as_ref()));
    }

    /// Section heading, preceded by a blank line
    pub fn heading(&self, message: impl AsRef<str>) {
        println!();
        println!("{}", Style::new().green().bold().apply_to(message.as_ref()));
    }

    /// A command or action that is about to run
    pub fn action(&self, message: impl AsRef<str>) {
        println!("   {}", Style::new().yellow().apply_to(message.as_ref()));
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        eprintln!("{}", Style::new().yellow().apply_to(message.as_ref()));
    }

    pub fn error(&self, message: impl AsRef<str>) {
        eprintln!("{}", Style::new().red().apply_to(message.as_ref()));
    }

    /// Verbose-only line
    pub fn detail(&self, message: impl AsRef<str>) {
        if self.verbose {
            println!("{}", Style::new().dim().apply_to(message.as_ref()));
        }
    }

    /// Empty separator line
    pub fn blank(&self) {
        println!();
    }

    /// Multi-line block (generated manifests), printed as-is
    pub fn block(&self, text: &str) {
        println!("{text}");
    }
}

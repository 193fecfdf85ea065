use std::cell::RefCell;
use std::fmt::Display;

use colored::Colorize;

/// How serious a diagnostic is. Only [`Severity::Info`] is gated on `--verbose`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Advisory message channel shared by the crawler and every extractor.
///
/// Messages are single lines on stderr, tagged with their severity. Nothing
/// reported here ever stops the walk.
pub struct Diagnostics {
    verbose: bool,
    color: bool,
    captured: Option<RefCell<Vec<(Severity, String)>>>,
}

impl Diagnostics {
    pub fn new(verbose: bool, color: bool) -> Self {
        Self {
            verbose,
            color,
            captured: None,
        }
    }

    /// Record messages in memory instead of printing them.
    #[cfg(test)]
    pub fn capturing() -> Self {
        Self {
            verbose: true,
            color: false,
            captured: Some(RefCell::new(Vec::new())),
        }
    }

    pub fn info(&self, message: impl Display) {
        if self.verbose {
            self.emit(Severity::Info, message.to_string());
        }
    }

    pub fn warn(&self, message: impl Display) {
        self.emit(Severity::Warning, message.to_string());
    }

    pub fn error(&self, message: impl Display) {
        self.emit(Severity::Error, message.to_string());
    }

    fn emit(&self, severity: Severity, message: String) {
        if let Some(captured) = &self.captured {
            captured.borrow_mut().push((severity, message));
            return;
        }

        let line = format!("{}: {}", severity, message);
        if !self.color {
            eprintln!("{}", line);
            return;
        }
        match severity {
            Severity::Info => eprintln!("{}", line),
            Severity::Warning => eprintln!("{}", line.yellow()),
            Severity::Error => eprintln!("{}", line.red()),
        }
    }

    /// Captured messages of one severity, in emission order.
    #[cfg(test)]
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.captured
            .as_ref()
            .map(|c| {
                c.borrow()
                    .iter()
                    .filter(|(s, _)| *s == severity)
                    .map(|(_, m)| m.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

//! Colored terminal output utilities.

use console::{Style, Term};

/// Terminal output formatter writing to stderr.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    fn line(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.green.apply_to(msg).to_string());
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.yellow.apply_to(msg).to_string());
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.red.apply_to(msg).to_string());
    }

    /// Print a navigation heading (cyan bold).
    pub(crate) fn heading(&self, msg: &str) {
        self.line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print one navigation entry, indented by `depth`, with its URL dimmed.
    /// Entries whose file is missing are printed in red.
    pub(crate) fn nav_entry(&self, depth: usize, label: &str, uri: &str, missing: bool) {
        let indent = "  ".repeat(depth);
        let label = if missing {
            self.red.apply_to(format!("{label} (missing)")).to_string()
        } else {
            label.to_owned()
        };
        self.line(&format!("{indent}- {label} {}", self.dim.apply_to(uri)));
    }
}

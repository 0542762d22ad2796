use std::fmt;

/// Why an entry, filter, or block was left out. These are never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotFound,
    NoMatch,
    Ignored,
    NotAFile,
    MarkersNotFound { start: String, end: String },
    LineRangeOutOfBounds { start: usize, end: usize, available: usize },
    Binary,
    Unreadable(String),
    EmptyBlock,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotFound => write!(f, "path does not exist"),
            SkipReason::NoMatch => write!(f, "expression matched no files"),
            SkipReason::Ignored => write!(f, "excluded by ignore rules"),
            SkipReason::NotAFile => write!(f, "not a regular file"),
            SkipReason::MarkersNotFound { start, end } => {
                write!(f, "markers '{}' .. '{}' not found", start, end)
            }
            SkipReason::LineRangeOutOfBounds {
                start,
                end,
                available,
            } => write!(
                f,
                "line range {}-{} out of bounds (file has {} lines)",
                start, end, available
            ),
            SkipReason::Binary => write!(f, "binary content"),
            SkipReason::Unreadable(e) => write!(f, "unreadable: {}", e),
            SkipReason::EmptyBlock => write!(f, "block matched no files"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The entry, filter, or block the diagnostic is about.
    pub subject: String,
    pub reason: SkipReason,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.reason)
    }
}

/// Collects skips for one resolution or render pass. In verbose mode each
/// skip is logged as it happens and match notes are kept for the caller;
/// otherwise only the aggregate is reported.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    verbose: bool,
    items: Vec<Diagnostic>,
    notes: Vec<String>,
}

impl Diagnostics {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            items: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn skip(&mut self, subject: impl Into<String>, reason: SkipReason) {
        let diagnostic = Diagnostic {
            subject: subject.into(),
            reason,
        };
        if self.verbose {
            log::warn!("Skipped {}", diagnostic);
        } else {
            log::trace!("Skipped {}", diagnostic);
        }
        self.items.push(diagnostic);
    }

    /// Verbose-only progress note (e.g. which files an expression matched).
    pub fn note(&mut self, message: impl Into<String>) {
        if self.verbose {
            let message = message.into();
            log::debug!("{}", message);
            self.notes.push(message);
        }
    }

    pub fn report_summary(&self, phase: &str) {
        if !self.items.is_empty() && !self.verbose {
            log::info!(
                "{}: {} entries skipped (use verbose output for details)",
                phase,
                self.items.len()
            );
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
        self.notes.extend(other.notes);
    }

    pub fn into_parts(self) -> (Vec<Diagnostic>, Vec<String>) {
        (self.items, self.notes)
    }
}

mod options;
mod render;
mod sink;

pub use options::{DelimiterStyle, LineLimit, RenderOptions};
pub use sink::ClipboardSink;

use crate::diagnostics::Diagnostics;
use crate::error::{AppError, Result};
use crate::ignore_map::IgnoreMap;
use crate::reference::{FileReference, Snippet};
use crate::text::read_text;
use render::{Entry, Renderer};
use std::fs;
use std::path::{Path, PathBuf};

/// What one concatenation run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConcatSummary {
    pub output: PathBuf,
    /// Content lines only; headers, closures, and separators are not counted.
    pub total_lines: usize,
    pub entries_written: usize,
    pub truncated: usize,
    pub redactions: usize,
    pub skipped: usize,
}

/// Shared plumbing for both concatenators.
struct Target<'a> {
    output: PathBuf,
    options: &'a RenderOptions,
    ignore_map: &'a IgnoreMap,
    context: Option<String>,
    relative_paths: bool,
    clipboard: Option<&'a dyn ClipboardSink>,
}

impl<'a> Target<'a> {
    fn new(output: PathBuf, options: &'a RenderOptions, ignore_map: &'a IgnoreMap) -> Self {
        Self {
            output,
            options,
            ignore_map,
            context: None,
            relative_paths: options.relative_paths,
            clipboard: None,
        }
    }

    fn render<I>(&self, entries: I, skipped: usize) -> (String, ConcatSummary)
    where
        I: IntoIterator<Item = Entry>,
    {
        let renderer = Renderer::new(self.options, self.ignore_map, self.context.as_deref());
        let mut buffer = String::new();
        let mut summary = ConcatSummary {
            output: self.output.clone(),
            skipped,
            ..ConcatSummary::default()
        };
        for entry in entries {
            let stats = renderer.push(&mut buffer, &entry, summary.entries_written == 0);
            summary.entries_written += 1;
            summary.total_lines += stats.lines;
            summary.redactions += stats.redactions;
            if stats.truncated {
                summary.truncated += 1;
            }
        }
        (buffer, summary)
    }

    fn check_output(&self) -> Result<()> {
        match self.output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(AppError::OutputPath {
                    path: self.output.clone(),
                    reason: format!("parent directory '{}' does not exist", parent.display()),
                })
            }
            _ if self.output.is_dir() => Err(AppError::OutputPath {
                path: self.output.clone(),
                reason: "is a directory".to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn write(&self, buffer: &str) -> Result<()> {
        fs::write(&self.output, buffer).map_err(|e| AppError::FileWrite {
            path: self.output.clone(),
            source: e,
        })?;
        log::info!("Wrote {} bytes to {}", buffer.len(), self.output.display());

        if self.options.copy_to_clipboard {
            match self.clipboard {
                Some(sink) => {
                    if let Err(e) = sink.copy(buffer) {
                        log::warn!("Output written but not copied to clipboard: {}", e);
                    }
                }
                None => log::warn!("Clipboard copy requested but no clipboard is available"),
            }
        }
        Ok(())
    }
}

/// Concatenates whole files.
pub struct FileConcatenator<'a> {
    files: &'a [FileReference],
    target: Target<'a>,
}

impl<'a> FileConcatenator<'a> {
    pub fn new(
        files: &'a [FileReference],
        output: impl Into<PathBuf>,
        options: &'a RenderOptions,
        ignore_map: &'a IgnoreMap,
    ) -> Self {
        Self {
            files,
            target: Target::new(output.into(), options, ignore_map),
        }
    }

    /// Free text shown in boxed headers.
    pub fn context(mut self, context: Option<String>) -> Self {
        self.target.context = context;
        self
    }

    pub fn relative_paths(mut self, relative: bool) -> Self {
        self.target.relative_paths = relative;
        self
    }

    pub fn clipboard(mut self, sink: Option<&'a dyn ClipboardSink>) -> Self {
        self.target.clipboard = sink;
        self
    }

    pub fn output(&self) -> &Path {
        &self.target.output
    }

    /// Renders into memory without touching the output file.
    pub fn render(&self, diagnostics: &mut Diagnostics) -> (String, ConcatSummary) {
        let before = diagnostics.len();
        let mut entries = Vec::with_capacity(self.files.len());
        for file in self.files {
            match read_text(file.path()) {
                Ok(content) => entries.push(Entry {
                    title: file.display_path(self.target.relative_paths),
                    content,
                }),
                Err(reason) => diagnostics.skip(file.display_path(self.target.relative_paths), reason),
            }
        }
        self.target.render(entries, diagnostics.len() - before)
    }

    pub fn run(&self, diagnostics: &mut Diagnostics) -> Result<ConcatSummary> {
        self.target.check_output()?;
        let (buffer, summary) = self.render(diagnostics);
        self.target.write(&buffer)?;
        log::debug!(
            "Concatenated {} files ({} lines) into {}",
            summary.entries_written,
            summary.total_lines,
            summary.output.display()
        );
        Ok(summary)
    }
}

/// Concatenates pre-extracted snippets under their titles.
pub struct SnippetConcatenator<'a> {
    snippets: &'a [Snippet],
    target: Target<'a>,
}

impl<'a> SnippetConcatenator<'a> {
    pub fn new(
        snippets: &'a [Snippet],
        output: impl Into<PathBuf>,
        options: &'a RenderOptions,
        ignore_map: &'a IgnoreMap,
    ) -> Self {
        Self {
            snippets,
            target: Target::new(output.into(), options, ignore_map),
        }
    }

    pub fn relative_paths(mut self, relative: bool) -> Self {
        self.target.relative_paths = relative;
        self
    }

    pub fn clipboard(mut self, sink: Option<&'a dyn ClipboardSink>) -> Self {
        self.target.clipboard = sink;
        self
    }

    pub fn render(&self) -> (String, ConcatSummary) {
        let relative = self.target.relative_paths;
        let entries = self.snippets.iter().map(|s| Entry {
            title: s.reference.title(relative),
            content: s.content.clone(),
        });
        self.target.render(entries, 0)
    }

    pub fn run(&self) -> Result<ConcatSummary> {
        self.target.check_output()?;
        let (buffer, summary) = self.render();
        self.target.write(&buffer)?;
        log::debug!(
            "Concatenated {} snippets ({} lines) into {}",
            summary.entries_written,
            summary.total_lines,
            summary.output.display()
        );
        Ok(summary)
    }
}

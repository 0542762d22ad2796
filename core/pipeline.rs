use crate::concat::{ClipboardSink, ConcatSummary, FileConcatenator, RenderOptions, SnippetConcatenator};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::Result;
use crate::selection::{ResolveContext, ResolvedJob, ResolvedSet, Selection};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Rendered(ConcatSummary),
    /// Nothing resolved; no output was written.
    NoMatches,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub name: String,
    pub output: PathBuf,
    pub result: Outcome,
}

impl JobOutcome {
    pub fn summary(&self) -> Option<&ConcatSummary> {
        match &self.result {
            Outcome::Rendered(s) => Some(s),
            Outcome::NoMatches => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub outcomes: Vec<JobOutcome>,
    pub diagnostics: Vec<Diagnostic>,
    /// Per-entry match notes, collected only in verbose mode.
    pub notes: Vec<String>,
}

impl RunReport {
    pub fn total_lines(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(JobOutcome::summary)
            .map(|s| s.total_lines)
            .sum()
    }

    /// True when no job wrote anything.
    pub fn is_empty(&self) -> bool {
        self.outcomes.iter().all(|o| o.result == Outcome::NoMatches)
    }
}

/// Resolve-then-render for one invocation.
pub struct Pipeline<'a> {
    ctx: ResolveContext<'a>,
    options: &'a RenderOptions,
    output_name: Option<String>,
    clipboard: Option<&'a dyn ClipboardSink>,
}

impl<'a> Pipeline<'a> {
    pub fn new(ctx: ResolveContext<'a>, options: &'a RenderOptions) -> Self {
        Self {
            ctx,
            options,
            output_name: None,
            clipboard: None,
        }
    }

    pub fn output_name(mut self, name: Option<String>) -> Self {
        self.output_name = name.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn clipboard(mut self, sink: Option<&'a dyn ClipboardSink>) -> Self {
        self.clipboard = sink;
        self
    }

    pub fn run(&self, selection: &Selection) -> Result<RunReport> {
        let mut diagnostics = Diagnostics::new(self.ctx.verbose || self.options.verbose);
        let jobs = selection.resolve(&self.ctx, self.output_name.as_deref(), &mut diagnostics)?;
        diagnostics.report_summary("Resolution");

        let mut render_diags = Diagnostics::new(diagnostics.is_verbose());
        let mut outcomes = Vec::with_capacity(jobs.len());
        for job in &jobs {
            outcomes.push(self.render_job(job, &mut render_diags)?);
        }
        render_diags.report_summary("Rendering");
        diagnostics.extend(render_diags);

        let (diagnostics, notes) = diagnostics.into_parts();
        Ok(RunReport {
            outcomes,
            diagnostics,
            notes,
        })
    }

    fn render_job(&self, job: &ResolvedJob, diagnostics: &mut Diagnostics) -> Result<JobOutcome> {
        if job.set.is_empty() {
            log::info!("No matches for {}; {} not written", job.name, job.output.display());
            return Ok(JobOutcome {
                name: job.name.clone(),
                output: job.output.clone(),
                result: Outcome::NoMatches,
            });
        }
        let relative = job.relative_paths.unwrap_or(self.options.relative_paths);
        let summary = match &job.set {
            ResolvedSet::Files(files) => {
                FileConcatenator::new(files, job.output.clone(), self.options, self.ctx.ignore_map)
                    .context(job.context.clone())
                    .relative_paths(relative)
                    .clipboard(self.clipboard)
                    .run(diagnostics)?
            }
            ResolvedSet::Snippets(snippets) => SnippetConcatenator::new(
                snippets,
                job.output.clone(),
                self.options,
                self.ctx.ignore_map,
            )
            .relative_paths(relative)
            .clipboard(self.clipboard)
            .run()?,
        };
        Ok(JobOutcome {
            name: job.name.clone(),
            output: job.output.clone(),
            result: Outcome::Rendered(summary),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConselectConfig;
    use crate::ignore_map::IgnoreMap;
    use crate::selection::ScanConfig;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn writes_default_output_and_reports_lines() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        fs::write(root.join("a.txt"), "1\n2\n").unwrap();
        fs::write(root.join("b.txt"), "3\n").unwrap();
        let map = IgnoreMap::default();
        let options = RenderOptions::default();
        let ctx = ResolveContext::new(root.clone(), &map);

        let report = Pipeline::new(ctx, &options)
            .run(&Selection::Scan(ScanConfig::default()))
            .unwrap();
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.total_lines(), 3);
        assert!(root.join("concatenation.txt").is_file());
    }

    #[test]
    fn verbose_runs_report_each_entry() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        fs::write(root.join("a.txt"), "a\n").unwrap();
        let map = IgnoreMap::default();
        let options = RenderOptions {
            verbose: true,
            ..RenderOptions::default()
        };
        let ctx = ResolveContext::new(root, &map);

        let report = Pipeline::new(ctx, &options)
            .run(&Selection::Conselect(ConselectConfig::new(["a.txt", "ghost.txt"])))
            .unwrap();
        assert_eq!(report.notes, vec!["a.txt matched 1 file(s)".to_string()]);
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn no_matches_is_an_outcome_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        let map = IgnoreMap::default();
        let options = RenderOptions::default();
        let ctx = ResolveContext::new(root.clone(), &map);

        let report = Pipeline::new(ctx, &options)
            .run(&Selection::Conselect(ConselectConfig::new(["ghost.rs"])))
            .unwrap();
        assert!(report.is_empty());
        assert_eq!(report.outcomes[0].result, Outcome::NoMatches);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(!root.join("conselection.txt").exists());
    }
}

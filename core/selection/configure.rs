use super::ResolveContext;
use crate::config::{ConfigureConfig, Filter, SnippetSelector, resolve_against};
use crate::diagnostics::{Diagnostics, SkipReason};
use crate::error::Result;
use crate::reference::{FileReference, Snippet, SnippetReference};
use crate::text::{read_text, split_lines, strip_terminator};

/// Extracts one snippet per filter, in filter order. A bad filter is skipped
/// with a diagnostic and never aborts the batch.
pub fn resolve(
    config: &ConfigureConfig,
    ctx: &ResolveContext<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Snippet>> {
    let mut snippets = Vec::with_capacity(config.filters.len());
    for filter in &config.filters {
        match resolve_filter(filter, ctx) {
            Ok(snippet) => {
                diagnostics.note(format!(
                    "{}: extracted {} line(s)",
                    filter.file,
                    snippet.content.lines().count()
                ));
                snippets.push(snippet);
            }
            Err(reason) => diagnostics.skip(filter.file.clone(), reason),
        }
    }
    log::debug!(
        "Resolved {} of {} snippet filters",
        snippets.len(),
        config.filters.len()
    );
    Ok(snippets)
}

fn resolve_filter(filter: &Filter, ctx: &ResolveContext<'_>) -> Result<Snippet, SkipReason> {
    let path = resolve_against(&ctx.root, &filter.file);
    if !path.exists() {
        return Err(SkipReason::NotFound);
    }
    if !path.is_file() {
        return Err(SkipReason::NotAFile);
    }
    let path = path
        .canonicalize()
        .map_err(|e| SkipReason::Unreadable(e.to_string()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let under_excluded_dir = path
        .parent()
        .is_some_and(|dir| ctx.crosses_excluded_dir(&ctx.root, dir));
    if under_excluded_dir || ctx.excludes_name(&name) {
        return Err(SkipReason::Ignored);
    }

    let text = read_text(&path)?;
    let content = extract(&text, &filter.selector)?;
    Ok(Snippet {
        reference: SnippetReference {
            file: FileReference::new(path, ctx.root.clone()),
            selector: filter.selector.clone(),
            label: filter.label.clone(),
        },
        content,
    })
}

/// Applies a selector to file text. Marker lines are compared after
/// trimming, and only the first start marker (with the next end marker
/// after it) counts.
pub fn extract(text: &str, selector: &SnippetSelector) -> Result<String, SkipReason> {
    let lines = split_lines(text);
    match selector {
        SnippetSelector::Whole => Ok(text.to_string()),
        SnippetSelector::Lines { start, end } => {
            if *start == 0 || start > end || *end > lines.len() {
                return Err(SkipReason::LineRangeOutOfBounds {
                    start: *start,
                    end: *end,
                    available: lines.len(),
                });
            }
            Ok(lines[start - 1..*end].concat())
        }
        SnippetSelector::Markers { start, end } => {
            let not_found = || SkipReason::MarkersNotFound {
                start: start.clone(),
                end: end.clone(),
            };
            let is_marker = |line: &str, marker: &str| strip_terminator(line).trim() == marker.trim();
            let open = lines
                .iter()
                .position(|l| is_marker(l, start))
                .ok_or_else(not_found)?;
            let close = lines[open + 1..]
                .iter()
                .position(|l| is_marker(l, end))
                .map(|offset| open + 1 + offset)
                .ok_or_else(not_found)?;
            Ok(lines[open + 1..close].concat())
        }
    }
}

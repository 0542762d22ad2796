use super::options::{DelimiterStyle, RenderOptions};
use crate::ignore_map::IgnoreMap;
use crate::redact::Redactor;
use crate::text::{split_lines, trim_blank_edges};

/// Text to render plus the label its header shows.
pub(crate) struct Entry {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EntryStats {
    pub lines: usize,
    pub truncated: bool,
    pub redactions: usize,
}

pub(crate) struct Renderer<'a> {
    options: &'a RenderOptions,
    redactor: Option<Redactor<'a>>,
    context: Option<&'a str>,
}

impl<'a> Renderer<'a> {
    pub(crate) fn new(
        options: &'a RenderOptions,
        ignore_map: &'a IgnoreMap,
        context: Option<&'a str>,
    ) -> Self {
        let redactor = (!options.allow_secrets)
            .then(|| Redactor::new(ignore_map, options.deep_secret_inspection));
        Self {
            options,
            redactor,
            context,
        }
    }

    /// Appends one entry to `buffer`. Secrets are replaced before the line
    /// cap is applied.
    pub(crate) fn push(&self, buffer: &mut String, entry: &Entry, first: bool) -> EntryStats {
        let lines = split_lines(&entry.content);
        let lines = if self.options.trim_blank_lines {
            trim_blank_edges(&lines)
        } else {
            lines
        };
        let mut body = lines.concat();

        let mut redactions = 0;
        if let Some(redactor) = &self.redactor {
            let redacted = redactor.redact(&body);
            redactions = redacted.count;
            body = redacted.content;
        }

        let all_lines = split_lines(&body);
        let total = all_lines.len();
        let shown = self
            .options
            .line_limit
            .cap()
            .map_or(total, |cap| cap.min(total));
        let truncated = shown < total;
        let body = all_lines[..shown].concat();
        if truncated {
            log::debug!("Truncated {} to {} of {} lines", entry.title, shown, total);
        }

        let stats = EntryStats {
            lines: shown,
            truncated,
            redactions,
        };

        if self.options.raw_output {
            if !first && !buffer.is_empty() && !buffer.ends_with('\n') {
                buffer.push('\n');
            }
            buffer.push_str(&body);
            return stats;
        }

        if !first {
            buffer.push('\n');
        }
        let note = truncated.then(|| format!("showing {} of {} lines", shown, total));
        self.push_header(buffer, &entry.title, note.as_deref());
        buffer.push_str(&body);
        if !body.is_empty() && !body.ends_with('\n') {
            buffer.push('\n');
        }
        if self.options.delimiter_closure {
            self.push_closure(buffer, &entry.title);
        }
        stats
    }

    fn push_header(&self, buffer: &mut String, title: &str, note: Option<&str>) {
        match self.options.delimiter_style {
            DelimiterStyle::None => {}
            DelimiterStyle::Basic => match note {
                Some(n) => buffer.push_str(&format!("--- {} ({}) ---\n", title, n)),
                None => buffer.push_str(&format!("--- {} ---\n", title)),
            },
            DelimiterStyle::Boxed => {
                let mut rows = vec![title.to_string()];
                if let Some(ctx) = self.context.filter(|c| !c.trim().is_empty()) {
                    rows.push(format!("context: {}", ctx.trim()));
                }
                if let Some(n) = note {
                    rows.push(n.to_string());
                }
                buffer.push_str(&boxed(&rows));
            }
        }
    }

    fn push_closure(&self, buffer: &mut String, title: &str) {
        match self.options.delimiter_style {
            DelimiterStyle::None => {}
            DelimiterStyle::Basic => buffer.push_str(&format!("--- end of {} ---\n", title)),
            DelimiterStyle::Boxed => buffer.push_str(&format!("└─ end of {} ─┘\n", title)),
        }
    }
}

fn boxed(rows: &[String]) -> String {
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let rule = "─".repeat(width + 2);
    let mut out = format!("┌{}┐\n", rule);
    for row in rows {
        out.push_str(&format!("│ {:<width$} │\n", row, width = width));
    }
    out.push_str(&format!("└{}┘\n", rule));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concat::options::LineLimit;
    use std::num::NonZeroUsize;

    fn render(options: &RenderOptions, map: &IgnoreMap, entries: &[Entry]) -> String {
        let renderer = Renderer::new(options, map, Some("Service API"));
        let mut buffer = String::new();
        for (i, e) in entries.iter().enumerate() {
            renderer.push(&mut buffer, e, i == 0);
        }
        buffer
    }

    fn entry(title: &str, content: &str) -> Entry {
        Entry {
            title: title.into(),
            content: content.into(),
        }
    }

    #[test]
    fn boxed_header_frames_title_and_context() {
        let options = RenderOptions::default();
        let out = render(&options, &IgnoreMap::default(), &[entry("src/a.rs", "fn a() {}\n")]);
        let expected = "\
┌──────────────────────┐
│ src/a.rs             │
│ context: Service API │
└──────────────────────┘
fn a() {}
";
        assert_eq!(out, expected);
    }

    #[test]
    fn basic_header_notes_truncation_and_closure() {
        let options = RenderOptions {
            delimiter_style: DelimiterStyle::Basic,
            delimiter_closure: true,
            line_limit: LineLimit::Limited(NonZeroUsize::new(1).unwrap()),
            ..RenderOptions::default()
        };
        let out = render(
            &options,
            &IgnoreMap::default(),
            &[entry("a.txt", "one\ntwo\n"), entry("b.txt", "three")],
        );
        assert_eq!(
            out,
            "--- a.txt (showing 1 of 2 lines) ---\none\n--- end of a.txt ---\n\
             \n--- b.txt ---\nthree\n--- end of b.txt ---\n"
        );
    }

    #[test]
    fn none_style_separates_entries_without_headers() {
        let options = RenderOptions {
            delimiter_style: DelimiterStyle::None,
            delimiter_closure: true,
            ..RenderOptions::default()
        };
        let out = render(&options, &IgnoreMap::default(), &[entry("a", "x\n"), entry("b", "y\n")]);
        assert_eq!(out, "x\n\ny\n");
    }

    #[test]
    fn raw_output_passes_content_through() {
        let options = RenderOptions {
            raw_output: true,
            delimiter_closure: true,
            ..RenderOptions::default()
        };
        let out = render(
            &options,
            &IgnoreMap::default(),
            &[entry("a", "\n\nfn a() {}\r\n"), entry("b", "fn b() {}")],
        );
        assert_eq!(out, "fn a() {}\r\nfn b() {}");
    }

    #[test]
    fn stats_report_lines_after_truncation() {
        let options = RenderOptions {
            line_limit: LineLimit::Limited(NonZeroUsize::new(3).unwrap()),
            ..RenderOptions::default()
        };
        let map = IgnoreMap::default();
        let renderer = Renderer::new(&options, &map, None);
        let mut buffer = String::new();
        let stats = renderer.push(&mut buffer, &entry("a", "1\n2\n3\n4\n5\n"), true);
        assert_eq!(stats.lines, 3);
        assert!(stats.truncated);
        assert!(buffer.contains("showing 3 of 5 lines"));
    }
}

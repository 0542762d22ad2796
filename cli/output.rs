use colored::*;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table, presets::UTF8_FULL};
use concat_core::{ConcatSummary, Diagnostic, JobOutcome, RunReport, Selection};

pub fn print_run_report(report: &RunReport, selection: &Selection, verbose: bool) {
    match selection {
        Selection::ConAny(_) => print_block_outcomes(&report.outcomes),
        _ => {
            for outcome in &report.outcomes {
                match outcome.summary() {
                    Some(summary) => print_success(summary),
                    None => eprintln!(
                        "{} No files matched; {} was not written.",
                        "Note:".yellow().bold(),
                        outcome.output.display()
                    ),
                }
            }
        }
    }
    print_notes(&report.notes);
    print_diagnostics(&report.diagnostics, verbose);
}

fn print_success(summary: &ConcatSummary) {
    println!("{} {}", "✅".green(), "Concatenation ok".green().bold());
    println!("   source: {}", summary.output.display().to_string().blue());
    println!("   {} lines concatenated", summary.total_lines);
    if summary.truncated > 0 {
        println!("   {} entries truncated", summary.truncated.to_string().yellow());
    }
    if summary.redactions > 0 {
        println!("   {} values redacted", summary.redactions.to_string().yellow());
    }
}

fn print_block_outcomes(outcomes: &[JobOutcome]) {
    for outcome in outcomes.iter().filter(|o| o.summary().is_none()) {
        eprintln!(
            "{} No files matched block → {}",
            "Note:".yellow().bold(),
            outcome.name
        );
    }

    if let [single] = outcomes {
        if let Some(summary) = single.summary() {
            print_success(summary);
        }
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Block").fg(Color::Green),
            Cell::new("Output").fg(Color::Green),
            Cell::new("Files").fg(Color::Green),
            Cell::new("Lines").fg(Color::Green),
            Cell::new("Truncated").fg(Color::Green),
            Cell::new("Redacted").fg(Color::Green),
        ]);

    let mut total_lines = 0usize;
    for outcome in outcomes {
        let output = outcome.output.display().to_string();
        match outcome.summary() {
            Some(s) => {
                total_lines += s.total_lines;
                table.add_row(vec![
                    Cell::new(&outcome.name),
                    Cell::new(output),
                    Cell::new(s.entries_written).set_alignment(CellAlignment::Right),
                    Cell::new(s.total_lines).set_alignment(CellAlignment::Right),
                    Cell::new(s.truncated).set_alignment(CellAlignment::Right),
                    Cell::new(s.redactions).set_alignment(CellAlignment::Right),
                ]);
            }
            None => {
                table.add_row(vec![
                    Cell::new(&outcome.name),
                    Cell::new(output).fg(Color::DarkGrey),
                    Cell::new("-").set_alignment(CellAlignment::Right),
                    Cell::new("-").set_alignment(CellAlignment::Right),
                    Cell::new("-").set_alignment(CellAlignment::Right),
                    Cell::new("-").set_alignment(CellAlignment::Right),
                ]);
            }
        }
    }
    println!("{table}");
    println!(
        "{} Blocks: {}, total lines: {}.",
        "Done.".green().bold(),
        outcomes.len(),
        total_lines
    );
}

fn print_notes(notes: &[String]) {
    if notes.is_empty() {
        return;
    }
    eprintln!("\n{}", "Matched:".cyan().bold());
    for note in notes {
        eprintln!("  - {}", note);
    }
}

fn print_diagnostics(diagnostics: &[Diagnostic], verbose: bool) {
    if diagnostics.is_empty() {
        return;
    }
    if verbose {
        eprintln!("\n{}", "Skipped:".yellow().bold());
        for d in diagnostics {
            eprintln!("  - {} {}", d.subject.blue(), d.reason.to_string().dimmed());
        }
    } else {
        eprintln!(
            "{} {} entries skipped (use --verbose-out to list them)",
            "Note:".yellow().bold(),
            diagnostics.len()
        );
    }
}

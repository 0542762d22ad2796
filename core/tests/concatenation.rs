use concat_core::{
    ConAnyConfig, ConfigureConfig, ConselectConfig, DelimiterStyle, IgnoreMap, LineLimit,
    Outcome, Pipeline, RenderOptions, ResolveContext, RunReport, ScanConfig, Scanner, Selection,
    matches,
};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn project() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().canonicalize().unwrap();
    (tmp, root)
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn run(root: &Path, map: &IgnoreMap, options: &RenderOptions, selection: Selection) -> RunReport {
    let ctx = ResolveContext::new(root.to_path_buf(), map);
    Pipeline::new(ctx, options).run(&selection).unwrap()
}

fn numbered(n: usize) -> String {
    (1..=n).map(|i| format!("line {}\n", i)).collect()
}

#[test]
fn wildcard_and_literal_patterns() {
    assert!(matches("main.rs", "*.rs"));
    assert!(matches("main.rs", "main.rs"));
    assert!(matches("anything", "*"));
    assert!(matches("test_util.rs", "test_*.rs"));
    assert!(!matches("main.rs", "*.py"));
    assert!(!matches("main.rs", "Main.rs"));
    assert!(!matches("main.rs.bak", "*.rs"));
}

#[test]
fn ignore_map_union_is_commutative_and_idempotent() {
    let a = IgnoreMap::new(["*.log"], ["target"], vec![("tok".to_string(), "[T]".to_string())])
        .unwrap();
    let b = IgnoreMap::new(["*.lock"], ["node_modules"], Vec::new()).unwrap();

    let ab = a.union(&b).unwrap();
    assert_eq!(ab, b.union(&a).unwrap());
    assert_eq!(a.union(&a).unwrap(), a);
    assert!(ab.is_ignored("debug.log"));
    assert!(ab.is_ignored("Cargo.lock"));
    assert!(ab.is_ignored_dir("node_modules"));
    assert_eq!(ab.obscure("tok"), "[T]");
}

#[test]
fn conflicting_redactions_are_rejected() {
    let a = IgnoreMap::new(Vec::<String>::new(), Vec::<String>::new(), vec![(
        "tok".to_string(),
        "[A]".to_string(),
    )])
    .unwrap();
    let b = IgnoreMap::new(Vec::<String>::new(), Vec::<String>::new(), vec![(
        "tok".to_string(),
        "[B]".to_string(),
    )])
    .unwrap();
    assert!(a.union(&b).is_err());
}

#[test]
fn scan_skips_dotfiles_and_excluded_directories() {
    let (_tmp, root) = project();
    write(&root, "src/main.rs", "fn main() {}\n");
    write(&root, ".env", "KEY=1\n");
    write(&root, ".hidden/inner.rs", "x\n");
    write(&root, "target/debug/out.rs", "y\n");

    let map = IgnoreMap::new(Vec::<String>::new(), ["target"], Vec::new()).unwrap();
    let files = Scanner::new(&root, &map).scan().unwrap();
    let names: Vec<String> = files.iter().map(|f| f.display_path(true)).collect();
    assert_eq!(names, vec![Path::new("src").join("main.rs").to_string_lossy().into_owned()]);
}

#[test]
fn depth_zero_stays_in_the_root() {
    let (_tmp, root) = project();
    write(&root, "top.txt", "top\n");
    write(&root, "sub/deep.txt", "deep\n");

    let map = IgnoreMap::default();
    let files = Scanner::new(&root, &map).max_depth(Some(0)).scan().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name(), "top.txt");
}

#[test]
fn long_files_are_truncated_to_the_line_limit() {
    let (_tmp, root) = project();
    write(&root, "long.txt", &numbered(100));

    let map = IgnoreMap::default();
    let options = RenderOptions {
        line_limit: LineLimit::Limited(NonZeroUsize::new(10).unwrap()),
        delimiter_style: DelimiterStyle::Basic,
        ..RenderOptions::default()
    };
    let report = run(&root, &map, &options, Selection::Scan(ScanConfig::default()));
    let summary = report.outcomes[0].summary().unwrap();
    assert_eq!(summary.total_lines, 10);
    assert_eq!(summary.truncated, 1);

    let written = fs::read_to_string(root.join("concatenation.txt")).unwrap();
    assert!(written.starts_with("--- long.txt (showing 10 of 100 lines) ---\n"));
    assert!(written.contains("line 10\n"));
    assert!(!written.contains("line 11\n"));
}

#[test]
fn unlimited_keeps_every_line() {
    let (_tmp, root) = project();
    write(&root, "long.txt", &numbered(12_000));

    let map = IgnoreMap::default();
    let options = RenderOptions {
        line_limit: LineLimit::from_flag(Some(0)),
        ..RenderOptions::default()
    };
    let report = run(&root, &map, &options, Selection::Scan(ScanConfig::default()));
    assert_eq!(report.total_lines(), 12_000);
}

#[test]
fn obscure_values_are_redacted_unless_secrets_allowed() {
    let (_tmp, root) = project();
    write(&root, "cfg.txt", "user=SECRET123\nagain SECRET123\n");
    let map = IgnoreMap::new(Vec::<String>::new(), Vec::<String>::new(), vec![(
        "SECRET123".to_string(),
        "[REDACTED]".to_string(),
    )])
    .unwrap();

    let options = RenderOptions {
        delimiter_style: DelimiterStyle::None,
        ..RenderOptions::default()
    };
    let report = run(&root, &map, &options, Selection::Scan(ScanConfig::default()));
    assert_eq!(report.outcomes[0].summary().unwrap().redactions, 2);
    let written = fs::read_to_string(root.join("concatenation.txt")).unwrap();
    assert_eq!(written, "user=[REDACTED]\nagain [REDACTED]\n");

    let allowed = RenderOptions {
        allow_secrets: true,
        ..options
    };
    run(&root, &map, &allowed, Selection::Scan(ScanConfig::default()));
    let written = fs::read_to_string(root.join("concatenation.txt")).unwrap();
    assert_eq!(written, "user=SECRET123\nagain SECRET123\n");
}

#[test]
fn raw_output_is_the_plain_concatenation() {
    let (_tmp, root) = project();
    write(&root, "a.txt", "alpha\r\nbeta\r\n");
    write(&root, "b.txt", "gamma\n");

    let map = IgnoreMap::default();
    let options = RenderOptions {
        raw_output: true,
        ..RenderOptions::default()
    };
    run(&root, &map, &options, Selection::Scan(ScanConfig::default()));
    let written = fs::read(root.join("concatenation.txt")).unwrap();
    assert_eq!(written, b"alpha\r\nbeta\r\ngamma\n");
}

#[test]
fn conselect_keeps_declaration_order() {
    let (_tmp, root) = project();
    write(&root, "a.txt", "A\n");
    write(&root, "b.txt", "B\n");
    write(&root, "c.txt", "C\n");

    let map = IgnoreMap::default();
    let options = RenderOptions {
        raw_output: true,
        ..RenderOptions::default()
    };
    let selection = Selection::Conselect(ConselectConfig::new(["c.txt", "*.txt", "!b.txt"]));
    run(&root, &map, &options, selection);
    let written = fs::read_to_string(root.join("conselection.txt")).unwrap();
    assert_eq!(written, "C\nA\n");
}

#[test]
fn explicit_selections_honour_directory_exclusions() {
    let (_tmp, root) = project();
    write(&root, ".kube/config", "token: abc\n");
    write(&root, "build/gen.rs", "gen\n");
    write(&root, "src/lib.rs", "lib\n");

    let map = IgnoreMap::new(Vec::<String>::new(), ["build"], Vec::new()).unwrap();
    let options = RenderOptions {
        raw_output: true,
        ..RenderOptions::default()
    };
    let selection =
        Selection::Conselect(ConselectConfig::new([".kube/config", "build/*.rs", "src/lib.rs"]));
    let report = run(&root, &map, &options, selection);

    let written = fs::read_to_string(root.join("conselection.txt")).unwrap();
    assert_eq!(written, "lib\n");
    assert_eq!(report.diagnostics.len(), 2);
}

#[test]
fn configure_extracts_between_markers() {
    let (_tmp, root) = project();
    write(&root, "doc.txt", "A\nBEGIN\nB\nC\nEND\nD\n");
    let config = ConfigureConfig::parse_str(
        "[[filter]]\nfile = \"doc.txt\"\nstart = \"BEGIN\"\nend = \"END\"\n",
        Path::new(".configure"),
    )
    .unwrap();

    let map = IgnoreMap::default();
    let options = RenderOptions {
        raw_output: true,
        ..RenderOptions::default()
    };
    run(&root, &map, &options, Selection::Configure(config));
    let written = fs::read_to_string(root.join("configure.txt")).unwrap();
    assert_eq!(written, "B\nC\n");
}

#[test]
fn empty_selection_writes_nothing() {
    let (_tmp, root) = project();
    write(&root, "notes.md", "notes\n");

    let map = IgnoreMap::default();
    let options = RenderOptions::default();
    let scan = ScanConfig {
        include_files: ["*.rs"].into_iter().collect(),
        ..ScanConfig::default()
    };
    let report = run(&root, &map, &options, Selection::Scan(scan));
    assert!(report.is_empty());
    assert_eq!(report.outcomes[0].result, Outcome::NoMatches);
    assert!(!root.join("concatenation.txt").exists());
}

#[test]
fn conany_blocks_render_independently() {
    let (_tmp, root) = project();
    write(&root, "src/lib.rs", "pub fn lib() {}\n");
    write(&root, "src/gen.rs", "// generated\n");
    write(&root, "docs/guide.md", "# Guide\n");
    write(
        &root,
        ".conany",
        r#"
[[render]]
output = "code.txt"
context = "library code"
include = ["src/**/*.rs"]
exclude = ["gen.rs"]

[[render]]
output = "docs.txt"
include = ["docs/*.md"]

[[render]]
output = "none.txt"
include = ["*.zig"]
"#,
    );
    let config = ConAnyConfig::load_from_path(&root.join(".conany")).unwrap();

    let map = IgnoreMap::default();
    let options = RenderOptions::default();
    let report = run(&root, &map, &options, Selection::ConAny(config));

    assert_eq!(report.outcomes.len(), 3);
    assert!(report.outcomes[0].summary().is_some());
    assert!(report.outcomes[1].summary().is_some());
    assert_eq!(report.outcomes[2].result, Outcome::NoMatches);
    assert!(!report.is_empty());

    let code = fs::read_to_string(root.join("code.txt")).unwrap();
    assert!(code.contains("pub fn lib() {}"));
    assert!(code.contains("context: library code"));
    assert!(!code.contains("generated"));
    assert!(code.contains(&root.join("src/lib.rs").display().to_string()));
    assert!(root.join("docs.txt").is_file());
    assert!(!root.join("none.txt").exists());
}

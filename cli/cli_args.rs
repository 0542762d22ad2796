use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use concat_core::{ConfigKind, DelimiterStyle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Concatenate project files into one annotated text file.",
    long_about = "con gathers files (or snippets of files) from a project tree and writes them \ninto a single delimited text file, redacting secrets along the way. \nSelections come from a directory scan, .conselect, .configure, or .conany.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  con concat -i '*.rs' --de target\n  con select\n  con figure --closure\n  con any --config ../bundle/.conany\n  con tree -e",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, action = ArgAction::Count, global = true, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Project root (default: $CON_ROOT, then the current directory)."
    )]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(visible_alias = "c", about = "Scan directories and concatenate matching files.")]
    Concat(ConcatArgs),

    #[command(visible_alias = "s", about = "Concatenate the files listed in .conselect.")]
    Select(SelectArgs),

    #[command(visible_alias = "f", about = "Concatenate snippets described in .configure.")]
    Figure(FigureArgs),

    #[command(visible_alias = "a", about = "Run every render block in a .conany file.")]
    Any(AnyArgs),

    #[command(visible_alias = "t", about = "Write a hierarchical file tree.")]
    Tree(TreeArgs),

    #[command(about = "Write a template configuration file.")]
    Init(InitArgs),
}

/// Traversal flags shared by every scanning command.
#[derive(Args, Debug, Clone)]
pub struct ScopeOpts {
    #[arg(long = "de", value_name = "DIR", help = "Exclude directories by name (wildcards allowed).", help_heading = "Scope")]
    pub exclude_dirs: Vec<String>,

    #[arg(short = 's', long, value_name = "N", help = "Maximum depth to scan (default: unlimited).", help_heading = "Scope")]
    pub depth: Option<usize>,

    #[arg(long = "all", help = "Scan all subdirectories, ignoring --depth.", help_heading = "Scope")]
    pub all_subdirectories: bool,

    #[arg(long = "dot", help = "Include dotfiles and dot directories.", help_heading = "Scope")]
    pub include_dotfiles: bool,

    #[arg(long = "fe", value_name = "PATTERN", help = "Exclude files by name (wildcards allowed, e.g. '*.log').", help_heading = "Scope")]
    pub exclude_files: Vec<String>,

    #[arg(long, help = "Do not apply the built-in deny-list of sensitive files.", help_heading = "Scope")]
    pub exclude_static_ignores: bool,
}

impl ScopeOpts {
    pub fn max_depth(&self) -> Option<usize> {
        if self.all_subdirectories {
            None
        } else {
            self.depth
        }
    }
}

/// Rendering flags shared by every concatenating command.
#[derive(Args, Debug, Clone)]
pub struct RenderOpts {
    #[arg(short = 'o', long, value_name = "FILE", help = "Output file name.", help_heading = "Output")]
    pub output_file_name: Option<String>,

    #[arg(short = 'l', long, value_name = "N", help = "Maximum lines per entry (default: 10000, 0 = unlimited).", help_heading = "Output")]
    pub line_limit: Option<usize>,

    #[arg(long = "delimiter", value_name = "STYLE", default_value = "boxed", help = "Header style: none, basic, boxed (alias: verbose).", help_heading = "Output")]
    pub delimiter_style: DelimiterStyle,

    #[arg(long = "closure", help = "Add an end-of-entry delimiter.", help_heading = "Output")]
    pub delimiter_closure: bool,

    #[arg(long = "relative", value_name = "BOOL", default_value_t = true, action = ArgAction::Set, help = "Show root-relative paths in headers.", help_heading = "Output")]
    pub relative_paths: bool,

    #[arg(long = "raw", help = "No headers or delimiters; content passes through unchanged.", help_heading = "Output")]
    pub raw_output: bool,

    #[arg(long = "keep-blank-edges", help = "Keep leading and trailing blank lines of each entry.", help_heading = "Output")]
    pub keep_blank_edges: bool,

    #[arg(short = 'c', long, help = "Also copy the output to the clipboard.", help_heading = "Output")]
    pub copy_to_clipboard: bool,

    #[arg(long = "verbose-out", help = "Report every skipped entry and every match.", help_heading = "Output")]
    pub verbose_output: bool,

    #[arg(short = 'a', long, help = "Disable secret redaction.", help_heading = "Secrets")]
    pub allow_secrets: bool,

    #[arg(short = 'n', long = "no-deep-inspect", help = "Only redact known secret shapes; skip the entropy heuristic.", help_heading = "Secrets")]
    pub no_deep_inspect: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ConcatArgs {
    #[arg(short = 'd', long, value_name = "DIR", help = "Directories to scan, relative to the root (default: the root).")]
    pub directories: Vec<String>,

    #[arg(short = 'i', long, value_name = "PATTERN", default_value = "*", help = "Include files by name (wildcards allowed, e.g. '*.rs').")]
    pub include_files: Vec<String>,

    #[clap(flatten)]
    pub scope: ScopeOpts,

    #[clap(flatten)]
    pub render: RenderOpts,
}

#[derive(Args, Debug, Clone)]
pub struct SelectArgs {
    #[arg(long = "select", value_name = "PATH", help = "Path to the selection file (default: <root>/.conselect).")]
    pub select_file: Option<PathBuf>,

    #[clap(flatten)]
    pub scope: ScopeOpts,

    #[clap(flatten)]
    pub render: RenderOpts,
}

#[derive(Args, Debug, Clone)]
pub struct FigureArgs {
    #[arg(long = "figure", value_name = "PATH", help = "Path to the snippet file (default: <root>/.configure).")]
    pub figure_file: Option<PathBuf>,

    #[clap(flatten)]
    pub scope: ScopeOpts,

    #[clap(flatten)]
    pub render: RenderOpts,
}

#[derive(Args, Debug, Clone)]
pub struct AnyArgs {
    #[arg(long = "config", value_name = "PATH", help = "Path to the block file (default: <root>/.conany).")]
    pub config_path: Option<PathBuf>,

    #[clap(flatten)]
    pub scope: ScopeOpts,

    #[clap(flatten)]
    pub render: RenderOpts,
}

#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    #[arg(short = 'd', long, value_name = "DIR", help = "Directory to render, relative to the root (default: the root).")]
    pub directory: Option<String>,

    #[arg(short = 'i', long, value_name = "PATTERN", default_value = "*", help = "Include files by name (wildcards allowed).")]
    pub include_files: Vec<String>,

    #[clap(flatten)]
    pub scope: ScopeOpts,

    #[arg(short = 'e', long, help = "Include empty files and directories.")]
    pub include_empty: bool,

    #[arg(long, help = "Do not suffix directories with '/'.")]
    pub no_trailing_slash: bool,

    #[arg(short = 'c', long, help = "Also copy the tree to the clipboard.")]
    pub copy_to_clipboard: bool,

    #[arg(long, help = "Copy to the clipboard instead of writing a file.")]
    pub clean: bool,

    #[arg(short = 'o', long, value_name = "FILE", default_value = "tree", help = "Output file name.")]
    pub output_file_name: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitKind {
    Ignore,
    Select,
    Figure,
    Any,
}

impl From<InitKind> for ConfigKind {
    fn from(kind: InitKind) -> Self {
        match kind {
            InitKind::Ignore => ConfigKind::Conignore,
            InitKind::Select => ConfigKind::Conselect,
            InitKind::Figure => ConfigKind::Configure,
            InitKind::Any => ConfigKind::ConAny,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    #[arg(value_enum, help = "Which configuration file to create.")]
    pub kind: InitKind,

    #[arg(long, help = "Overwrite an existing file.")]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn concat_defaults_match_documented_behaviour() {
        let cli = Cli::parse_from(["con", "concat"]);
        let Some(Commands::Concat(args)) = cli.command else {
            panic!("expected concat");
        };
        assert_eq!(args.include_files, vec!["*".to_string()]);
        assert_eq!(args.render.delimiter_style, DelimiterStyle::Boxed);
        assert!(args.render.relative_paths);
        assert_eq!(args.render.line_limit, None);
        assert_eq!(args.scope.max_depth(), None);
    }

    #[test]
    fn flags_parse_into_options() {
        let cli = Cli::parse_from([
            "con", "select", "--delimiter", "verbose", "--relative", "false", "-l", "0", "-s",
            "2", "--fe", "*.log", "-n",
        ]);
        let Some(Commands::Select(args)) = cli.command else {
            panic!("expected select");
        };
        assert_eq!(args.render.delimiter_style, DelimiterStyle::Boxed);
        assert!(!args.render.relative_paths);
        assert_eq!(args.render.line_limit, Some(0));
        assert_eq!(args.scope.max_depth(), Some(2));
        assert_eq!(args.scope.exclude_files, vec!["*.log".to_string()]);
        assert!(args.render.no_deep_inspect);
    }
}

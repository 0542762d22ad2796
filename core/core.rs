pub mod concat;
pub mod config;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod ignore_map;
pub mod init;
pub mod pattern;
pub mod pipeline;
pub mod redact;
pub mod reference;
pub mod scanner;
pub mod selection;
pub mod text;
pub mod tree;

pub use concat::{
    ClipboardSink, ConcatSummary, DelimiterStyle, FileConcatenator, LineLimit, RenderOptions,
    SnippetConcatenator,
};
pub use config::{
    ConAnyConfig, ConfigureConfig, ConselectConfig, Filter, RenderBlock, SelectEntry,
    SnippetSelector, determine_root,
};
pub use defaults::{StaticDefaults, static_defaults};
pub use diagnostics::{Diagnostic, Diagnostics, SkipReason};
pub use error::{AppError, Result};
pub use ignore_map::IgnoreMap;
pub use init::{ConfigKind, InitOutcome, initialize};
pub use pattern::{PatternSet, matches};
pub use pipeline::{JobOutcome, Outcome, Pipeline, RunReport};
pub use redact::{Redacted, Redactor};
pub use reference::{FileReference, Snippet, SnippetReference};
pub use scanner::{ScanEntry, Scanner};
pub use selection::{ResolveContext, ResolvedJob, ResolvedSet, ScanConfig, Selection};
pub use tree::FileTreeMaker;

use crate::config::SnippetSelector;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// A resolved file: absolute path plus the root it was found under.
/// Two references are equal when their absolute paths are.
#[derive(Debug, Clone, Eq)]
pub struct FileReference {
    path: PathBuf,
    root: PathBuf,
}

impl FileReference {
    pub fn new(path: PathBuf, root: PathBuf) -> Self {
        Self { path, root }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn relative_path(&self) -> PathBuf {
        pathdiff::diff_paths(&self.path, &self.root).unwrap_or_else(|| self.path.clone())
    }

    /// Root-relative when `relative` is set, absolute otherwise.
    pub fn display_path(&self, relative: bool) -> String {
        if relative {
            self.relative_path().to_string_lossy().into_owned()
        } else {
            self.path.to_string_lossy().into_owned()
        }
    }
}

impl PartialEq for FileReference {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Hash for FileReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetReference {
    pub file: FileReference,
    pub selector: SnippetSelector,
    pub label: Option<String>,
}

impl SnippetReference {
    pub fn title(&self, relative: bool) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        let path = self.file.display_path(relative);
        match &self.selector {
            SnippetSelector::Whole => path,
            SnippetSelector::Lines { start, end } => format!("{} (lines {}-{})", path, start, end),
            SnippetSelector::Markers { start, end } => {
                format!("{} ({} .. {})", path, start.trim(), end.trim())
            }
        }
    }
}

/// Extracted snippet text ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub reference: SnippetReference,
    pub content: String,
}

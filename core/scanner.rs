use crate::defaults::static_defaults;
use crate::error::{AppError, Result};
use crate::ignore_map::IgnoreMap;
use crate::pattern::PatternSet;
use crate::reference::FileReference;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEntry {
    File(FileReference),
    /// Only produced when empty entries are requested (tree rendering).
    EmptyDir(FileReference),
}

impl ScanEntry {
    pub fn reference(&self) -> &FileReference {
        match self {
            ScanEntry::File(r) | ScanEntry::EmptyDir(r) => r,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, ScanEntry::EmptyDir(_))
    }
}

/// Depth-first, lexicographically ordered directory scanner.
///
/// `max_depth = None` is unlimited; `Some(0)` yields only the root's direct
/// file children.
pub struct Scanner<'a> {
    root: PathBuf,
    display_root: Option<PathBuf>,
    max_depth: Option<usize>,
    include_files: PatternSet,
    exclude_files: PatternSet,
    exclude_dirs: PatternSet,
    include_dotfiles: bool,
    include_empty: bool,
    ignore_map: &'a IgnoreMap,
    ignore_static_defaults: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(root: impl Into<PathBuf>, ignore_map: &'a IgnoreMap) -> Self {
        Self {
            root: root.into(),
            display_root: None,
            max_depth: None,
            include_files: ["*"].into_iter().collect(),
            exclude_files: PatternSet::new(),
            exclude_dirs: PatternSet::new(),
            include_dotfiles: false,
            include_empty: false,
            ignore_map,
            ignore_static_defaults: true,
        }
    }

    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Name patterns a file must match (at least one) to be included.
    pub fn include_files(mut self, patterns: PatternSet) -> Self {
        self.include_files = patterns;
        self
    }

    pub fn exclude_files(mut self, patterns: PatternSet) -> Self {
        self.exclude_files = patterns;
        self
    }

    pub fn exclude_dirs(mut self, patterns: PatternSet) -> Self {
        self.exclude_dirs = patterns;
        self
    }

    pub fn include_dotfiles(mut self, include: bool) -> Self {
        self.include_dotfiles = include;
        self
    }

    /// Record empty directories and zero-byte files.
    pub fn include_empty(mut self, include: bool) -> Self {
        self.include_empty = include;
        self
    }

    pub fn ignore_static_defaults(mut self, enabled: bool) -> Self {
        self.ignore_static_defaults = enabled;
        self
    }

    /// Root used for display paths of the produced references. Defaults to
    /// the scan root.
    pub fn display_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.display_root = Some(root.into());
        self
    }

    /// Files only, in traversal order.
    pub fn scan(&self) -> Result<Vec<FileReference>> {
        Ok(self
            .scan_entries()?
            .into_iter()
            .filter_map(|e| match e {
                ScanEntry::File(r) => Some(r),
                ScanEntry::EmptyDir(_) => None,
            })
            .collect())
    }

    pub fn scan_entries(&self) -> Result<Vec<ScanEntry>> {
        let root = self.canonical_root()?;
        let display_root = self.display_root.clone().unwrap_or_else(|| root.clone());
        log::debug!(
            "Scanning {} (max depth: {:?}, dotfiles: {})",
            root.display(),
            self.max_depth,
            self.include_dotfiles
        );

        let mut walker = WalkDir::new(&root).follow_links(false).sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth + 1);
        }

        let mut entries = Vec::new();
        for entry_result in walker.into_iter().filter_entry(|e| self.descend_into(e)) {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Error walking directory: {}", e);
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            let path = entry.path();
            let name = entry.file_name().to_string_lossy();

            if entry.file_type().is_dir() {
                if self.include_empty && is_empty_dir(path) {
                    log::trace!("Recording empty directory: {}", path.display());
                    entries.push(ScanEntry::EmptyDir(FileReference::new(
                        path.to_path_buf(),
                        display_root.clone(),
                    )));
                }
                continue;
            }

            // Symlinks are followed for files only; directory links are not descended.
            if !path.is_file() {
                log::trace!("Skipping non-file entry: {}", path.display());
                continue;
            }
            if !self.accepts_file(&name) {
                continue;
            }
            if !self.include_empty && fs::metadata(path).map(|m| m.len() == 0).unwrap_or(false) {
                log::trace!("Skipping empty file: {}", path.display());
                continue;
            }
            log::trace!("Including file: {}", path.display());
            entries.push(ScanEntry::File(FileReference::new(
                path.to_path_buf(),
                display_root.clone(),
            )));
        }

        log::debug!("Scan of {} produced {} entries", root.display(), entries.len());
        Ok(entries)
    }

    fn canonical_root(&self) -> Result<PathBuf> {
        let root = self
            .root
            .canonicalize()
            .map_err(|_| AppError::path(&self.root, "does not exist"))?;
        if !root.is_dir() {
            return Err(AppError::path(root, "is not a directory"));
        }
        Ok(root)
    }

    fn descend_into(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        if !self.include_dotfiles && name.starts_with('.') {
            log::trace!("Skipping dot entry: {}", entry.path().display());
            return false;
        }
        if entry.file_type().is_dir() && self.rejects_dir(&name) {
            log::trace!("Not descending into: {}", entry.path().display());
            return false;
        }
        true
    }

    pub(crate) fn rejects_dir(&self, name: &str) -> bool {
        self.exclude_dirs.matches(name)
            || self.ignore_map.is_ignored_dir(name)
            || (self.ignore_static_defaults && static_defaults().denies_dir(name))
    }

    /// Include-pattern match, minus every exclusion source. Exclusion wins.
    pub(crate) fn accepts_file(&self, name: &str) -> bool {
        if !self.include_files.matches(name) {
            return false;
        }
        if self.exclude_files.matches(name) || self.ignore_map.is_ignored(name) {
            log::trace!("File excluded by pattern: {}", name);
            return false;
        }
        if self.ignore_static_defaults && static_defaults().denies_file(name) {
            log::trace!("File excluded by static defaults: {}", name);
            return false;
        }
        true
    }
}

fn is_empty_dir(path: &Path) -> bool {
    fs::read_dir(path)
        .map(|mut it| it.next().is_none())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, format!("// {}\n", rel)).unwrap();
    }

    fn rels(refs: &[FileReference]) -> Vec<String> {
        refs.iter().map(|r| r.display_path(true)).collect()
    }

    fn sample_tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(root, "b.rs");
        touch(root, "a.rs");
        touch(root, ".hidden.rs");
        touch(root, ".config/settings.rs");
        touch(root, "src/lib.rs");
        touch(root, "src/nested/deep.rs");
        touch(root, "target/out.rs");
        touch(root, "notes.txt");
        tmp
    }

    #[test]
    fn scan_is_lexicographic_and_depth_first() {
        let tmp = sample_tree();
        let ignore = IgnoreMap::default();
        let files = Scanner::new(tmp.path(), &ignore).scan().unwrap();
        assert_eq!(
            rels(&files),
            vec![
                "a.rs",
                "b.rs",
                "notes.txt",
                "src/lib.rs",
                "src/nested/deep.rs",
                "target/out.rs"
            ]
        );
    }

    #[test]
    fn dotfiles_are_opt_in() {
        let tmp = sample_tree();
        let ignore = IgnoreMap::default();
        let default_scan = rels(&Scanner::new(tmp.path(), &ignore).scan().unwrap());
        assert!(!default_scan.iter().any(|p| p.contains(".hidden")));
        assert!(!default_scan.iter().any(|p| p.contains(".config")));

        let with_dots = rels(
            &Scanner::new(tmp.path(), &ignore)
                .include_dotfiles(true)
                .scan()
                .unwrap(),
        );
        assert!(with_dots.contains(&".hidden.rs".to_string()));
        assert!(with_dots.contains(&".config/settings.rs".to_string()));
    }

    #[test]
    fn excluded_directories_are_not_descended() {
        let tmp = sample_tree();
        let ignore = IgnoreMap::new(Vec::<String>::new(), vec!["target"], Vec::new()).unwrap();
        let files = rels(
            &Scanner::new(tmp.path(), &ignore)
                .exclude_dirs(["nested"].into_iter().collect())
                .scan()
                .unwrap(),
        );
        assert!(!files.iter().any(|p| p.starts_with("target")));
        assert!(!files.iter().any(|p| p.contains("nested")));
        assert!(files.contains(&"src/lib.rs".to_string()));
    }

    #[test]
    fn depth_zero_keeps_only_root_files() {
        let tmp = sample_tree();
        let ignore = IgnoreMap::default();
        let files = rels(
            &Scanner::new(tmp.path(), &ignore)
                .max_depth(Some(0))
                .scan()
                .unwrap(),
        );
        assert_eq!(files, vec!["a.rs", "b.rs", "notes.txt"]);

        let depth_one = rels(
            &Scanner::new(tmp.path(), &ignore)
                .max_depth(Some(1))
                .scan()
                .unwrap(),
        );
        assert!(depth_one.contains(&"src/lib.rs".to_string()));
        assert!(!depth_one.contains(&"src/nested/deep.rs".to_string()));
    }

    #[test]
    fn include_and_exclude_patterns_combine() {
        let tmp = sample_tree();
        let ignore = IgnoreMap::new(vec!["b.*"], Vec::<String>::new(), Vec::new()).unwrap();
        let files = rels(
            &Scanner::new(tmp.path(), &ignore)
                .include_files(["*.rs"].into_iter().collect())
                .exclude_files(["deep.rs"].into_iter().collect())
                .scan()
                .unwrap(),
        );
        assert_eq!(files, vec!["a.rs", "src/lib.rs", "target/out.rs"]);
    }

    #[test]
    fn static_defaults_can_be_disabled() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "server.pem");
        touch(tmp.path(), "main.rs");
        let ignore = IgnoreMap::default();
        let guarded = rels(&Scanner::new(tmp.path(), &ignore).scan().unwrap());
        assert_eq!(guarded, vec!["main.rs"]);
        let open = rels(
            &Scanner::new(tmp.path(), &ignore)
                .ignore_static_defaults(false)
                .scan()
                .unwrap(),
        );
        assert_eq!(open, vec!["main.rs", "server.pem"]);
    }

    #[test]
    fn empty_entries_only_when_requested() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("void")).unwrap();
        fs::write(tmp.path().join("blank.txt"), "").unwrap();
        touch(tmp.path(), "full.txt");
        let ignore = IgnoreMap::default();

        let plain = Scanner::new(tmp.path(), &ignore).scan_entries().unwrap();
        assert_eq!(plain.len(), 1);

        let all = Scanner::new(tmp.path(), &ignore)
            .include_empty(true)
            .scan_entries()
            .unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().any(|e| e.is_dir() && e.reference().file_name() == "void"));
    }

    #[test]
    fn missing_root_is_a_path_error() {
        let tmp = TempDir::new().unwrap();
        let ignore = IgnoreMap::default();
        let err = Scanner::new(tmp.path().join("missing"), &ignore)
            .scan()
            .unwrap_err();
        assert!(matches!(err, AppError::Path { .. }));
    }

    #[test]
    fn root_without_matches_yields_empty_set() {
        let tmp = sample_tree();
        let ignore = IgnoreMap::default();
        let files = Scanner::new(tmp.path(), &ignore)
            .include_files(["*.nothing"].into_iter().collect())
            .scan()
            .unwrap();
        assert!(files.is_empty());
    }
}

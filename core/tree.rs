use crate::scanner::ScanEntry;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Default)]
struct Node {
    is_dir: bool,
    children: BTreeMap<String, Node>,
}

/// Renders scanner output as an indented tree rooted at `root`.
pub struct FileTreeMaker {
    root: PathBuf,
    entries: Vec<ScanEntry>,
    trailing_slash: bool,
}

impl FileTreeMaker {
    pub fn new(root: impl Into<PathBuf>, entries: Vec<ScanEntry>) -> Self {
        Self {
            root: root.into(),
            entries,
            trailing_slash: true,
        }
    }

    /// Directories are suffixed with `/` unless disabled.
    pub fn trailing_slash(mut self, enabled: bool) -> Self {
        self.trailing_slash = enabled;
        self
    }

    pub fn generate(&self) -> String {
        let mut top = Node {
            is_dir: true,
            ..Node::default()
        };
        for entry in &self.entries {
            let relative = entry
                .reference()
                .path()
                .strip_prefix(&self.root)
                .unwrap_or_else(|_| entry.reference().path());
            insert(&mut top, relative, entry.is_dir());
        }

        let root_name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string());
        let mut lines = vec![self.label(&root_name, true)];
        self.walk(&top, "", &mut lines);
        log::debug!("Rendered tree with {} lines", lines.len());
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn label(&self, name: &str, is_dir: bool) -> String {
        if is_dir && self.trailing_slash {
            format!("{}/", name)
        } else {
            name.to_string()
        }
    }

    fn walk(&self, node: &Node, prefix: &str, lines: &mut Vec<String>) {
        let count = node.children.len();
        for (idx, (name, child)) in node.children.iter().enumerate() {
            let is_last = idx + 1 == count;
            let connector = if is_last { "└── " } else { "├── " };
            lines.push(format!("{}{}{}", prefix, connector, self.label(name, child.is_dir)));
            if child.is_dir {
                let extension = if is_last { "    " } else { "│   " };
                self.walk(child, &format!("{}{}", prefix, extension), lines);
            }
        }
    }
}

fn insert(top: &mut Node, relative: &Path, leaf_is_dir: bool) {
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(p) => Some(p.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    let mut node = top;
    let last = parts.len().saturating_sub(1);
    for (i, part) in parts.into_iter().enumerate() {
        node = node.children.entry(part).or_default();
        if i < last || leaf_is_dir {
            node.is_dir = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ignore_map::IgnoreMap;
    use crate::scanner::Scanner;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn renders_nested_entries_with_connectors() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("src/util")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("src/main.rs"), "fn main() {}\n").unwrap();
        fs::write(root.join("src/util/io.rs"), "pub fn io() {}\n").unwrap();
        fs::write(root.join("Cargo.toml"), "[package]\n").unwrap();

        let map = IgnoreMap::default();
        let entries = Scanner::new(&root, &map)
            .include_empty(true)
            .scan_entries()
            .unwrap();
        let tree = FileTreeMaker::new(&root, entries).generate();
        let name = root.file_name().unwrap().to_string_lossy();
        let expected = format!(
            "{name}/\n\
             ├── Cargo.toml\n\
             ├── empty/\n\
             └── src/\n    \
             ├── main.rs\n    \
             └── util/\n        \
             └── io.rs\n"
        );
        assert_eq!(tree, expected);
    }

    #[test]
    fn trailing_slash_can_be_dropped() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("a/b.txt"), "b\n").unwrap();
        let map = IgnoreMap::default();
        let entries = Scanner::new(&root, &map).scan_entries().unwrap();
        let tree = FileTreeMaker::new(&root, entries).trailing_slash(false).generate();
        assert!(tree.ends_with("└── a\n    └── b.txt\n"));
    }
}

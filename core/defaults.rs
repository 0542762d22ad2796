use crate::pattern::PatternSet;
use once_cell::sync::Lazy;

pub const DEFAULT_LINE_LIMIT: usize = 10_000;
pub const DEFAULT_PLACEHOLDER: &str = "[REDACTED]";
pub const SECRET_PLACEHOLDER: &str = "[REDACTED_SECRET]";

pub const CONIGNORE_FILENAME: &str = ".conignore";
pub const CONSELECT_FILENAME: &str = ".conselect";
pub const CONFIGURE_FILENAME: &str = ".configure";
pub const CONANY_FILENAME: &str = ".conany";

pub const DEFAULT_SCAN_OUTPUT: &str = "concatenation.txt";
pub const DEFAULT_SELECT_OUTPUT: &str = "conselection.txt";
pub const DEFAULT_CONFIGURE_OUTPUT: &str = "configure.txt";
pub const DEFAULT_ANY_OUTPUT: &str = "any.txt";

/// Built-in deny-list of file and directory names that tend to hold
/// credentials or key material. Not user-configurable; callers may only
/// switch it off as a whole.
#[derive(Debug)]
pub struct StaticDefaults {
    pub files: PatternSet,
    pub directories: PatternSet,
}

impl StaticDefaults {
    pub fn denies_file(&self, name: &str) -> bool {
        self.files.matches(name)
    }

    pub fn denies_dir(&self, name: &str) -> bool {
        self.directories.matches(name)
    }
}

static STATIC_DEFAULTS: Lazy<StaticDefaults> = Lazy::new(|| StaticDefaults {
    files: [
        ".env",
        ".env.*",
        "*.env",
        "*.pem",
        "*.key",
        "*.p12",
        "*.pfx",
        "*.jks",
        "*.keystore",
        "*.kdbx",
        "*.gpg",
        "*.asc",
        "id_rsa",
        "id_rsa*",
        "id_dsa*",
        "id_ecdsa*",
        "id_ed25519*",
        "*.ppk",
        ".netrc",
        ".npmrc",
        ".pypirc",
        ".htpasswd",
        "credentials",
        "credentials.*",
        "secrets.*",
        "*secret*.json",
        "*.tfstate",
        "*.tfstate.*",
        "service-account*.json",
    ]
    .into_iter()
    .collect(),
    directories: [".ssh", ".gnupg", ".aws", ".azure", ".docker", ".kube"]
        .into_iter()
        .collect(),
});

pub fn static_defaults() -> &'static StaticDefaults {
    &STATIC_DEFAULTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denies_common_key_material() {
        let defaults = static_defaults();
        assert!(defaults.denies_file(".env"));
        assert!(defaults.denies_file(".env.production"));
        assert!(defaults.denies_file("server.pem"));
        assert!(defaults.denies_file("id_ed25519.pub"));
        assert!(defaults.denies_dir(".ssh"));
    }

    #[test]
    fn allows_ordinary_sources() {
        let defaults = static_defaults();
        assert!(!defaults.denies_file("main.rs"));
        assert!(!defaults.denies_file("environment.rs"));
        assert!(!defaults.denies_file("keyboard.c"));
        assert!(!defaults.denies_dir("src"));
    }
}

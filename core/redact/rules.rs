//! Built-in secret patterns, applied after the project's literal redaction
//! table. Provider-specific rules come before the generic assignment rules
//! so a known key shape is replaced whole rather than partially.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct SecretRule {
    pub name: &'static str,
    pub pattern: Regex,
    /// Expanded with capture groups, so assignment rules can keep their key.
    pub replacement: &'static str,
}

fn rule(name: &'static str, pattern: &str, replacement: &'static str) -> SecretRule {
    SecretRule {
        name,
        pattern: Regex::new(pattern).expect("built-in secret pattern must compile"),
        replacement,
    }
}

static SECRET_RULES: Lazy<Vec<SecretRule>> = Lazy::new(|| {
    vec![
        rule("aws_access_key", r"\b(?:AKIA|ASIA)[0-9A-Z]{16}\b", "[REDACTED_SECRET]"),
        rule(
            "aws_secret_key",
            "(?i)(aws[_\\-]?secret[_\\-]?(?:access[_\\-]?)?key['\"]?\\s*[:=]\\s*['\"]?)[A-Za-z0-9/+=]{40}",
            "${1}[REDACTED_SECRET]",
        ),
        rule("github_token", r"\bgh[pousr]_[A-Za-z0-9]{36}\b", "[REDACTED_SECRET]"),
        rule("gitlab_token", r"\bglpat-[A-Za-z0-9\-_]{20,}\b", "[REDACTED_SECRET]"),
        rule("slack_token", r"\bxox[baprs]-[0-9A-Za-z\-]{10,}\b", "[REDACTED_SECRET]"),
        rule(
            "slack_webhook",
            r"https://hooks\.slack\.com/services/T[A-Z0-9]+/B[A-Z0-9]+/[A-Za-z0-9]+",
            "[REDACTED_SECRET]",
        ),
        rule("stripe_key", r"\b[sr]k_(?:live|test)_[A-Za-z0-9]{24,}\b", "[REDACTED_SECRET]"),
        rule("google_api_key", r"\bAIza[0-9A-Za-z\-_]{35}\b", "[REDACTED_SECRET]"),
        rule("npm_token", r"\bnpm_[A-Za-z0-9]{36}\b", "[REDACTED_SECRET]"),
        rule("openai_key", r"\bsk-(?:proj-)?[A-Za-z0-9_\-]{20,}\b", "[REDACTED_SECRET]"),
        rule(
            "private_key_block",
            r"-----BEGIN\s+(?:RSA\s+|DSA\s+|EC\s+|OPENSSH\s+|ENCRYPTED\s+)?PRIVATE\s+KEY-----[\s\S]*?-----END\s+(?:RSA\s+|DSA\s+|EC\s+|OPENSSH\s+|ENCRYPTED\s+)?PRIVATE\s+KEY-----",
            "[REDACTED_SECRET]",
        ),
        rule(
            "jwt",
            r"\beyJ[A-Za-z0-9\-_]+\.eyJ[A-Za-z0-9\-_]+\.[A-Za-z0-9\-_]+\b",
            "[REDACTED_SECRET]",
        ),
        rule(
            "connection_string",
            r"((?:postgres|postgresql|mysql|mongodb(?:\+srv)?|redis|amqp)://[^:/\s]+:)[^@\s]+(@)",
            "${1}[REDACTED_SECRET]${2}",
        ),
        rule(
            "auth_header",
            r"(?i)(Authorization:\s*(?:Bearer|Basic|Token)\s+)[A-Za-z0-9\-_./+=]{16,}",
            "${1}[REDACTED_SECRET]",
        ),
        rule(
            "secret_assignment",
            "(?i)((?:api[_\\-]?key|secret[_\\-]?key|client[_\\-]?secret|auth[_\\-]?token|access[_\\-]?token|password|passwd)['\"]?\\s*[:=]\\s*['\"]?)[A-Za-z0-9\\-_./+=!@#$%^&*]{8,}",
            "${1}[REDACTED_SECRET]",
        ),
    ]
});

pub fn secret_rules() -> &'static [SecretRule] {
    &SECRET_RULES
}

static SAFE_VALUES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$",
        r"(?i)^[0-9a-f]{32}$",
        r"(?i)^[0-9a-f]{40}$",
        r"(?i)^[0-9a-f]{64}$",
        r"^\d+\.\d+\.\d+[\w\-+.]*$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("built-in safe pattern must compile"))
    .collect()
});

/// UUIDs, hex digests and version strings look random but are not secrets.
pub fn is_safe_value(token: &str) -> bool {
    SAFE_VALUES.iter().any(|re| re.is_match(token))
}

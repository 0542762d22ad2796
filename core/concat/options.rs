use crate::defaults::DEFAULT_LINE_LIMIT;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Per-entry line cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLimit {
    Unlimited,
    Limited(NonZeroUsize),
}

impl LineLimit {
    /// Flag semantics: absent is the default cap, `0` lifts the cap.
    pub fn from_flag(value: Option<usize>) -> Self {
        match value {
            None => Self::default(),
            Some(n) => NonZeroUsize::new(n).map_or(LineLimit::Unlimited, LineLimit::Limited),
        }
    }

    pub fn cap(&self) -> Option<usize> {
        match self {
            LineLimit::Unlimited => None,
            LineLimit::Limited(n) => Some(n.get()),
        }
    }
}

impl Default for LineLimit {
    fn default() -> Self {
        NonZeroUsize::new(DEFAULT_LINE_LIMIT).map_or(LineLimit::Unlimited, LineLimit::Limited)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DelimiterStyle {
    None,
    Basic,
    #[default]
    Boxed,
}

impl FromStr for DelimiterStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(DelimiterStyle::None),
            "basic" => Ok(DelimiterStyle::Basic),
            "boxed" | "verbose" => Ok(DelimiterStyle::Boxed),
            other => Err(format!(
                "unknown delimiter style '{}' (expected none, basic, or boxed)",
                other
            )),
        }
    }
}

impl fmt::Display for DelimiterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DelimiterStyle::None => "none",
            DelimiterStyle::Basic => "basic",
            DelimiterStyle::Boxed => "boxed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub delimiter_style: DelimiterStyle,
    pub delimiter_closure: bool,
    pub line_limit: LineLimit,
    pub trim_blank_lines: bool,
    pub relative_paths: bool,
    /// No headers, closures, or separators; content passes through untouched.
    pub raw_output: bool,
    pub allow_secrets: bool,
    pub deep_secret_inspection: bool,
    pub copy_to_clipboard: bool,
    pub verbose: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            delimiter_style: DelimiterStyle::Boxed,
            delimiter_closure: false,
            line_limit: LineLimit::default(),
            trim_blank_lines: true,
            relative_paths: true,
            raw_output: false,
            allow_secrets: false,
            deep_secret_inspection: true,
            copy_to_clipboard: false,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_limit_flag_semantics() {
        assert_eq!(LineLimit::from_flag(None).cap(), Some(10_000));
        assert_eq!(LineLimit::from_flag(Some(0)), LineLimit::Unlimited);
        assert_eq!(LineLimit::from_flag(Some(25)).cap(), Some(25));
    }

    #[test]
    fn delimiter_style_accepts_verbose_alias() {
        assert_eq!("verbose".parse::<DelimiterStyle>(), Ok(DelimiterStyle::Boxed));
        assert_eq!("Basic".parse::<DelimiterStyle>(), Ok(DelimiterStyle::Basic));
        assert!("fancy".parse::<DelimiterStyle>().is_err());
    }
}

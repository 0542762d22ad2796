use concat_core::{AppError, ClipboardSink};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

#[cfg(target_os = "macos")]
const CANDIDATES: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const CANDIDATES: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CANDIDATES: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Pipes text into the platform's clipboard utility. The first tool that
/// exists on `PATH` wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn pipe_into(program: &str, args: &[&str], text: &str) -> Result<bool, AppError> {
        let mut child = match Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::trace!("Clipboard tool '{}' not found", program);
                return Ok(false);
            }
            Err(e) => {
                return Err(AppError::Clipboard(format!(
                    "failed to start '{}': {}",
                    program, e
                )));
            }
        };

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).map_err(|e| {
                AppError::Clipboard(format!("failed to write to '{}': {}", program, e))
            })?;
        }
        let status = child
            .wait()
            .map_err(|e| AppError::Clipboard(format!("'{}' did not finish: {}", program, e)))?;
        if status.success() {
            log::debug!("Copied {} bytes to clipboard via {}", text.len(), program);
            Ok(true)
        } else {
            Err(AppError::Clipboard(format!("'{}' exited with {}", program, status)))
        }
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy(&self, text: &str) -> concat_core::Result<()> {
        for (program, args) in CANDIDATES {
            if Self::pipe_into(program, args, text)? {
                return Ok(());
            }
        }
        let tried: Vec<&str> = CANDIDATES.iter().map(|(p, _)| *p).collect();
        Err(AppError::Clipboard(format!(
            "no clipboard utility found (tried {})",
            tried.join(", ")
        )))
    }
}

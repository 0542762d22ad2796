use crate::error::Result;

/// Receives the final buffer when copying to the clipboard is requested.
pub trait ClipboardSink {
    fn copy(&self, text: &str) -> Result<()>;
}

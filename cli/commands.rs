pub mod concat;
pub mod init;
pub mod tree;

/// How a concatenating command ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Written,
    /// Every job resolved to an empty set; nothing was written.
    NoMatches,
}

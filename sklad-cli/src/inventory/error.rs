//! Typed errors for the import/export pipeline

/// The input spreadsheet cannot be parsed at all (corrupt bytes, no usable
/// range). Fatal for the import call; the store stays empty.
#[derive(Debug)]
pub struct SourceUnreadable {
    pub path: String,
    pub reason: String,
}

impl std::fmt::Display for SourceUnreadable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "source spreadsheet {} is unreadable: {}", self.path, self.reason)
    }
}

impl std::error::Error for SourceUnreadable {}

/// The local merge itself failed (e.g. template grid unreadable). Fatal for
/// that export call.
#[derive(Debug)]
pub struct ExportFailed {
    pub reason: String,
}

impl std::fmt::Display for ExportFailed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "export failed: {}", self.reason)
    }
}

impl std::error::Error for ExportFailed {}

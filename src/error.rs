//! Error types for cookbook-extract.
//!
//! The heuristic core itself has no fatal paths: malformed fragments are
//! treated as "no signal" and produce empty results. The variants below
//! exist for the document boundary (parsing, encoding) and for the
//! EPUB-loading layer, which needs distinct kinds so batch callers can
//! skip a file while single-file callers abort.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTML parsing failed.
    #[error("HTML parsing failed: {0}")]
    ParseError(String),

    /// Character encoding detection or conversion failed.
    #[error("Encoding detection failed: {0}")]
    EncodingError(String),

    /// EPUB file not found (loader boundary).
    #[error("EPUB file not found: {0}")]
    FileNotFound(String),

    /// EPUB file could not be accessed (loader boundary).
    #[error("Cannot access EPUB file: {0}")]
    PermissionDenied(String),

    /// EPUB archive is invalid or corrupted (loader boundary).
    #[error("Invalid EPUB file: {0}")]
    CorruptArchive(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

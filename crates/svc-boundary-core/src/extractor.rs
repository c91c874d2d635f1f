//! Language-agnostic import extraction types and trait.
//!
//! `ImportExtractor` is the extension point for scanning a new language.
//! Implementations only need to understand the file header; the rest of the
//! file may be syntactically broken.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::BoundaryError;

/// A single import extracted from a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRecord {
    /// File the import was found in.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column (1-indexed byte offset within line).
    pub column: usize,
    /// Import path literal as written, delimiters included (e.g. `"fmt"`).
    pub literal: String,
}

/// Trait for language-specific import extraction.
pub trait ImportExtractor: Send + Sync {
    /// Language identifier (e.g., `"go"`).
    fn language_id(&self) -> &'static str;

    /// File name suffixes this extractor handles (e.g., `&[".go"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extract the imports of `source`, in declaration order.
    ///
    /// `source` is raw file content; it need not be valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError::Parse`] if the import section is malformed.
    fn extract(&self, path: &Path, source: &[u8]) -> Result<Vec<ImportRecord>, BoundaryError>;

    /// Whether this extractor handles the file called `file_name`.
    fn handles(&self, file_name: &str) -> bool {
        self.extensions().iter().any(|ext| file_name.ends_with(ext))
    }
}

/// Reads `path` and extracts its imports with `extractor`.
///
/// # Errors
///
/// [`BoundaryError::SourceRead`] if the file cannot be read, otherwise
/// whatever the extractor returns.
pub fn scan_imports(
    extractor: &dyn ImportExtractor,
    path: &Path,
) -> Result<Vec<ImportRecord>, BoundaryError> {
    let source = std::fs::read(path).map_err(|source| BoundaryError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;
    extractor.extract(path, &source)
}

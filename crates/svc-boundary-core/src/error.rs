//! Fatal errors raised while checking a repository.
//!
//! Every variant aborts the run. Boundary violations are not errors; they are
//! collected into a [`BoundaryReport`](crate::BoundaryReport).

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a boundary check.
#[derive(Debug, Error, Diagnostic)]
pub enum BoundaryError {
    /// The module manifest could not be read.
    #[error("failed to read manifest {path}: {source}")]
    #[diagnostic(
        code(svc_boundary::manifest),
        help("run from the repository root or pass its path as an argument")
    )]
    Manifest {
        /// Manifest path.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// The module manifest does not declare a module on its first line.
    #[error("malformed manifest {path}: {message}")]
    #[diagnostic(
        code(svc_boundary::format),
        help("the first line must look like `module example.com/mono`")
    )]
    Format {
        /// Manifest path.
        path: PathBuf,
        /// What is wrong with it.
        message: String,
    },

    /// A directory under the services root could not be traversed.
    #[error("failed to walk {path}: {message}")]
    #[diagnostic(code(svc_boundary::walk))]
    Walk {
        /// Path being traversed.
        path: PathBuf,
        /// Underlying error detail.
        message: String,
    },

    /// A source file could not be read.
    #[error("failed to read {path}: {source}")]
    #[diagnostic(code(svc_boundary::source_read))]
    SourceRead {
        /// Source file path.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// The package clause or import block of a source file is malformed.
    #[error("parse error in {path}: {message}")]
    #[diagnostic(
        code(svc_boundary::parse),
        help("only the package clause and import declarations need to be valid")
    )]
    Parse {
        /// Source file path.
        path: PathBuf,
        /// Parse error detail.
        message: String,
        /// File contents, for rendering.
        #[source_code]
        src: NamedSource<String>,
        /// Location of the syntax error.
        #[label("here")]
        span: SourceSpan,
    },
}

impl BoundaryError {
    /// Builds a [`BoundaryError::Walk`] from a `walkdir` failure.
    pub(crate) fn walk(path: impl Into<PathBuf>, err: &walkdir::Error) -> Self {
        let path = err
            .path()
            .map_or_else(|| path.into(), std::path::Path::to_path_buf);
        let message = err
            .io_error()
            .map_or_else(|| err.to_string(), ToString::to_string);
        Self::Walk { path, message }
    }

    /// Builds a [`BoundaryError::Parse`] pointing at `span` in `source`.
    ///
    /// Invalid UTF-8 in `source` is replaced for rendering only.
    pub(crate) fn parse(
        path: impl Into<PathBuf>,
        source: &[u8],
        message: impl Into<String>,
        span: std::ops::Range<usize>,
    ) -> Self {
        let path = path.into();
        Self::Parse {
            src: NamedSource::new(
                path.display().to_string(),
                String::from_utf8_lossy(source).into_owned(),
            ),
            path,
            message: message.into(),
            span: span.into(),
        }
    }
}

//! Module identity: the root import path declared by the manifest.

use serde::Serialize;
use std::path::Path;

use crate::config::Layout;
use crate::error::BoundaryError;

/// Root import path of the module (e.g. `example.com/mono`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ModulePath(String);

impl ModulePath {
    /// Wraps an already-resolved module path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The module path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins path segments below the module root with `/`.
    #[must_use]
    pub fn join(&self, segments: &[&str]) -> String {
        let mut joined = self.0.clone();
        for segment in segments {
            joined.push('/');
            joined.push_str(segment);
        }
        joined
    }
}

impl std::fmt::Display for ModulePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads `<root>/<layout.manifest>` and returns the module path from its first line.
///
/// # Errors
///
/// [`BoundaryError::Manifest`] if the manifest cannot be read,
/// [`BoundaryError::Format`] if it has no line terminator or the first line
/// does not declare a module.
pub fn resolve_module_path(root: &Path, layout: &Layout) -> Result<ModulePath, BoundaryError> {
    let path = root.join(&layout.manifest);
    let content = std::fs::read_to_string(&path).map_err(|source| BoundaryError::Manifest {
        path: path.clone(),
        source,
    })?;

    let format_error = |message: String| BoundaryError::Format {
        path: path.clone(),
        message,
    };

    let Some((first_line, _)) = content.split_once('\n') else {
        return Err(format_error("invalid manifest".into()));
    };

    let module = parse_module_line(first_line.trim(), &layout.module_keyword)
        .ok_or_else(|| format_error(format!("first line is not `{} <path>`", layout.module_keyword)))?;

    tracing::debug!("Resolved module path {module} from {}", path.display());
    Ok(ModulePath::new(module))
}

/// Strips the keyword and optional quotes from a trimmed `module <path>` line.
fn parse_module_line<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim();
    let path = rest
        .strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .unwrap_or(rest);
    (!path.is_empty()).then_some(path)
}

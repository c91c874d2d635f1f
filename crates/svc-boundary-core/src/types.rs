//! Violations and per-service results.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::extractor::ImportRecord;

/// One directory under the services root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    /// Directory name of the service.
    pub name: String,
    /// Filesystem path of the service directory.
    pub path: PathBuf,
    /// Import prefix owned by the service (`<module>/services/<name>`).
    pub own_prefix: String,
    /// Tooling subtree exempt from the policy.
    pub scripts_path: PathBuf,
}

impl ServiceDescriptor {
    /// Whether `path` lies in the service's scripts subtree.
    #[must_use]
    pub fn is_exempt(&self, path: &Path) -> bool {
        path.starts_with(&self.scripts_path)
    }
}

/// An in-module import that crosses a service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Service owning the importing file.
    pub service: String,
    /// Import literal as written, delimiters included.
    pub import: String,
    /// File containing the import.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl Violation {
    /// Creates a violation for `record` found in `service`.
    #[must_use]
    pub fn new(service: impl Into<String>, record: ImportRecord) -> Self {
        Self {
            service: service.into(),
            import: record.literal,
            file: record.file,
            line: record.line,
            column: record.column,
        }
    }

    /// Human-readable message, e.g. `uses "x/y" in file services/a/main.go`.
    #[must_use]
    pub fn message(&self) -> String {
        format!("uses {} in file {}", self.import, self.file.display())
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: [{}] uses {}",
            self.file.display(),
            self.line,
            self.column,
            self.service,
            self.import
        )
    }
}

/// Result of checking one service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceReport {
    /// Service name.
    pub name: String,
    /// Violations in walk order, then declaration order.
    pub violations: Vec<Violation>,
    /// Number of source files scanned.
    pub files_checked: usize,
}

impl ServiceReport {
    /// Creates an empty report for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns true if the service has any violation.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Result of checking every service of a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoundaryReport {
    /// Module root path the repository was checked against.
    pub module: String,
    /// One entry per service, in directory-listing order.
    pub services: Vec<ServiceReport>,
}

impl BoundaryReport {
    /// Creates an empty report for `module`.
    #[must_use]
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            services: Vec::new(),
        }
    }

    /// Returns true if any service has a violation.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        self.services.iter().any(ServiceReport::has_violations)
    }

    /// Total number of violations.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.services.iter().map(|s| s.violations.len()).sum()
    }

    /// Total number of source files scanned.
    #[must_use]
    pub fn files_checked(&self) -> usize {
        self.services.iter().map(|s| s.files_checked).sum()
    }

    /// Services with at least one violation, in order.
    pub fn offending_services(&self) -> impl Iterator<Item = &ServiceReport> {
        self.services.iter().filter(|s| s.has_violations())
    }

    /// All violations, in report order.
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.services.iter().flat_map(|s| s.violations.iter())
    }
}

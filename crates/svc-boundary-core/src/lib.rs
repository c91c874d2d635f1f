//! # svc-boundary-core
//!
//! Import-boundary checks for Go monorepos laid out as one module with a
//! shared library folder and one folder per service.
//!
//! A service may import:
//!
//! - the shared library area (`<module>/pkg/...`),
//! - its own tree (`<module>/services/<name>/...`),
//! - any package ending in the shared-interface suffix (`.../pkg/proto`).
//!
//! Every other in-module import is a [`Violation`]. External imports are
//! never inspected, and each service's `scripts/` folder is skipped.
//!
//! ## Example
//!
//! ```ignore
//! use svc_boundary_core::{check_repository, BoundaryConfig, GoExtractor};
//!
//! let config = BoundaryConfig::default();
//! let report = check_repository(root, &config.layout, vec![Box::new(GoExtractor::new())])?;
//! for service in report.offending_services() {
//!     println!("{} has unallowed import(s)", service.name);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod classifier;
pub mod config;
pub mod error;
pub mod extractor;
pub mod go;
pub mod module;
pub mod types;
pub mod walker;

pub use classifier::{classify, AllowReason, BoundaryPolicy, ImportClass, ImportRules};
pub use config::{BoundaryConfig, ConfigError, Layout, ReportConfig};
pub use error::BoundaryError;
pub use extractor::{scan_imports, ImportExtractor, ImportRecord};
pub use go::GoExtractor;
pub use module::{resolve_module_path, ModulePath};
pub use types::{BoundaryReport, ServiceDescriptor, ServiceReport, Violation};
pub use walker::{check_repository, ServiceWalker};

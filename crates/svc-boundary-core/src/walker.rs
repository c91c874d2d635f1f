//! Service discovery and per-service import checks.

use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::classifier::{classify, BoundaryPolicy, ImportClass};
use crate::config::Layout;
use crate::error::BoundaryError;
use crate::extractor::{scan_imports, ImportExtractor};
use crate::module::ModulePath;
use crate::types::{BoundaryReport, ServiceDescriptor, ServiceReport, Violation};

/// Walks every service of a repository and collects boundary violations.
pub struct ServiceWalker {
    root: PathBuf,
    layout: Layout,
    policy: BoundaryPolicy,
    extractors: Vec<Box<dyn ImportExtractor>>,
}

impl ServiceWalker {
    /// Creates a walker for the repository at `root`.
    #[must_use]
    pub fn new(
        root: impl Into<PathBuf>,
        module: ModulePath,
        layout: Layout,
        extractors: Vec<Box<dyn ImportExtractor>>,
    ) -> Self {
        let policy = BoundaryPolicy::new(module, &layout);
        Self {
            root: root.into(),
            layout,
            policy,
            extractors,
        }
    }

    /// Directory holding the services.
    #[must_use]
    pub fn services_root(&self) -> PathBuf {
        self.root.join(&self.layout.services_dir)
    }

    /// Lists the service directories, ordered by name.
    ///
    /// Entries that are not directories are ignored.
    ///
    /// # Errors
    ///
    /// [`BoundaryError::Walk`] if the services root cannot be listed.
    pub fn discover_services(&self) -> Result<Vec<ServiceDescriptor>, BoundaryError> {
        let services_root = self.services_root();
        let walk_error = |e: &std::io::Error| BoundaryError::Walk {
            path: services_root.clone(),
            message: e.to_string(),
        };

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&services_root).map_err(|e| walk_error(&e))? {
            let entry = entry.map_err(|e| walk_error(&e))?;
            if !entry.file_type().map_err(|e| walk_error(&e))?.is_dir() {
                debug!("Skipping non-directory {}", entry.path().display());
                continue;
            }
            entries.push(entry);
        }
        entries.sort_by_key(std::fs::DirEntry::file_name);

        Ok(entries
            .into_iter()
            .map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                let path = entry.path();
                ServiceDescriptor {
                    own_prefix: self.policy.service_prefix(&name),
                    scripts_path: path.join(&self.layout.scripts_dir),
                    name,
                    path,
                }
            })
            .collect())
    }

    /// Checks every service.
    ///
    /// # Errors
    ///
    /// Any walk, read or parse error aborts the whole run.
    pub fn walk(&self) -> Result<BoundaryReport, BoundaryError> {
        let services = self.discover_services()?;
        info!(
            "Checking {} service(s) in {}",
            services.len(),
            self.services_root().display()
        );

        let mut report = BoundaryReport::new(self.policy.module().as_str());
        for service in &services {
            report.services.push(self.check_service(service)?);
        }
        Ok(report)
    }

    /// Checks one service's source files.
    ///
    /// # Errors
    ///
    /// Any walk, read or parse error.
    pub fn check_service(&self, service: &ServiceDescriptor) -> Result<ServiceReport, BoundaryError> {
        debug!("Checking service {} ({})", service.name, service.own_prefix);
        let rules = self.policy.rules_for(&service.own_prefix);
        let mut report = ServiceReport::new(&service.name);

        let mut it = WalkDir::new(&service.path).sort_by_file_name().into_iter();
        while let Some(entry) = it.next() {
            let entry = entry.map_err(|e| BoundaryError::walk(&service.path, &e))?;
            let path = entry.path();

            if service.is_exempt(path) {
                debug!("Skipping exempt {}", path.display());
                if entry.file_type().is_dir() {
                    it.skip_current_dir();
                }
                continue;
            }
            if entry.file_type().is_dir() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            let Some(extractor) = self.extractor_for(&file_name) else {
                continue;
            };

            for record in scan_imports(extractor, path)? {
                match classify(&record.literal, &rules) {
                    ImportClass::Violation => {
                        debug!("{} crosses boundary in {}", record.literal, path.display());
                        report.violations.push(Violation::new(&service.name, record));
                    }
                    ImportClass::Allowed(reason) => {
                        debug!("{} allowed ({reason:?})", record.literal);
                    }
                    ImportClass::External => {}
                }
            }
            report.files_checked += 1;
        }

        debug!(
            "Service {}: {} file(s), {} violation(s)",
            service.name,
            report.files_checked,
            report.violations.len()
        );
        Ok(report)
    }

    fn extractor_for(&self, file_name: &str) -> Option<&dyn ImportExtractor> {
        self.extractors
            .iter()
            .find(|e| e.handles(file_name))
            .map(|e| &**e)
    }
}

/// Resolves the module and checks every service of the repository at `root`.
///
/// # Errors
///
/// Any [`BoundaryError`]; the first one aborts the run.
pub fn check_repository(
    root: &Path,
    layout: &Layout,
    extractors: Vec<Box<dyn ImportExtractor>>,
) -> Result<BoundaryReport, BoundaryError> {
    let module = crate::module::resolve_module_path(root, layout)?;
    ServiceWalker::new(root, module, layout.clone(), extractors).walk()
}

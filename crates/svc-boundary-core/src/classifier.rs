//! Import classification: external, allowed, or a boundary violation.
//!
//! Matching is done on the import literal exactly as written in source,
//! delimiters included (`"example.com/mono/pkg/util"`). A prefix only matches
//! when it ends on a path-segment boundary, so a service named `svc` never
//! matches an import of `svc2`.

use serde::Serialize;

use crate::config::Layout;
use crate::module::ModulePath;

/// Outcome of classifying one import literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportClass {
    /// Not part of the module; never policed.
    External,
    /// In-module and permitted.
    Allowed(AllowReason),
    /// In-module and crossing a service boundary.
    Violation,
}

/// Which rule permitted an in-module import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowReason {
    /// Import of the shared library area.
    SharedLibrary,
    /// Import within the importing service's own tree.
    OwnService,
    /// Import of a package ending in the shared-interface suffix.
    SharedInterface,
}

/// The prefixes and suffix one service is judged against.
#[derive(Debug, Clone, Copy)]
pub struct ImportRules<'a> {
    /// Module root path.
    pub module: &'a str,
    /// Shared library prefix (`<module>/pkg`).
    pub shared_library: &'a str,
    /// The service's own prefix (`<module>/services/<name>`).
    pub service_own: &'a str,
    /// Shared-interface suffix (`pkg/proto`).
    pub shared_interface_suffix: &'a str,
}

/// Classifies a raw import literal against `rules`.
///
/// Literals without a `"` or `` ` `` delimiter cannot name a module package
/// and are reported as [`ImportClass::External`].
#[must_use]
pub fn classify(literal: &str, rules: &ImportRules<'_>) -> ImportClass {
    let Some(delim) = delimiter(literal) else {
        return ImportClass::External;
    };

    if !has_prefix(literal, delim, rules.module) {
        return ImportClass::External;
    }

    if has_prefix(literal, delim, rules.shared_library) {
        ImportClass::Allowed(AllowReason::SharedLibrary)
    } else if has_prefix(literal, delim, rules.service_own) {
        ImportClass::Allowed(AllowReason::OwnService)
    } else if has_suffix(literal, delim, rules.shared_interface_suffix) {
        ImportClass::Allowed(AllowReason::SharedInterface)
    } else {
        ImportClass::Violation
    }
}

fn delimiter(literal: &str) -> Option<char> {
    let first = literal.chars().next()?;
    (matches!(first, '"' | '`') && literal.len() >= 2 && literal.ends_with(first)).then_some(first)
}

/// `literal` starts with `<delim><prefix>` followed by `/` or the closing delimiter.
fn has_prefix(literal: &str, delim: char, prefix: &str) -> bool {
    let Some(rest) = literal
        .strip_prefix(delim)
        .and_then(|r| r.strip_prefix(prefix))
    else {
        return false;
    };
    rest.starts_with('/') || rest.strip_prefix(delim) == Some("")
}

/// `literal` ends with `<suffix><delim>` preceded by `/` or the opening delimiter.
fn has_suffix(literal: &str, delim: char, suffix: &str) -> bool {
    let Some(rest) = literal
        .strip_suffix(delim)
        .and_then(|r| r.strip_suffix(suffix))
    else {
        return false;
    };
    rest.ends_with('/') || rest.strip_suffix(delim) == Some("")
}

/// Module-wide part of the policy, shared by every service.
#[derive(Debug, Clone)]
pub struct BoundaryPolicy {
    module: ModulePath,
    shared_library: String,
    shared_interface_suffix: String,
    services_dir: String,
}

impl BoundaryPolicy {
    /// Derives the shared prefixes from the module path and layout.
    #[must_use]
    pub fn new(module: ModulePath, layout: &Layout) -> Self {
        let shared_library = module.join(&[&layout.shared_dir]);
        Self {
            module,
            shared_library,
            shared_interface_suffix: layout.shared_interface_suffix.clone(),
            services_dir: layout.services_dir.clone(),
        }
    }

    /// The module path this policy was built for.
    #[must_use]
    pub fn module(&self) -> &ModulePath {
        &self.module
    }

    /// Import prefix owned by the service called `name`.
    #[must_use]
    pub fn service_prefix(&self, name: &str) -> String {
        self.module.join(&[&self.services_dir, name])
    }

    /// Rules for a service whose own prefix is `service_own`.
    #[must_use]
    pub fn rules_for<'a>(&'a self, service_own: &'a str) -> ImportRules<'a> {
        ImportRules {
            module: self.module.as_str(),
            shared_library: &self.shared_library,
            service_own,
            shared_interface_suffix: &self.shared_interface_suffix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODULE: &str = "example.com/mono";

    fn policy() -> BoundaryPolicy {
        BoundaryPolicy::new(ModulePath::new(MODULE), &Layout::default())
    }

    fn classify_for(service: &str, literal: &str) -> ImportClass {
        let policy = policy();
        let own = policy.service_prefix(service);
        classify(literal, &policy.rules_for(&own))
    }

    #[test]
    fn external_import_is_never_policed() {
        for service in ["billing", "orders"] {
            assert_eq!(
                classify_for(service, "\"github.com/external/lib\""),
                ImportClass::External
            );
            assert_eq!(classify_for(service, "\"fmt\""), ImportClass::External);
        }
    }

    #[test]
    fn module_prefix_needs_segment_boundary() {
        assert_eq!(
            classify_for("billing", "\"example.com/mono2/services/orders\""),
            ImportClass::External
        );
        assert_eq!(
            classify_for("billing", "\"example.com/monolith\""),
            ImportClass::External
        );
    }

    #[test]
    fn shared_library_allowed_everywhere() {
        for service in ["billing", "orders", "svc2"] {
            assert_eq!(
                classify_for(service, "\"example.com/mono/pkg/util\""),
                ImportClass::Allowed(AllowReason::SharedLibrary)
            );
        }
    }

    #[test]
    fn own_service_allowed_other_service_rejected() {
        let literal = "\"example.com/mono/services/orders/client\"";
        assert_eq!(
            classify_for("orders", literal),
            ImportClass::Allowed(AllowReason::OwnService)
        );
        assert_eq!(classify_for("billing", literal), ImportClass::Violation);
    }

    #[test]
    fn service_root_package_is_own() {
        assert_eq!(
            classify_for("orders", "\"example.com/mono/services/orders\""),
            ImportClass::Allowed(AllowReason::OwnService)
        );
    }

    #[test]
    fn adjacent_service_names_do_not_collide() {
        assert_eq!(
            classify_for("svc", "\"example.com/mono/services/svc2/api\""),
            ImportClass::Violation
        );
        assert_eq!(
            classify_for("billing", "\"example.com/mono/services/billing-v2\""),
            ImportClass::Violation
        );
        assert_eq!(
            classify_for("svc2", "\"example.com/mono/services/svc/api\""),
            ImportClass::Violation
        );
    }

    #[test]
    fn shared_library_prefix_needs_segment_boundary() {
        assert_eq!(
            classify_for("billing", "\"example.com/mono/pkgextra/util\""),
            ImportClass::Violation
        );
    }

    #[test]
    fn shared_interface_suffix_allowed_everywhere() {
        let literal = "\"example.com/mono/services/orders/pkg/proto\"";
        assert_eq!(
            classify_for("billing", literal),
            ImportClass::Allowed(AllowReason::SharedInterface)
        );
        assert_eq!(
            classify_for("users", literal),
            ImportClass::Allowed(AllowReason::SharedInterface)
        );
    }

    #[test]
    fn shared_interface_suffix_needs_segment_boundary() {
        assert_eq!(
            classify_for("billing", "\"example.com/mono/services/orders/notpkg/proto\""),
            ImportClass::Violation
        );
    }

    #[test]
    fn shared_proto_under_pkg_is_shared_library() {
        assert_eq!(
            classify_for("billing", "\"example.com/mono/pkg/proto/events\""),
            ImportClass::Allowed(AllowReason::SharedLibrary)
        );
    }

    #[test]
    fn raw_string_literal_uses_backtick_delimiter() {
        assert_eq!(
            classify_for("billing", "`example.com/mono/services/orders/client`"),
            ImportClass::Violation
        );
        assert_eq!(
            classify_for("billing", "`example.com/mono/pkg/util`"),
            ImportClass::Allowed(AllowReason::SharedLibrary)
        );
    }

    #[test]
    fn undelimited_literal_is_external() {
        assert_eq!(
            classify_for("billing", "example.com/mono/services/orders"),
            ImportClass::External
        );
        assert_eq!(classify_for("billing", "\""), ImportClass::External);
        assert_eq!(classify_for("billing", ""), ImportClass::External);
    }

    #[test]
    fn mismatched_delimiters_are_external() {
        assert_eq!(
            classify_for("billing", "\"example.com/mono/services/orders`"),
            ImportClass::External
        );
    }

    #[test]
    fn rules_follow_custom_layout() {
        let layout = Layout {
            services_dir: "apps".into(),
            shared_dir: "lib".into(),
            shared_interface_suffix: "gen/api".into(),
            ..Layout::default()
        };
        let policy = BoundaryPolicy::new(ModulePath::new(MODULE), &layout);
        let own = policy.service_prefix("web");
        let rules = policy.rules_for(&own);
        assert_eq!(own, "example.com/mono/apps/web");
        assert_eq!(
            classify("\"example.com/mono/lib/log\"", &rules),
            ImportClass::Allowed(AllowReason::SharedLibrary)
        );
        assert_eq!(
            classify("\"example.com/mono/apps/jobs/gen/api\"", &rules),
            ImportClass::Allowed(AllowReason::SharedInterface)
        );
        assert_eq!(
            classify("\"example.com/mono/pkg/util\"", &rules),
            ImportClass::Violation
        );
    }
}

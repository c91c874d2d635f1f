//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

use crate::config_resolver::REPOSITORY_CONFIG_NAMES;

/// Config written by `svc-boundary init`; every value is the built-in default.
pub const DEFAULT_CONFIG: &str = r#"# svc-boundary configuration
#
# Services under `services_dir` may import the shared library folder, their
# own tree, and any package ending in `shared_interface_suffix`. Every other
# import of this module is reported.

[layout]
# Manifest whose first line declares the module path
manifest = "go.mod"
module_keyword = "module"

# <root>/<services_dir>/<name>/ holds one service each
services_dir = "services"

# <root>/<shared_dir>/ is importable from every service
shared_dir = "pkg"

# <root>/<services_dir>/<name>/<scripts_dir>/ is never checked
scripts_dir = "scripts"

# Import paths ending in this suffix are allowed from anywhere
shared_interface_suffix = "pkg/proto"

[report]
# Exit with status 1 when violations are found
deny = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(REPOSITORY_CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Adjust [layout] if your repository differs from the Go defaults");
    println!("  2. Run: svc-boundary");

    Ok(())
}

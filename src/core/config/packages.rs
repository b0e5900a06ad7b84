//! core::config::packages
//!
//! Data Vault package selection.
//!
//! Renderers emit text for one dbt package family. The family is chosen
//! explicitly (`--package`) or detected from the project's `packages.yml`
//! or `dependencies.yml`, first supported entry wins.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Dependency files searched for an installed package, in order.
pub const DEPENDENCY_FILES: &[&str] = &["packages.yml", "dependencies.yml"];

/// A supported Data Vault dbt package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Package {
    /// `datavault-uk/automate_dv`
    #[default]
    AutomateDv,
    /// `scalefreecom/datavault4dbt`
    Datavault4dbt,
}

impl Package {
    /// All supported packages, in order of preference.
    pub const ALL: &'static [Package] = &[Package::AutomateDv, Package::Datavault4dbt];

    /// Hub package name (`owner/name`).
    pub fn name(&self) -> &'static str {
        match self {
            Package::AutomateDv => "datavault-uk/automate_dv",
            Package::Datavault4dbt => "scalefreecom/datavault4dbt",
        }
    }

    /// Macro prefix used by emitted templates.
    pub fn prefix(&self) -> &'static str {
        match self {
            Package::AutomateDv => "automate_dv",
            Package::Datavault4dbt => "datavault4dbt",
        }
    }

    /// Detect the first supported package installed in a project.
    ///
    /// Unreadable or malformed dependency files are skipped.
    pub fn detect(project: &Path) -> Option<Package> {
        DEPENDENCY_FILES.iter().find_map(|file| {
            let path = project.join(file);
            let contents = fs::read_to_string(&path).ok()?;
            let deps: DependencyFile = match serde_yaml::from_str(&contents) {
                Ok(deps) => deps,
                Err(e) => {
                    log::debug!("skipping {}: {}", path.display(), e);
                    return None;
                }
            };
            deps.packages
                .unwrap_or_default()
                .iter()
                .filter_map(|entry| entry.package.as_deref())
                .find_map(|name| name.parse().ok())
        })
    }
}

impl FromStr for Package {
    type Err = String;

    /// Accepts the full package name or its macro prefix, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Package::ALL
            .iter()
            .copied()
            .find(|p| p.name() == lower || p.prefix() == lower)
            .ok_or_else(|| {
                let names: Vec<_> = Package::ALL.iter().map(|p| p.name()).collect();
                format!("unsupported package '{}', must be one of: {}", s, names.join(", "))
            })
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DependencyFile {
    packages: Option<Vec<DependencyEntry>>,
}

/// `git:` and `local:` entries carry no `package` key and are skipped.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DependencyEntry {
    package: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_names_and_prefixes() {
        assert_eq!("datavault-uk/automate_dv".parse(), Ok(Package::AutomateDv));
        assert_eq!("ScaleFreeCom/DataVault4dbt".parse(), Ok(Package::Datavault4dbt));
        assert_eq!("datavault4dbt".parse(), Ok(Package::Datavault4dbt));
        assert!("dbt-labs/dbt_utils".parse::<Package>().is_err());
    }

    #[test]
    fn detect_from_packages_yml() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("packages.yml"),
            r#"
packages:
  - package: dbt-labs/dbt_utils
    version: 1.1.1
  - git: https://example.com/repo.git
  - package: scalefreecom/datavault4dbt
    version: 1.0.0
"#,
        )
        .unwrap();

        assert_eq!(Package::detect(temp.path()), Some(Package::Datavault4dbt));
    }

    #[test]
    fn detect_falls_through_to_dependencies_yml() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("packages.yml"), ": not yaml [").unwrap();
        fs::write(
            temp.path().join("dependencies.yml"),
            "packages:\n  - package: datavault-uk/automate_dv\n",
        )
        .unwrap();

        assert_eq!(Package::detect(temp.path()), Some(Package::AutomateDv));
    }

    #[test]
    fn detect_nothing() {
        let temp = TempDir::new().unwrap();
        assert_eq!(Package::detect(temp.path()), None);
    }
}

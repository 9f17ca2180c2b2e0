//! The embedded JDK module catalog: package ownership, the `requires` graph,
//! and approximate jmod sizes, compiled into the binary rather than probed
//! from a live JVM (see the Design Notes on why this crate never shells out
//! to `java --list-modules`).

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{Result, SlimJreError};
use crate::models::ModuleName;

static CATALOG_JSON: &str = include_str!("../../resources/module_catalog/jdk21.json");

#[derive(Debug, Deserialize)]
struct RawCatalog {
    version: String,
    modules: Vec<RawModule>,
}

#[derive(Debug, Deserialize)]
struct RawModule {
    name: String,
    packages: Vec<String>,
    requires: Vec<String>,
    jmod_size: u64,
}

#[derive(Debug, Clone)]
pub struct ModuleInfo {
    pub name: ModuleName,
    pub packages: Vec<String>,
    pub requires: Vec<ModuleName>,
    pub jmod_size: u64,
}

/// The parsed, queryable form of `resources/module_catalog/jdk21.json`.
#[derive(Debug, Clone)]
pub struct ModuleCatalog {
    pub version: String,
    modules: BTreeMap<ModuleName, ModuleInfo>,
    package_owners: BTreeMap<String, ModuleName>,
}

impl ModuleCatalog {
    /// Parses the embedded catalog. Fails only if the compiled-in resource is
    /// malformed, which would mean a packaging bug rather than a runtime one.
    pub fn load_embedded() -> Result<Self> {
        Self::parse(CATALOG_JSON)
    }

    fn parse(raw_json: &str) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(raw_json)
            .map_err(|e| SlimJreError::index(format!("malformed module catalog: {e}")))?;

        let mut modules = BTreeMap::new();
        let mut package_owners = BTreeMap::new();

        for raw_module in raw.modules {
            let name = ModuleName::new(raw_module.name.clone());
            for package in &raw_module.packages {
                package_owners.insert(package.clone(), name.clone());
            }
            let info = ModuleInfo {
                name: name.clone(),
                packages: raw_module.packages,
                requires: raw_module
                    .requires
                    .into_iter()
                    .map(ModuleName::new)
                    .collect(),
                jmod_size: raw_module.jmod_size,
            };
            modules.insert(name, info);
        }

        Ok(Self {
            version: raw.version,
            modules,
            package_owners,
        })
    }

    pub fn module(&self, name: &ModuleName) -> Option<&ModuleInfo> {
        self.modules.get(name)
    }

    pub fn contains(&self, name: &ModuleName) -> bool {
        self.modules.contains_key(name)
    }

    pub fn all_modules(&self) -> impl Iterator<Item = &ModuleName> {
        self.modules.keys()
    }

    /// The module that declares `package`, walking up dotted segments so a
    /// class in a subpackage of a declared package still resolves (the
    /// catalog lists top-level exported packages, not every leaf).
    pub fn owner_of_package(&self, package: &str) -> Option<&ModuleName> {
        if let Some(owner) = self.package_owners.get(package) {
            return Some(owner);
        }
        let mut prefix = package;
        while let Some((shorter, _)) = prefix.rsplit_once('.') {
            if let Some(owner) = self.package_owners.get(shorter) {
                return Some(owner);
            }
            prefix = shorter;
        }
        None
    }

    pub fn direct_requires(&self, name: &ModuleName) -> &[ModuleName] {
        self.modules
            .get(name)
            .map(|info| info.requires.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_embedded_catalog() {
        let catalog = ModuleCatalog::load_embedded().expect("embedded catalog must parse");
        assert_eq!(catalog.version, "21");
        assert!(catalog.contains(&ModuleName::new("java.base")));
        assert!(catalog.contains(&ModuleName::new("java.sql")));
    }

    #[test]
    fn resolves_package_owner_by_prefix() {
        let catalog = ModuleCatalog::load_embedded().unwrap();
        let owner = catalog.owner_of_package("java.util.concurrent.locks");
        assert_eq!(owner, Some(&ModuleName::new("java.base")));
    }

    #[test]
    fn java_sql_requires_java_xml() {
        let catalog = ModuleCatalog::load_embedded().unwrap();
        let requires = catalog.direct_requires(&ModuleName::new("java.sql"));
        assert!(requires.contains(&ModuleName::new("java.xml")));
    }

    #[test]
    fn unknown_module_has_no_requires() {
        let catalog = ModuleCatalog::load_embedded().unwrap();
        let requires = catalog.direct_requires(&ModuleName::new("com.example.nonexistent"));
        assert!(requires.is_empty());
    }
}

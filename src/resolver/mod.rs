//! The module resolver: turns a seed set of directly-observed modules into a
//! transitive closure under `requires`, then applies user include/exclude
//! overrides.

use std::collections::BTreeSet;

use crate::error::{Result, SlimJreError};
use crate::index::ModuleIndex;
use crate::models::{EngineConfig, ModuleName, JAVA_BASE};

pub struct ModuleResolver<'a> {
    index: &'a ModuleIndex,
}

impl<'a> ModuleResolver<'a> {
    pub fn new(index: &'a ModuleIndex) -> Self {
        Self { index }
    }

    pub fn is_available(&self, module: &ModuleName) -> bool {
        self.index.catalog().contains(module)
    }

    pub fn direct_requires(&self, module: &ModuleName) -> Vec<ModuleName> {
        self.index.catalog().direct_requires(module).to_vec()
    }

    /// Walks `requires` breadth-first from `seed`, always folding in
    /// `java.base`. Unknown modules are dropped silently by `filter_to_available`
    /// before this runs, so every name reaching here exists in the catalog.
    pub fn resolve_transitive(&self, seed: &BTreeSet<ModuleName>) -> BTreeSet<ModuleName> {
        let mut closure: BTreeSet<ModuleName> = BTreeSet::new();
        closure.insert(ModuleName::new(JAVA_BASE));

        let mut frontier: Vec<ModuleName> = seed.iter().cloned().collect();
        while let Some(module) = frontier.pop() {
            if !closure.insert(module.clone()) {
                continue;
            }
            for required in self.index.catalog().direct_requires(&module) {
                if !closure.contains(required) {
                    frontier.push(required.clone());
                }
            }
        }

        closure
    }

    /// Splits `seed` into catalog-known modules and unknowns, per the rule
    /// that an application-looking unknown module name is dropped with a
    /// warning while a `java.`/`jdk.`-prefixed unknown is a hard resolution
    /// error (a scanner found a class belonging to a platform module this
    /// catalog's JDK version doesn't ship).
    pub fn filter_to_available(
        &self,
        seed: &BTreeSet<ModuleName>,
    ) -> Result<(BTreeSet<ModuleName>, Vec<String>)> {
        let mut available = BTreeSet::new();
        let mut warnings = Vec::new();

        for module in seed {
            if self.is_available(module) {
                available.insert(module.clone());
                continue;
            }
            if module.is_platform_prefixed() {
                return Err(SlimJreError::module_resolution(format!(
                    "unknown platform module {module} is not present in the {} catalog",
                    self.index.catalog().version
                )));
            }
            warnings.push(format!("dropping unrecognized module: {module}"));
        }

        Ok((available, warnings))
    }

    /// Applies `EngineConfig::include`/`exclude` to a resolved closure.
    /// `java.base` can never be excluded; `EngineConfig::validate` already
    /// rejects that configuration before this runs, so it's reasserted here
    /// as the resolver's own invariant rather than trusted blindly.
    pub fn apply_overrides(
        &self,
        mut closure: BTreeSet<ModuleName>,
        config: &EngineConfig,
    ) -> BTreeSet<ModuleName> {
        closure.extend(config.include.iter().cloned());
        for excluded in &config.exclude {
            if excluded.as_str() != JAVA_BASE {
                closure.remove(excluded);
            }
        }
        closure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitive_closure_includes_indirect_requires() {
        let index = ModuleIndex::global().unwrap();
        let resolver = ModuleResolver::new(index);
        let mut seed = BTreeSet::new();
        seed.insert(ModuleName::new("java.sql"));
        let closure = resolver.resolve_transitive(&seed);
        assert!(closure.contains(&ModuleName::new("java.sql")));
        assert!(closure.contains(&ModuleName::new("java.xml")));
        assert!(closure.contains(&ModuleName::new(JAVA_BASE)));
    }

    #[test]
    fn unknown_platform_module_is_an_error() {
        let index = ModuleIndex::global().unwrap();
        let resolver = ModuleResolver::new(index);
        let mut seed = BTreeSet::new();
        seed.insert(ModuleName::new("jdk.made.up"));
        assert!(resolver.filter_to_available(&seed).is_err());
    }

    #[test]
    fn unknown_application_module_is_dropped_with_warning() {
        let index = ModuleIndex::global().unwrap();
        let resolver = ModuleResolver::new(index);
        let mut seed = BTreeSet::new();
        seed.insert(ModuleName::new("com.example.app"));
        let (available, warnings) = resolver.filter_to_available(&seed).unwrap();
        assert!(available.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn exclude_cannot_remove_java_base() {
        let index = ModuleIndex::global().unwrap();
        let resolver = ModuleResolver::new(index);
        let mut closure = BTreeSet::new();
        closure.insert(ModuleName::new(JAVA_BASE));
        let mut config = EngineConfig::default();
        config.exclude.insert(ModuleName::new(JAVA_BASE));
        let result = resolver.apply_overrides(closure, &config);
        assert!(result.contains(&ModuleName::new(JAVA_BASE)));
    }
}

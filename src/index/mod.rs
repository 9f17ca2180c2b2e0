//! The module index: a `binary class name -> owning platform module` lookup,
//! built once from the embedded catalog and shared read-only across every
//! scanner invocation.

use once_cell::sync::OnceCell;

use crate::catalog::ModuleCatalog;
use crate::error::Result;
use crate::models::{ModuleName, JAVA_BASE};

static INDEX: OnceCell<ModuleIndex> = OnceCell::new();

pub struct ModuleIndex {
    catalog: ModuleCatalog,
}

impl ModuleIndex {
    fn new() -> Result<Self> {
        Ok(Self {
            catalog: ModuleCatalog::load_embedded()?,
        })
    }

    /// Returns the global index, building it on first use.
    ///
    /// `OnceCell::get_or_try_init` gives single-flight semantics: concurrent
    /// callers from the rayon pool block on the same initialization rather
    /// than racing to parse the catalog independently.
    pub fn global() -> Result<&'static ModuleIndex> {
        INDEX.get_or_try_init(ModuleIndex::new)
    }

    /// Maps a binary class name (`java/util/List` or `java.util.List`) to its
    /// owning platform module. Returns `None` for `java.base` members and for
    /// anything the catalog doesn't recognize as a platform class, since
    /// `java.base` is implicit and non-platform classes carry no module
    /// requirement of their own.
    pub fn class_name_to_module(&self, class_name: &str) -> Option<ModuleName> {
        let dotted = class_name.replace('/', ".");
        let package = match dotted.rsplit_once('.') {
            Some((package, _)) => package,
            None => return None,
        };
        let owner = self.catalog.owner_of_package(package)?;
        if owner.as_str() == JAVA_BASE {
            return None;
        }
        Some(owner.clone())
    }

    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_class_to_module() {
        let index = ModuleIndex::global().unwrap();
        let module = index.class_name_to_module("java/sql/Connection");
        assert_eq!(module, Some(ModuleName::new("java.sql")));
    }

    #[test]
    fn java_base_classes_map_to_none() {
        let index = ModuleIndex::global().unwrap();
        assert_eq!(index.class_name_to_module("java/util/List"), None);
    }

    #[test]
    fn unrecognized_class_maps_to_none() {
        let index = ModuleIndex::global().unwrap();
        assert_eq!(
            index.class_name_to_module("com/example/app/Main"),
            None
        );
    }
}

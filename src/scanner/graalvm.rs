use crate::index::ModuleIndex;
use crate::models::{ModuleEvidence, ScannerKind};

use super::{ArchiveView, Scanner};

/// Resolves GraalVM native-image reachability metadata: `"name"` entries
/// from `reflect-config.json`/`jni-config.json`, and `"pattern"` entries from
/// `resource-config.json` that name a `.class` resource.
pub struct GraalVmMetadataScanner;

impl Scanner for GraalVmMetadataScanner {
    fn kind(&self) -> ScannerKind {
        ScannerKind::GraalVmMetadata
    }

    fn scan(&self, view: &ArchiveView, index: &ModuleIndex) -> ModuleEvidence {
        let mut evidence = ModuleEvidence::empty();

        for name in view.native_image_names {
            evidence.add_pattern(name.clone());
            if let Some(module) = index.class_name_to_module(name) {
                evidence.add_module(module);
            }
        }

        for pattern in view.native_image_resource_patterns {
            let Some(class_name) = pattern.strip_suffix(".class") else {
                continue;
            };
            let class_name = class_name.trim_start_matches('/').replace('/', ".");
            evidence.add_pattern(pattern.clone());
            if let Some(module) = index.class_name_to_module(&class_name) {
                evidence.add_module(module);
            }
        }

        evidence
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn resolves_reflect_config_name_entry() {
        let names = BTreeSet::from(["java.sql.DriverManager".to_string()]);
        let view = ArchiveView {
            classes: &[],
            service_files: &Default::default(),
            native_image_names: &names,
            native_image_resource_patterns: &BTreeSet::new(),
        };
        let index = ModuleIndex::global().unwrap();
        let evidence = GraalVmMetadataScanner.scan(&view, index);
        assert!(evidence.modules.iter().any(|m| m.as_str() == "java.sql"));
    }

    #[test]
    fn resolves_resource_config_class_pattern() {
        let patterns = BTreeSet::from(["java/sql/DriverManager.class".to_string()]);
        let view = ArchiveView {
            classes: &[],
            service_files: &Default::default(),
            native_image_names: &BTreeSet::new(),
            native_image_resource_patterns: &patterns,
        };
        let index = ModuleIndex::global().unwrap();
        let evidence = GraalVmMetadataScanner.scan(&view, index);
        assert!(evidence.modules.iter().any(|m| m.as_str() == "java.sql"));
    }
}

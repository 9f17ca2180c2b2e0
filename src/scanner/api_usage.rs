use crate::index::ModuleIndex;
use crate::models::{ModuleEvidence, ScannerKind};

use super::{ArchiveView, Scanner};

const EXCLUDED_PREFIXES: &[&str] = &["java/lang/", "java/util/"];

/// The baseline, no-configuration scanner: any constant-pool class reference
/// whose Module-Index-resolved owner isn't `java.base`, excluding the two
/// packages every class references incidentally (`java.lang`, `java.util`)
/// and that would otherwise dominate the evidence with noise.
pub struct ApiUsageScanner;

impl Scanner for ApiUsageScanner {
    fn kind(&self) -> ScannerKind {
        ScannerKind::ApiUsage
    }

    fn scan(&self, view: &ArchiveView, index: &ModuleIndex) -> ModuleEvidence {
        let mut evidence = ModuleEvidence::empty();

        for class in view.classes {
            for class_ref in &class.class_refs {
                if EXCLUDED_PREFIXES.iter().any(|prefix| class_ref.starts_with(prefix)) {
                    continue;
                }
                if let Some(module) = index.class_name_to_module(class_ref) {
                    evidence.add_module(module);
                    evidence.add_pattern(class_ref.clone());
                }
            }
        }

        evidence
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::scanner::classfile::DecodedClass;

    #[test]
    fn resolves_non_excluded_class_ref() {
        let classes = vec![DecodedClass {
            binary_name: "com/example/App".to_string(),
            class_refs: BTreeSet::from(["java/sql/Connection".to_string()]),
            method_refs: vec![],
            string_constants: BTreeSet::new(),
        }];
        let view = ArchiveView {
            classes: &classes,
            service_files: &Default::default(),
            native_image_names: &BTreeSet::new(),
            native_image_resource_patterns: &BTreeSet::new(),
        };
        let index = ModuleIndex::global().unwrap();
        let evidence = ApiUsageScanner.scan(&view, index);
        assert!(evidence.modules.iter().any(|m| m.as_str() == "java.sql"));
    }

    #[test]
    fn ignores_java_lang_and_java_util() {
        let classes = vec![DecodedClass {
            binary_name: "com/example/App".to_string(),
            class_refs: BTreeSet::from([
                "java/lang/String".to_string(),
                "java/util/List".to_string(),
            ]),
            method_refs: vec![],
            string_constants: BTreeSet::new(),
        }];
        let view = ArchiveView {
            classes: &classes,
            service_files: &Default::default(),
            native_image_names: &BTreeSet::new(),
            native_image_resource_patterns: &BTreeSet::new(),
        };
        let index = ModuleIndex::global().unwrap();
        let evidence = ApiUsageScanner.scan(&view, index);
        assert!(evidence.modules.is_empty());
    }
}

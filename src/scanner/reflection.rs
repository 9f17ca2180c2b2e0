use crate::index::ModuleIndex;
use crate::models::{ModuleEvidence, ScannerKind};

use super::{ArchiveView, Scanner};

const REFLECTIVE_CALLS: &[(&str, &str)] = &[
    ("java/lang/Class", "forName"),
    ("java/lang/ClassLoader", "loadClass"),
];

/// Detects `Class.forName`/`ClassLoader.loadClass` call sites. A class file
/// containing one of these method refs alongside a string constant shaped
/// like a dotted class name resolves that name through the Module Index;
/// constants that don't look like a class name become unresolvable evidence
/// only, since the real argument may be computed at runtime.
pub struct ReflectionScanner;

impl Scanner for ReflectionScanner {
    fn kind(&self) -> ScannerKind {
        ScannerKind::Reflection
    }

    fn scan(&self, view: &ArchiveView, index: &ModuleIndex) -> ModuleEvidence {
        let mut evidence = ModuleEvidence::empty();

        for class in view.classes {
            let has_reflective_call = class.method_refs.iter().any(|method_ref| {
                REFLECTIVE_CALLS
                    .iter()
                    .any(|(owner, name)| method_ref.owner_class == *owner && method_ref.method_name == *name)
            });
            if !has_reflective_call {
                continue;
            }

            for constant in &class.string_constants {
                if !looks_like_class_name(constant) {
                    continue;
                }
                evidence.add_pattern(constant.clone());
                if let Some(module) = index.class_name_to_module(constant) {
                    evidence.add_module(module);
                }
            }
        }

        evidence
    }
}

fn looks_like_class_name(value: &str) -> bool {
    if value.is_empty() || !value.contains('.') {
        return false;
    }
    value
        .split('.')
        .all(|segment| !segment.is_empty() && segment.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$'))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::scanner::classfile::{DecodedClass, MethodRef};

    fn class_with_forname(constant: &str) -> DecodedClass {
        DecodedClass {
            binary_name: "com/example/App".to_string(),
            class_refs: BTreeSet::new(),
            method_refs: vec![MethodRef {
                owner_class: "java/lang/Class".to_string(),
                method_name: "forName".to_string(),
            }],
            string_constants: BTreeSet::from([constant.to_string()]),
        }
    }

    #[test]
    fn resolves_dotted_class_name_constant() {
        let classes = vec![class_with_forname("java.sql.DriverManager")];
        let view = ArchiveView {
            classes: &classes,
            service_files: &Default::default(),
            native_image_names: &BTreeSet::new(),
            native_image_resource_patterns: &BTreeSet::new(),
        };
        let index = ModuleIndex::global().unwrap();
        let evidence = ReflectionScanner.scan(&view, index);
        assert!(evidence.modules.iter().any(|m| m.as_str() == "java.sql"));
    }

    #[test]
    fn ignores_non_class_shaped_constants() {
        let classes = vec![class_with_forname("hello world")];
        let view = ArchiveView {
            classes: &classes,
            service_files: &Default::default(),
            native_image_names: &BTreeSet::new(),
            native_image_resource_patterns: &BTreeSet::new(),
        };
        let index = ModuleIndex::global().unwrap();
        let evidence = ReflectionScanner.scan(&view, index);
        assert!(evidence.patterns.is_empty());
    }
}

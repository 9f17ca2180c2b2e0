use crate::index::ModuleIndex;
use crate::models::{ModuleEvidence, ModuleName, ScannerKind};

use super::{ArchiveView, Scanner};

/// Detects `FileSystems.newFileSystem` call sites paired with a `.zip`- or
/// `jar:`-shaped string constant in the same class, the shape the provider
/// lookup actually needs at runtime.
pub struct ZipFsScanner;

impl Scanner for ZipFsScanner {
    fn kind(&self) -> ScannerKind {
        ScannerKind::ZipFs
    }

    fn scan(&self, view: &ArchiveView, _index: &ModuleIndex) -> ModuleEvidence {
        let mut evidence = ModuleEvidence::empty();

        for class in view.classes {
            let calls_new_file_system = class.method_refs.iter().any(|method_ref| {
                method_ref.owner_class == "java/nio/file/FileSystems" && method_ref.method_name == "newFileSystem"
            });
            if !calls_new_file_system {
                continue;
            }

            let has_zip_shaped_constant = class
                .string_constants
                .iter()
                .any(|value| value.ends_with(".zip") || value.starts_with("jar:"));
            if has_zip_shaped_constant {
                evidence.add_pattern(class.binary_name.clone());
                evidence.add_module(ModuleName::new("jdk.zipfs"));
            }
        }

        evidence
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::scanner::classfile::{DecodedClass, MethodRef};

    #[test]
    fn adds_zipfs_on_call_plus_shaped_constant() {
        let classes = vec![DecodedClass {
            binary_name: "com/example/App".to_string(),
            class_refs: BTreeSet::new(),
            method_refs: vec![MethodRef {
                owner_class: "java/nio/file/FileSystems".to_string(),
                method_name: "newFileSystem".to_string(),
            }],
            string_constants: BTreeSet::from(["archive.zip".to_string()]),
        }];
        let view = ArchiveView {
            classes: &classes,
            service_files: &Default::default(),
            native_image_names: &BTreeSet::new(),
            native_image_resource_patterns: &BTreeSet::new(),
        };
        let index = ModuleIndex::global().unwrap();
        let evidence = ZipFsScanner.scan(&view, index);
        assert!(evidence.modules.contains(&ModuleName::new("jdk.zipfs")));
    }

    #[test]
    fn call_without_shaped_constant_is_not_enough() {
        let classes = vec![DecodedClass {
            binary_name: "com/example/App".to_string(),
            class_refs: BTreeSet::new(),
            method_refs: vec![MethodRef {
                owner_class: "java/nio/file/FileSystems".to_string(),
                method_name: "newFileSystem".to_string(),
            }],
            string_constants: BTreeSet::from(["unrelated".to_string()]),
        }];
        let view = ArchiveView {
            classes: &classes,
            service_files: &Default::default(),
            native_image_names: &BTreeSet::new(),
            native_image_resource_patterns: &BTreeSet::new(),
        };
        let index = ModuleIndex::global().unwrap();
        let evidence = ZipFsScanner.scan(&view, index);
        assert!(evidence.modules.is_empty());
    }
}

use crate::index::ModuleIndex;
use crate::models::{ModuleEvidence, ScannerKind};

use super::{ArchiveView, Scanner};

/// Resolves `META-INF/services/<interface>` declarations: both the interface
/// name and each non-comment implementation line are looked up in the Module
/// Index, since either side can live in a platform module.
pub struct ServiceLoaderScanner;

impl Scanner for ServiceLoaderScanner {
    fn kind(&self) -> ScannerKind {
        ScannerKind::ServiceLoader
    }

    fn scan(&self, view: &ArchiveView, index: &ModuleIndex) -> ModuleEvidence {
        let mut evidence = ModuleEvidence::empty();

        for (interface, implementations) in view.service_files {
            evidence.add_pattern(interface.clone());
            if let Some(module) = index.class_name_to_module(interface) {
                evidence.add_module(module);
            }
            for implementation in implementations {
                let implementation = implementation.trim();
                if implementation.is_empty() || implementation.starts_with('#') {
                    continue;
                }
                evidence.add_pattern(implementation.to_string());
                if let Some(module) = index.class_name_to_module(implementation) {
                    evidence.add_module(module);
                }
            }
        }

        evidence
    }
}

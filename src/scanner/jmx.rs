use crate::index::ModuleIndex;
use crate::models::{ModuleEvidence, ModuleName, ScannerKind};

use super::{ArchiveView, Scanner};

/// Remote JMX detector: any reference under `javax/management/remote/`
/// implies the application will attach a remote connector, which
/// `java.management` alone doesn't provide.
pub struct JmxScanner;

impl Scanner for JmxScanner {
    fn kind(&self) -> ScannerKind {
        ScannerKind::Jmx
    }

    fn scan(&self, view: &ArchiveView, _index: &ModuleIndex) -> ModuleEvidence {
        let mut evidence = ModuleEvidence::empty();

        for class in view.classes {
            for class_ref in &class.class_refs {
                if class_ref.starts_with("javax/management/remote/") {
                    evidence.add_pattern(class_ref.clone());
                    evidence.add_module(ModuleName::new("java.management.rmi"));
                }
            }
        }

        evidence
    }
}

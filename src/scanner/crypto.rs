use crate::index::ModuleIndex;
use crate::models::{CryptoMode, ModuleEvidence, ModuleName, ScannerKind};

use super::{crypto_gate_allows, ArchiveView, Scanner};

const CRYPTO_PREFIXES: &[&str] = &["javax/net/ssl/", "java/net/http/", "javax/crypto/", "java/security/"];

/// TLS/crypto usage detector. `java/security/cert/` is excluded from the
/// prefix match even though it sits under `java/security/`, since
/// certificate parsing alone doesn't imply the EC provider this scanner
/// exists to flag.
pub struct CryptoScanner {
    mode: CryptoMode,
}

impl CryptoScanner {
    pub fn new(mode: CryptoMode) -> Self {
        Self { mode }
    }
}

impl Scanner for CryptoScanner {
    fn kind(&self) -> ScannerKind {
        ScannerKind::Crypto
    }

    fn scan(&self, view: &ArchiveView, _index: &ModuleIndex) -> ModuleEvidence {
        let mut evidence = ModuleEvidence::empty();
        let mut any_match = false;

        for class in view.classes {
            for class_ref in &class.class_refs {
                if class_ref.starts_with("java/security/cert/") {
                    continue;
                }
                if CRYPTO_PREFIXES.iter().any(|prefix| class_ref.starts_with(prefix)) {
                    any_match = true;
                    evidence.add_pattern(class_ref.clone());
                }
            }
        }

        if crypto_gate_allows(self.mode, any_match) {
            evidence.add_module(ModuleName::new("jdk.crypto.ec"));
        }

        evidence
    }
}

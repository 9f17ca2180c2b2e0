use std::collections::BTreeMap;
use std::collections::BTreeSet;

use super::archive::Archive;
use super::evidence::{ModuleEvidence, ScannerKind};
use super::module_name::ModuleName;

/// The aggregate output of `aggregator::analyze_only`/`aggregator::create_minimal_jre`.
///
/// Invariant: `all_modules` is the transitive closure (under "requires") of the
/// union of every per-kind set, restricted to the platform catalog, with user
/// excludes removed and user includes added back in.
#[derive(Debug, Clone, Default)]
pub struct AnalysisResult {
    pub by_kind: BTreeMap<ScannerKind, ModuleEvidence>,
    pub all_modules: BTreeSet<ModuleName>,
    pub per_archive: BTreeMap<Archive, BTreeSet<ModuleName>>,
    pub warnings: Vec<String>,
    pub cancelled: bool,
}

impl AnalysisResult {
    pub fn modules_for_kind(&self, kind: ScannerKind) -> BTreeSet<ModuleName> {
        self.by_kind
            .get(&kind)
            .map(|evidence| evidence.modules.clone())
            .unwrap_or_default()
    }

    pub fn patterns_for_kind(&self, kind: ScannerKind) -> BTreeSet<String> {
        self.by_kind
            .get(&kind)
            .map(|evidence| evidence.patterns.clone())
            .unwrap_or_default()
    }
}

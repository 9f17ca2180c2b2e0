use std::collections::BTreeSet;

use super::module_name::ModuleName;

/// Which analyzer produced a given `ModuleEvidence`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum ScannerKind {
    Jdeps,
    ServiceLoader,
    Reflection,
    ApiUsage,
    GraalVmMetadata,
    Crypto,
    Locale,
    ZipFs,
    Jmx,
}

impl ScannerKind {
    pub const ALL: [ScannerKind; 9] = [
        ScannerKind::Jdeps,
        ScannerKind::ServiceLoader,
        ScannerKind::Reflection,
        ScannerKind::ApiUsage,
        ScannerKind::GraalVmMetadata,
        ScannerKind::Crypto,
        ScannerKind::Locale,
        ScannerKind::ZipFs,
        ScannerKind::Jmx,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScannerKind::Jdeps => "jdeps",
            ScannerKind::ServiceLoader => "service-loader",
            ScannerKind::Reflection => "reflection",
            ScannerKind::ApiUsage => "api-usage",
            ScannerKind::GraalVmMetadata => "graalvm-metadata",
            ScannerKind::Crypto => "crypto",
            ScannerKind::Locale => "locale",
            ScannerKind::ZipFs => "zip-fs",
            ScannerKind::Jmx => "jmx",
        }
    }
}

impl std::str::FromStr for ScannerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScannerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown scanner kind: {s}"))
    }
}

/// Locale-detection confidence tier. Ordered so `max()` over a class stream
/// picks the strongest signal seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum LocaleConfidence {
    None,
    Possible,
    Strong,
    Definite,
}

/// One scanner's findings for a single archive.
#[derive(Debug, Clone, Default)]
pub struct ModuleEvidence {
    pub modules: BTreeSet<ModuleName>,
    pub patterns: BTreeSet<String>,
    pub confidence: Option<LocaleConfidence>,
}

impl ModuleEvidence {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn add_module(&mut self, module: impl Into<ModuleName>) {
        self.modules.insert(module.into());
    }

    pub fn add_pattern(&mut self, pattern: impl Into<String>) {
        self.patterns.insert(pattern.into());
    }

    pub fn merge(&mut self, other: ModuleEvidence) {
        self.modules.extend(other.modules);
        self.patterns.extend(other.patterns);
        self.confidence = match (self.confidence, other.confidence) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (Some(a), None) => Some(a),
            (None, b) => b,
        };
    }
}

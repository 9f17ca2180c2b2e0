//! The nine bytecode/resource scanners and the shared per-archive view they
//! all read from.

pub mod api_usage;
pub mod classfile;
pub mod crypto;
pub mod graalvm;
pub mod jdeps;
pub mod jmx;
pub mod locale;
pub mod reflection;
pub mod service_loader;
pub mod zipfs;

use std::collections::{BTreeMap, BTreeSet};

pub use classfile::{DecodedClass, MethodRef};

use crate::index::ModuleIndex;
use crate::models::{CryptoMode, EngineConfig, ModuleEvidence, ScannerKind};

/// Everything extracted from one archive that a bytecode/resource scanner
/// might need. Built once per archive by the discovery/aggregation layer and
/// shared read-only across every enabled scanner.
pub struct ArchiveView<'a> {
    pub classes: &'a [DecodedClass],
    /// `META-INF/services/<interface>` -> non-comment implementation lines.
    pub service_files: &'a BTreeMap<String, Vec<String>>,
    /// `"name"` entries from `META-INF/native-image/**/{reflect,jni}-config.json`.
    pub native_image_names: &'a BTreeSet<String>,
    /// `"pattern"` entries from `resource-config.json` that end in `.class`.
    pub native_image_resource_patterns: &'a BTreeSet<String>,
}

/// Object-safe polymorphism over the nine scanners, collected into a fixed
/// registry at startup from `EngineConfig::enabled_scanners`.
pub trait Scanner: Send + Sync {
    fn kind(&self) -> ScannerKind;
    fn scan(&self, view: &ArchiveView, index: &ModuleIndex) -> ModuleEvidence;
}

/// Builds the enabled bytecode/resource scanners, in `ScannerKind` order.
/// `Jdeps` is excluded: it is a process-level oracle the aggregator invokes
/// once across the whole archive list, not a per-class scanner.
pub fn build_registry(config: &EngineConfig) -> Vec<Box<dyn Scanner>> {
    let mut registry: Vec<Box<dyn Scanner>> = Vec::new();

    if config.enabled_scanners.contains(&ScannerKind::ServiceLoader) {
        registry.push(Box::new(service_loader::ServiceLoaderScanner));
    }
    if config.enabled_scanners.contains(&ScannerKind::Reflection) {
        registry.push(Box::new(reflection::ReflectionScanner));
    }
    if config.enabled_scanners.contains(&ScannerKind::ApiUsage) {
        registry.push(Box::new(api_usage::ApiUsageScanner));
    }
    if config.enabled_scanners.contains(&ScannerKind::GraalVmMetadata) {
        registry.push(Box::new(graalvm::GraalVmMetadataScanner));
    }
    if config.enabled_scanners.contains(&ScannerKind::Crypto) {
        registry.push(Box::new(crypto::CryptoScanner::new(config.crypto_mode)));
    }
    if config.enabled_scanners.contains(&ScannerKind::Locale) {
        registry.push(Box::new(locale::LocaleScanner));
    }
    if config.enabled_scanners.contains(&ScannerKind::ZipFs) {
        registry.push(Box::new(zipfs::ZipFsScanner));
    }
    if config.enabled_scanners.contains(&ScannerKind::Jmx) {
        registry.push(Box::new(jmx::JmxScanner));
    }

    registry
}

/// Ignores `CryptoMode::Never`; `CryptoMode::Always` short-circuits straight
/// to "on" without inspecting any evidence.
pub(crate) fn crypto_gate_allows(mode: CryptoMode, any_match: bool) -> bool {
    match mode {
        CryptoMode::Never => false,
        CryptoMode::Always => true,
        CryptoMode::Auto => any_match,
    }
}

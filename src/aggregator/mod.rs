//! The Aggregator: orchestrates per-archive scanning, merges partial
//! evidence, resolves the transitive module closure, and produces the
//! `AnalysisResult` (or, in build mode, hands it to the Runtime Image
//! Invoker for a `BuildResult`).

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, trace, warn};
use zip::ZipArchive;

use crate::discovery::{self, DiscoverySession};
use crate::error::Result;
use crate::image;
use crate::index::ModuleIndex;
use crate::models::{
    AnalysisResult, Archive, BuildConfig, BuildResult, EngineConfig, ModuleEvidence, ModuleName, ScannerKind,
};
use crate::resolver::ModuleResolver;
use crate::scanner::{self, ArchiveView, DecodedClass, Scanner};

/// A cooperative cancellation switch for a running analysis. Checked at the
/// per-archive dispatch boundary, never mid-class-decode.
#[derive(Clone, Default)]
pub struct AggregatorHandle {
    cancelled: Arc<AtomicBool>,
}

impl AggregatorHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

struct ArchiveEvidence {
    archive: Archive,
    by_kind: BTreeMap<ScannerKind, ModuleEvidence>,
}

/// Runs the full scan pipeline over `input_path` and returns the merged
/// `AnalysisResult`, without invoking the image linker.
pub fn analyze_only(input_path: &std::path::Path, config: &EngineConfig, handle: &AggregatorHandle) -> Result<AnalysisResult> {
    config.validate()?;

    let session = DiscoverySession::new()?;
    let discovery_result = discovery::discover(input_path, &session)?;
    info!("discovered {} archive(s)", discovery_result.archives.len());

    let index = ModuleIndex::global()?;
    let registry = scanner::build_registry(config);

    let pool = build_thread_pool(config)?;
    let per_archive: Vec<Option<ArchiveEvidence>> = pool.install(|| {
        use rayon::prelude::*;
        discovery_result
            .archives
            .par_iter()
            .map(|archive| {
                if handle.is_cancelled() {
                    return None;
                }
                match scan_one_archive(archive, &registry, index) {
                    Ok(by_kind) => Some(ArchiveEvidence {
                        archive: archive.clone(),
                        by_kind,
                    }),
                    Err(e) => {
                        warn!("failed to scan {}: {e}", archive.display_name());
                        None
                    }
                }
            })
            .collect()
    });

    let archive_paths: Vec<_> = discovery_result.archives.iter().map(|a| a.path().to_path_buf()).collect();
    let jdeps_evidence = match scanner::jdeps::run(&archive_paths, None) {
        Ok(evidence) => evidence,
        Err(e) => {
            warn!("jdeps unavailable, continuing without its baseline module set: {e}");
            ModuleEvidence::empty()
        }
    };

    let mut result = AnalysisResult::default();
    result.warnings.extend(discovery_result.warnings);
    result.by_kind.insert(ScannerKind::Jdeps, jdeps_evidence);

    let mut seed: BTreeSet<ModuleName> = BTreeSet::new();
    for evidence in per_archive.into_iter().flatten() {
        let mut archive_modules = BTreeSet::new();
        for (kind, module_evidence) in evidence.by_kind {
            archive_modules.extend(module_evidence.modules.iter().cloned());
            seed.extend(module_evidence.modules.iter().cloned());
            result.by_kind.entry(kind).or_default().merge(module_evidence);
        }
        result.per_archive.insert(evidence.archive, archive_modules);
    }
    seed.extend(result.by_kind[&ScannerKind::Jdeps].modules.iter().cloned());

    if handle.is_cancelled() {
        result.cancelled = true;
        result.warnings.push("analysis cancelled before all archives were scanned".to_string());
    }

    let resolver = ModuleResolver::new(index);
    let (available_seed, resolution_warnings) = resolver.filter_to_available(&seed)?;
    result.warnings.extend(resolution_warnings);

    let closure = resolver.resolve_transitive(&available_seed);
    result.all_modules = resolver.apply_overrides(closure, config);

    info!("resolved {} platform module(s)", result.all_modules.len());
    Ok(result)
}

/// Runs `analyze_only`, then links a runtime image containing exactly the
/// resolved module set.
pub fn create_minimal_jre(
    input_path: &std::path::Path,
    engine_config: &EngineConfig,
    build_config: &BuildConfig,
    handle: &AggregatorHandle,
) -> Result<(AnalysisResult, BuildResult)> {
    build_config.validate()?;
    let analysis = analyze_only(input_path, engine_config, handle)?;
    let index = ModuleIndex::global()?;
    let build_result = image::link(&analysis.all_modules, build_config, index.catalog())?;
    Ok((analysis, build_result))
}

fn build_thread_pool(config: &EngineConfig) -> Result<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(workers) = config.worker_threads {
        builder = builder.num_threads(workers);
    }
    builder
        .build()
        .map_err(|e| crate::error::SlimJreError::configuration(format!("failed to build worker pool: {e}")))
}

fn scan_one_archive(
    archive: &Archive,
    registry: &[Box<dyn Scanner>],
    index: &ModuleIndex,
) -> Result<BTreeMap<ScannerKind, ModuleEvidence>> {
    let file = File::open(archive.path())
        .map_err(|e| crate::error::SlimJreError::discovery(format!("cannot open {}: {e}", archive.display_name())))?;
    let mut zip = ZipArchive::new(file)
        .map_err(|e| crate::error::SlimJreError::discovery(format!("not a valid archive: {e}")))?;

    let classes = decode_classes(&mut zip);
    let service_files = read_service_files(&mut zip);
    let (native_image_names, native_image_resource_patterns) = read_native_image_metadata(&mut zip);

    let view = ArchiveView {
        classes: &classes,
        service_files: &service_files,
        native_image_names: &native_image_names,
        native_image_resource_patterns: &native_image_resource_patterns,
    };

    let mut by_kind = BTreeMap::new();
    for scanner in registry {
        by_kind.insert(scanner.kind(), scanner.scan(&view, index));
    }
    Ok(by_kind)
}

fn decode_classes(zip: &mut ZipArchive<File>) -> Vec<DecodedClass> {
    let mut classes = Vec::new();
    for index in 0..zip.len() {
        let Ok(mut entry) = zip.by_index(index) else { continue };
        if !entry.name().ends_with(".class") {
            continue;
        }
        let name = entry.name().to_string();
        let mut bytes = Vec::new();
        if entry.read_to_end(&mut bytes).is_err() {
            trace!("failed to read class entry {name}");
            continue;
        }
        match DecodedClass::decode(&bytes) {
            Ok(class) => classes.push(class),
            Err(e) => trace!("dropping unparsable class {name}: {e}"),
        }
    }
    classes
}

fn read_service_files(zip: &mut ZipArchive<File>) -> BTreeMap<String, Vec<String>> {
    let mut service_files = BTreeMap::new();
    for index in 0..zip.len() {
        let Ok(mut entry) = zip.by_index(index) else { continue };
        let Some(interface) = entry.name().strip_prefix("META-INF/services/") else { continue };
        if interface.is_empty() {
            continue;
        }
        let interface = interface.to_string();
        let mut content = String::new();
        if entry.read_to_string(&mut content).is_err() {
            continue;
        }
        let lines = content.lines().map(|l| l.to_string()).collect();
        service_files.insert(interface, lines);
    }
    service_files
}

fn read_native_image_metadata(zip: &mut ZipArchive<File>) -> (BTreeSet<String>, BTreeSet<String>) {
    let mut names = BTreeSet::new();
    let mut resource_patterns = BTreeSet::new();

    for index in 0..zip.len() {
        let Ok(mut entry) = zip.by_index(index) else { continue };
        let entry_name = entry.name().to_string();
        if !entry_name.starts_with("META-INF/native-image/") {
            continue;
        }
        let is_reflect_or_jni = entry_name.ends_with("reflect-config.json") || entry_name.ends_with("jni-config.json");
        let is_resource_config = entry_name.ends_with("resource-config.json");
        if !is_reflect_or_jni && !is_resource_config {
            continue;
        }

        let mut content = String::new();
        if entry.read_to_string(&mut content).is_err() {
            trace!("failed to read native-image metadata {entry_name}");
            continue;
        }

        let parsed: serde_json::Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                trace!("malformed native-image metadata {entry_name}: {e}");
                continue;
            }
        };

        if is_reflect_or_jni {
            collect_string_field(&parsed, "name", &mut names);
        } else {
            collect_string_field(&parsed, "pattern", &mut resource_patterns);
        }
    }

    resource_patterns.retain(|pattern| pattern.ends_with(".class"));
    (names, resource_patterns)
}

fn collect_string_field(value: &serde_json::Value, field: &str, out: &mut BTreeSet<String>) {
    match value {
        serde_json::Value::Array(items) => {
            for item in items {
                collect_string_field(item, field, out);
            }
        }
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(s)) = map.get(field) {
                out.insert(s.clone());
            }
            for v in map.values() {
                collect_string_field(v, field, out);
            }
        }
        _ => {}
    }
}

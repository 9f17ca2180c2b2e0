//! Archive Discovery: turns an input path into a flat list of application
//! archives, transparently unpacking nested archives into a scratch area.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::trace;
use zip::ZipArchive;

use crate::error::{Result, SlimJreError};
use crate::models::{Archive, Coordinates};

/// Owns the scratch area nested archives are extracted into. Wraps a
/// `tempfile::TempDir`, whose own `Drop` implementation removes the
/// directory on every exit path, including unwinds — the idiomatic
/// realization of "defer-style cleanup" without writing a bespoke `Drop`.
pub struct DiscoverySession {
    scratch_dir: tempfile::TempDir,
}

impl DiscoverySession {
    pub fn new() -> Result<Self> {
        let scratch_dir = tempfile::Builder::new()
            .prefix("slim-jre-")
            .tempdir()
            .map_err(|e| SlimJreError::discovery(format!("failed to create scratch directory: {e}")))?;
        Ok(Self { scratch_dir })
    }

    pub fn scratch_path(&self) -> &Path {
        self.scratch_dir.path()
    }
}

#[derive(Debug, Default)]
pub struct DiscoveryResult {
    pub archives: Vec<Archive>,
    pub warnings: Vec<String>,
}

/// Discovers every application archive reachable from `input_path`: the
/// directory's top-level `.jar` files, or a single input archive together
/// with whatever nested archives its manifest/layout names.
pub fn discover(input_path: &Path, session: &DiscoverySession) -> Result<DiscoveryResult> {
    if !input_path.exists() {
        return Err(SlimJreError::discovery(format!(
            "input path does not exist: {}",
            input_path.display()
        )));
    }

    let mut result = DiscoveryResult::default();
    let mut seen = std::collections::BTreeSet::new();

    let top_level: Vec<PathBuf> = if input_path.is_dir() {
        std::fs::read_dir(input_path)
            .map_err(|e| SlimJreError::discovery(format!("failed to read {}: {e}", input_path.display())))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("jar"))
            .collect()
    } else {
        vec![input_path.to_path_buf()]
    };

    for archive_path in top_level {
        if let Err(e) = add_archive_and_nested(&archive_path, session, &mut result, &mut seen) {
            result.warnings.push(format!("skipping {}: {e}", archive_path.display()));
        }
    }

    if result.archives.is_empty() {
        return Err(SlimJreError::discovery(format!(
            "no usable archives found under {}",
            input_path.display()
        )));
    }

    Ok(result)
}

fn add_archive_and_nested(
    archive_path: &Path,
    session: &DiscoverySession,
    result: &mut DiscoveryResult,
    seen: &mut std::collections::BTreeSet<PathBuf>,
) -> Result<()> {
    let canonical = archive_path
        .canonicalize()
        .map_err(|e| SlimJreError::discovery(format!("cannot canonicalize {}: {e}", archive_path.display())))?;
    if !seen.insert(canonical.clone()) {
        return Ok(());
    }

    let size = std::fs::metadata(&canonical)
        .map_err(|e| SlimJreError::discovery(e.to_string()))?
        .len();

    let file = File::open(&canonical).map_err(|e| SlimJreError::discovery(e.to_string()))?;
    let mut zip = ZipArchive::new(file).map_err(|e| SlimJreError::discovery(format!("not a valid archive: {e}")))?;

    let coordinates = read_coordinates(&mut zip);
    result.archives.push(Archive::new(canonical.clone(), size, coordinates));

    let nested_entries = nested_archive_entries(&mut zip);
    for entry_name in nested_entries {
        match extract_nested(&mut zip, &entry_name, session) {
            Ok(extracted_path) => {
                if let Err(e) = add_archive_and_nested(&extracted_path, session, result, seen) {
                    result.warnings.push(format!("skipping nested {entry_name}: {e}"));
                }
            }
            Err(e) => {
                trace!("failed to extract nested archive {entry_name}: {e}");
                result.warnings.push(format!("failed to extract nested archive {entry_name}: {e}"));
            }
        }
    }

    let classpath_entries = read_classpath_entries(&mut zip, &canonical);
    for entry in classpath_entries {
        if entry.is_file() {
            if let Err(e) = add_archive_and_nested(&entry, session, result, seen) {
                result.warnings.push(format!("skipping Class-Path entry {}: {e}", entry.display()));
            }
        }
    }

    Ok(())
}

/// `BOOT-INF/lib/*.jar` (Spring Boot) and `WEB-INF/lib/*.jar` (WAR) entries.
fn nested_archive_entries(zip: &mut ZipArchive<File>) -> Vec<String> {
    let mut entries = Vec::new();
    for index in 0..zip.len() {
        let Ok(file) = zip.by_index(index) else { continue };
        let name = file.name();
        if (name.starts_with("BOOT-INF/lib/") || name.starts_with("WEB-INF/lib/")) && name.ends_with(".jar") {
            entries.push(name.to_string());
        }
    }
    entries
}

fn extract_nested(zip: &mut ZipArchive<File>, entry_name: &str, session: &DiscoverySession) -> Result<PathBuf> {
    let mut entry = zip
        .by_name(entry_name)
        .map_err(|e| SlimJreError::discovery(format!("entry not found: {e}")))?;
    let mut bytes = Vec::new();
    entry
        .read_to_end(&mut bytes)
        .map_err(|e| SlimJreError::discovery(e.to_string()))?;

    let file_name = Path::new(entry_name)
        .file_name()
        .ok_or_else(|| SlimJreError::discovery(format!("invalid nested entry name: {entry_name}")))?;
    let destination = session.scratch_path().join(file_name);
    std::fs::write(&destination, bytes).map_err(|e| SlimJreError::discovery(e.to_string()))?;
    Ok(destination)
}

/// Manifest `Class-Path` is space-separated and relative to the archive's
/// own directory.
fn read_classpath_entries(zip: &mut ZipArchive<File>, archive_path: &Path) -> Vec<PathBuf> {
    let Ok(mut manifest) = zip.by_name("META-INF/MANIFEST.MF") else {
        return Vec::new();
    };
    let mut content = String::new();
    if manifest.read_to_string(&mut content).is_err() {
        return Vec::new();
    }
    let unfolded = unfold_manifest_lines(&content);

    let Some(base_dir) = archive_path.parent() else {
        return Vec::new();
    };

    for line in unfolded.lines() {
        if let Some(value) = line.strip_prefix("Class-Path:") {
            return value
                .trim()
                .split_whitespace()
                .map(|entry| base_dir.join(entry))
                .collect();
        }
    }
    Vec::new()
}

/// MANIFEST.MF continuation lines start with a single space; this joins them
/// back onto the previous logical line before key/value parsing.
fn unfold_manifest_lines(content: &str) -> String {
    let mut unfolded = String::new();
    for line in content.lines() {
        if let Some(continuation) = line.strip_prefix(' ') {
            unfolded.push_str(continuation);
        } else {
            unfolded.push('\n');
            unfolded.push_str(line);
        }
    }
    unfolded
}

fn read_coordinates(zip: &mut ZipArchive<File>) -> Option<Coordinates> {
    let pom_properties_name = (0..zip.len()).find_map(|index| {
        let file = zip.by_index(index).ok()?;
        let name = file.name();
        (name.starts_with("META-INF/maven/") && name.ends_with("/pom.properties")).then(|| name.to_string())
    })?;

    let mut entry = zip.by_name(&pom_properties_name).ok()?;
    let mut content = String::new();
    entry.read_to_string(&mut content).ok()?;

    let mut group_id = None;
    let mut artifact_id = None;
    let mut version = None;
    for line in content.lines() {
        let Some((key, value)) = line.split_once('=') else { continue };
        match key.trim() {
            "groupId" => group_id = Some(value.trim().to_string()),
            "artifactId" => artifact_id = Some(value.trim().to_string()),
            "version" => version = Some(value.trim().to_string()),
            _ => {}
        }
    }

    Some(Coordinates {
        group_id: group_id.unwrap_or_default(),
        artifact_id: artifact_id.unwrap_or_default(),
        version: version.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonexistent_path_is_a_discovery_error() {
        let session = DiscoverySession::new().unwrap();
        let result = discover(Path::new("/no/such/path/anywhere"), &session);
        assert!(matches!(result, Err(SlimJreError::Discovery(_))));
    }

    #[test]
    fn unfolds_manifest_continuation_lines() {
        let raw = "Class-Path: a.jar\n b.jar\nMain-Class: com.example.App";
        let unfolded = unfold_manifest_lines(raw);
        assert!(unfolded.contains("Class-Path: a.jarb.jar"));
    }
}

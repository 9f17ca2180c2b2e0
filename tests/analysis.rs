use std::collections::BTreeSet;
use std::io::Write;

use slim_jre::aggregator::{self, AggregatorHandle};
use slim_jre::models::{EngineConfig, ModuleName};

/// Builds a minimal JAR at `path` containing a manifest and, optionally, a
/// `META-INF/services/<interface>` declaration naming `implementation`.
fn write_jar_with_service(path: &std::path::Path, interface: &str, implementation: &str) {
    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    zip.start_file("META-INF/MANIFEST.MF", options).unwrap();
    zip.write_all(b"Manifest-Version: 1.0\nMain-Class: com.example.App\n").unwrap();

    zip.start_file(format!("META-INF/services/{interface}"), options).unwrap();
    zip.write_all(implementation.as_bytes()).unwrap();

    zip.finish().unwrap();
}

#[test]
fn service_loader_evidence_resolves_to_the_declaring_module() {
    let dir = tempfile::tempdir().unwrap();
    let jar_path = dir.path().join("app.jar");
    write_jar_with_service(&jar_path, "java.sql.Driver", "com.example.MyDriver");

    let config = EngineConfig::default();
    let handle = AggregatorHandle::new();
    let result = aggregator::analyze_only(&jar_path, &config, &handle).unwrap();

    assert!(result.all_modules.contains(&ModuleName::new("java.sql")));
    assert!(result.all_modules.contains(&ModuleName::new("java.base")));
}

#[test]
fn missing_input_path_is_a_discovery_error() {
    let config = EngineConfig::default();
    let handle = AggregatorHandle::new();
    let result = aggregator::analyze_only(std::path::Path::new("/no/such/input.jar"), &config, &handle);
    assert!(result.is_err());
}

#[test]
fn excluded_module_does_not_appear_in_the_final_set() {
    let dir = tempfile::tempdir().unwrap();
    let jar_path = dir.path().join("app.jar");
    write_jar_with_service(&jar_path, "java.sql.Driver", "com.example.MyDriver");

    let mut config = EngineConfig::default();
    config.exclude.insert(ModuleName::new("java.sql"));

    let handle = AggregatorHandle::new();
    let result = aggregator::analyze_only(&jar_path, &config, &handle).unwrap();

    assert!(!result.all_modules.contains(&ModuleName::new("java.sql")));
}

#[test]
fn included_module_is_force_added_even_without_evidence() {
    let dir = tempfile::tempdir().unwrap();
    let jar_path = dir.path().join("app.jar");
    write_jar_with_service(&jar_path, "java.sql.Driver", "com.example.MyDriver");

    let mut config = EngineConfig::default();
    config.include.insert(ModuleName::new("jdk.httpserver"));

    let handle = AggregatorHandle::new();
    let result = aggregator::analyze_only(&jar_path, &config, &handle).unwrap();

    assert!(result.all_modules.contains(&ModuleName::new("jdk.httpserver")));
}

#[test]
fn cancelling_before_scan_returns_a_partial_result_marked_cancelled() {
    let dir = tempfile::tempdir().unwrap();
    let jar_path = dir.path().join("app.jar");
    write_jar_with_service(&jar_path, "java.sql.Driver", "com.example.MyDriver");

    let config = EngineConfig::default();
    let handle = AggregatorHandle::new();
    handle.cancel();

    let result = aggregator::analyze_only(&jar_path, &config, &handle).unwrap();
    assert!(result.cancelled);
    assert!(result.all_modules.contains(&ModuleName::new("java.base")));
}

#[test]
fn all_modules_is_always_a_superset_of_java_base() {
    let dir = tempfile::tempdir().unwrap();
    let jar_path = dir.path().join("app.jar");
    write_jar_with_service(&jar_path, "some.Interface", "com.example.Impl");

    let config = EngineConfig::default();
    let handle = AggregatorHandle::new();
    let result = aggregator::analyze_only(&jar_path, &config, &handle).unwrap();

    let expected: BTreeSet<ModuleName> = BTreeSet::from([ModuleName::new("java.base")]);
    assert!(expected.is_subset(&result.all_modules));
}

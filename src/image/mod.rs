//! The Runtime Image Invoker: assembles and runs the `jlink` command line,
//! then measures the resulting image against the catalog's full-JDK
//! estimate.

use std::path::Path;
use std::process::Command;

use log::{info, warn};

use crate::catalog::ModuleCatalog;
use crate::error::{Result, SlimJreError};
use crate::models::{BuildConfig, BuildResult, ModuleName};

const MARKER_FILE_NAME: &str = ".slim-jre-marker";

/// Links a runtime image containing exactly `modules`, per `build_config`.
pub fn link(modules: &std::collections::BTreeSet<ModuleName>, build_config: &BuildConfig, catalog: &ModuleCatalog) -> Result<BuildResult> {
    prepare_output_directory(&build_config.output)?;

    let module_list: Vec<String> = modules.iter().map(|m| m.as_str().to_string()).collect();
    let mut command = Command::new("jlink");
    command
        .arg("--add-modules")
        .arg(module_list.join(","))
        .arg("--output")
        .arg(&build_config.output)
        .arg("--compress")
        .arg(format!("zip-{}", build_config.compression.level()));

    if build_config.strip_debug {
        command.arg("--strip-debug");
    }
    if build_config.no_header_files {
        command.arg("--no-header-files");
    }
    if build_config.no_man_pages {
        command.arg("--no-man-pages");
    }

    info!("invoking jlink with {} module(s)", module_list.len());
    let output = command.output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SlimJreError::external_tool("jlink was not found on PATH; install a JDK that ships the jlink tool")
        } else {
            SlimJreError::external_tool(format!("failed to run jlink: {e}"))
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let truncated: String = stderr.chars().take(4000).collect();
        return Err(SlimJreError::build(format!("jlink exited with {}: {truncated}", output.status)));
    }

    write_marker_file(&build_config.output)?;

    let slim_jre_size = directory_size(&build_config.output).unwrap_or_else(|e| {
        warn!("failed to measure produced image size: {e}");
        0
    });
    let full_jdk_size_estimate: u64 = modules
        .iter()
        .filter_map(|name| catalog.module(name))
        .map(|info| info.jmod_size)
        .sum();

    Ok(BuildResult {
        output: build_config.output.clone(),
        modules: module_list,
        slim_jre_size,
        full_jdk_size_estimate,
    })
}

/// A pre-existing output directory may only be removed and recreated if it
/// carries this tool's own marker file from a previous run — otherwise it
/// might be unrelated user data that happens to share the path.
fn prepare_output_directory(output: &Path) -> Result<()> {
    if !output.exists() {
        return Ok(());
    }

    let marker_path = output.join(MARKER_FILE_NAME);
    if !marker_path.exists() {
        return Err(SlimJreError::build(format!(
            "output directory {} already exists and was not created by a previous run of this tool",
            output.display()
        )));
    }

    std::fs::remove_dir_all(output).map_err(|e| SlimJreError::build(format!("failed to clear {}: {e}", output.display())))
}

fn write_marker_file(output: &Path) -> Result<()> {
    let marker_path = output.join(MARKER_FILE_NAME);
    std::fs::write(&marker_path, b"").map_err(|e| SlimJreError::build(format!("failed to write marker file: {e}")))
}

fn directory_size(path: &Path) -> std::io::Result<u64> {
    let mut total = 0;
    let mut stack = vec![path.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in std::fs::read_dir(&current)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if metadata.is_dir() {
                stack.push(entry.path());
            } else {
                total += metadata.len();
            }
        }
    }
    Ok(total)
}

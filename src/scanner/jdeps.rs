//! The external dependency oracle: one `jdeps --print-module-deps` invocation
//! across the full archive list, producing the baseline module set from
//! static bytecode references. Unlike the other eight scanners this never
//! implements the `Scanner` trait — it is a process-level call the aggregator
//! makes once per analysis, not a per-class pass.

use std::path::Path;
use std::process::Command;

use log::warn;

use crate::models::{ModuleEvidence, ModuleName};

/// Runs `jdeps --print-module-deps` over `archives`. A missing binary or
/// non-zero exit is surfaced as `Err` so the aggregator can downgrade it to
/// an empty `ModuleEvidence` plus a warning rather than aborting the whole
/// analysis — `Jdeps` degrading coverage must never prevent the other eight
/// scanners from producing a usable module set.
pub fn run(archives: &[impl AsRef<Path>], multi_release: Option<&str>) -> crate::error::Result<ModuleEvidence> {
    if archives.is_empty() {
        return Ok(ModuleEvidence::empty());
    }

    let mut command = Command::new("jdeps");
    if let Some(version) = multi_release {
        command.arg("--multi-release").arg(version);
    }
    command.arg("--print-module-deps");
    for archive in archives {
        command.arg(archive.as_ref());
    }

    let output = command
        .output()
        .map_err(|e| crate::error::SlimJreError::external_tool(format!("failed to run jdeps: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let truncated: String = stderr.chars().take(2000).collect();
        return Err(crate::error::SlimJreError::external_tool(format!(
            "jdeps exited with {}: {truncated}",
            output.status
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut evidence = ModuleEvidence::empty();
    for token in stdout.trim().split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        evidence.add_module(ModuleName::new(token));
    }

    if evidence.modules.is_empty() {
        warn!("jdeps produced no module names for {} archive(s)", archives.len());
    }

    Ok(evidence)
}

use std::collections::BTreeSet;

use crate::error::{Result, SlimJreError};

use super::evidence::ScannerKind;
use super::module_name::{ModuleName, JAVA_BASE};

/// Governs whether the `Crypto` scanner's `jdk.crypto.ec` hit is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CryptoMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for CryptoMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(CryptoMode::Auto),
            "always" => Ok(CryptoMode::Always),
            "never" => Ok(CryptoMode::Never),
            other => Err(format!("unknown crypto mode: {other}")),
        }
    }
}

impl std::fmt::Display for CryptoMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CryptoMode::Auto => "auto",
            CryptoMode::Always => "always",
            CryptoMode::Never => "never",
        };
        f.write_str(s)
    }
}

/// The knob bag consumed by `aggregator::analyze_only`/`create_minimal_jre`.
///
/// Constructed by the CLI from parsed flags, or directly by library consumers
/// (build-tool plugin glue, a GUI). `validate()` is the only gate before the
/// engine runs; invalid combinations never reach the pipeline.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub enabled_scanners: BTreeSet<ScannerKind>,
    pub crypto_mode: CryptoMode,
    pub include: BTreeSet<ModuleName>,
    pub exclude: BTreeSet<ModuleName>,
    pub worker_threads: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled_scanners: ScannerKind::ALL.into_iter().collect(),
            crypto_mode: CryptoMode::default(),
            include: BTreeSet::new(),
            exclude: BTreeSet::new(),
            worker_threads: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.exclude.contains(&ModuleName::new(JAVA_BASE)) {
            return Err(SlimJreError::configuration(
                "java.base cannot be excluded; it is required by every platform module",
            ));
        }

        let overlap: Vec<&ModuleName> = self.include.intersection(&self.exclude).collect();
        if !overlap.is_empty() {
            return Err(SlimJreError::configuration(format!(
                "modules cannot be both included and excluded: {}",
                overlap
                    .iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        if let Some(0) = self.worker_threads {
            return Err(SlimJreError::configuration(
                "worker thread count must be at least 1",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_excluding_java_base() {
        let mut config = EngineConfig::default();
        config.exclude.insert(ModuleName::new(JAVA_BASE));
        assert!(matches!(
            config.validate(),
            Err(SlimJreError::Configuration(_))
        ));
    }

    #[test]
    fn rejects_zero_worker_threads() {
        let mut config = EngineConfig::default();
        config.worker_threads = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_module_both_included_and_excluded() {
        let mut config = EngineConfig::default();
        config.include.insert(ModuleName::new("java.sql"));
        config.exclude.insert(ModuleName::new("java.sql"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_enables_every_scanner() {
        let config = EngineConfig::default();
        assert_eq!(config.enabled_scanners.len(), ScannerKind::ALL.len());
    }
}

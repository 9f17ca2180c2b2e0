use std::path::PathBuf;

use crate::error::{Result, SlimJreError};

/// `jlink --compress` level. `Zip0` disables compression entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    Zip0,
    Zip1,
    Zip2,
    Zip3,
    Zip4,
    Zip5,
    Zip6,
    Zip7,
    Zip8,
    Zip9,
}

impl CompressionLevel {
    /// The integer jlink expects after `zip-`.
    pub fn level(&self) -> u8 {
        match self {
            CompressionLevel::Zip0 => 0,
            CompressionLevel::Zip1 => 1,
            CompressionLevel::Zip2 => 2,
            CompressionLevel::Zip3 => 3,
            CompressionLevel::Zip4 => 4,
            CompressionLevel::Zip5 => 5,
            CompressionLevel::Zip6 => 6,
            CompressionLevel::Zip7 => 7,
            CompressionLevel::Zip8 => 8,
            CompressionLevel::Zip9 => 9,
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Zip6
    }
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let level = s
            .strip_prefix("zip-")
            .ok_or_else(|| format!("expected zip-0..zip-9, got {s}"))?
            .parse::<u8>()
            .map_err(|_| format!("expected zip-0..zip-9, got {s}"))?;
        match level {
            0 => Ok(CompressionLevel::Zip0),
            1 => Ok(CompressionLevel::Zip1),
            2 => Ok(CompressionLevel::Zip2),
            3 => Ok(CompressionLevel::Zip3),
            4 => Ok(CompressionLevel::Zip4),
            5 => Ok(CompressionLevel::Zip5),
            6 => Ok(CompressionLevel::Zip6),
            7 => Ok(CompressionLevel::Zip7),
            8 => Ok(CompressionLevel::Zip8),
            9 => Ok(CompressionLevel::Zip9),
            other => Err(format!("compression level out of range: {other}")),
        }
    }
}

/// Inputs to `aggregator::create_minimal_jre`, beyond the `EngineConfig` used
/// during analysis.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub output: PathBuf,
    pub compression: CompressionLevel,
    pub strip_debug: bool,
    pub no_header_files: bool,
    pub no_man_pages: bool,
    pub verbose: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("runtime"),
            compression: CompressionLevel::default(),
            strip_debug: true,
            no_header_files: true,
            no_man_pages: true,
            verbose: false,
        }
    }
}

impl BuildConfig {
    pub fn validate(&self) -> Result<()> {
        if self.output.as_os_str().is_empty() {
            return Err(SlimJreError::configuration("output path cannot be empty"));
        }
        Ok(())
    }
}

/// What `create_minimal_jre` produced, once jlink has run to completion.
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub output: PathBuf,
    pub modules: Vec<String>,
    pub slim_jre_size: u64,
    pub full_jdk_size_estimate: u64,
}

impl BuildResult {
    /// Fraction of the full-JDK size estimate the slim image occupies, in `[0, 1]`.
    ///
    /// Returns `None` when the size estimate is unavailable, rather than
    /// dividing by zero.
    pub fn size_ratio(&self) -> Option<f64> {
        if self.full_jdk_size_estimate == 0 {
            return None;
        }
        Some(self.slim_jre_size as f64 / self.full_jdk_size_estimate as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zip_levels() {
        assert_eq!(
            "zip-9".parse::<CompressionLevel>().unwrap(),
            CompressionLevel::Zip9
        );
        assert!("zip-10".parse::<CompressionLevel>().is_err());
        assert!("gzip-1".parse::<CompressionLevel>().is_err());
    }

    #[test]
    fn size_ratio_none_when_estimate_missing() {
        let result = BuildResult {
            output: PathBuf::from("out"),
            modules: vec!["java.base".into()],
            slim_jre_size: 42,
            full_jdk_size_estimate: 0,
        };
        assert_eq!(result.size_ratio(), None);
    }
}

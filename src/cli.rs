use std::path::PathBuf;

use clap::Parser;

use crate::error::{Result, SlimJreError};
use crate::models::{BuildConfig, CompressionLevel, CryptoMode, EngineConfig, ModuleName, ScannerKind};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Application archive or directory of archives to analyze
    pub input: PathBuf,

    /// Runtime image output directory
    #[arg(short = 'o', long, default_value = "runtime")]
    pub output: PathBuf,

    /// Additional classpath entries, comma-separated
    #[arg(short = 'p', long = "classpath", value_delimiter = ',')]
    pub classpath: Vec<PathBuf>,

    /// Platform modules to force-include, comma-separated
    #[arg(long = "add-modules", value_delimiter = ',')]
    pub add_modules: Vec<String>,

    /// Platform modules to force-exclude, comma-separated
    #[arg(long = "exclude-modules", value_delimiter = ',')]
    pub exclude_modules: Vec<String>,

    /// jlink compression level (zip-0..zip-9)
    #[arg(long, default_value = "zip-6")]
    pub compress: String,

    /// Keep debug symbols in the produced image
    #[arg(long)]
    pub no_strip: bool,

    /// Disable the ServiceLoader scanner
    #[arg(long)]
    pub no_service_scan: bool,

    /// Disable the GraalVM native-image metadata scanner
    #[arg(long)]
    pub no_graalvm_metadata: bool,

    /// How confidently the Crypto scanner's hit is trusted
    #[arg(long, default_value = "auto")]
    pub crypto: String,

    /// Only run the analysis; do not invoke jlink
    #[arg(long)]
    pub analyze_only: bool,

    /// Worker thread cap for the per-archive scan pool
    #[arg(long)]
    pub workers: Option<usize>,

    /// Minimum log level
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Raise the log level floor to debug and print error cause chains
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_engine_config(&self) -> Result<EngineConfig> {
        let mut enabled_scanners: std::collections::BTreeSet<ScannerKind> = ScannerKind::ALL.into_iter().collect();
        if self.no_service_scan {
            enabled_scanners.remove(&ScannerKind::ServiceLoader);
        }
        if self.no_graalvm_metadata {
            enabled_scanners.remove(&ScannerKind::GraalVmMetadata);
        }

        let crypto_mode: CryptoMode = self
            .crypto
            .parse()
            .map_err(SlimJreError::configuration)?;

        let config = EngineConfig {
            enabled_scanners,
            crypto_mode,
            include: self.add_modules.iter().map(|m| ModuleName::new(m.clone())).collect(),
            exclude: self.exclude_modules.iter().map(|m| ModuleName::new(m.clone())).collect(),
            worker_threads: self.workers,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_build_config(&self) -> Result<BuildConfig> {
        let compression: CompressionLevel = self.compress.parse().map_err(SlimJreError::configuration)?;
        let config = BuildConfig {
            output: self.output.clone(),
            compression,
            strip_debug: !self.no_strip,
            no_header_files: true,
            no_man_pages: true,
            verbose: self.verbose,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_declaration_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn engine_config_round_trips_through_flags() {
        let cli = Cli::parse_from([
            "slim-jre",
            "app.jar",
            "--add-modules",
            "java.sql,java.xml",
            "--exclude-modules",
            "jdk.jsobject",
        ]);
        let config = cli.to_engine_config().unwrap();
        assert!(config.include.contains(&ModuleName::new("java.sql")));
        assert!(config.include.contains(&ModuleName::new("java.xml")));
        assert!(config.exclude.contains(&ModuleName::new("jdk.jsobject")));
    }

    #[test]
    fn rejects_invalid_compression_level() {
        let cli = Cli::parse_from(["slim-jre", "app.jar", "--compress", "gzip-9"]);
        assert!(cli.to_build_config().is_err());
    }
}

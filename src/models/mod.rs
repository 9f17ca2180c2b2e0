mod analysis;
mod archive;
mod build;
mod config;
mod evidence;
mod module_name;

pub use analysis::AnalysisResult;
pub use archive::{Archive, Coordinates};
pub use build::{BuildConfig, BuildResult, CompressionLevel};
pub use config::{CryptoMode, EngineConfig};
pub use evidence::{LocaleConfidence, ModuleEvidence, ScannerKind};
pub use module_name::{ModuleName, JAVA_BASE};

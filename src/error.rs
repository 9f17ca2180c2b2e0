//! The crate-wide error taxonomy.
//!
//! Scanner-kind failures never reach this type: they are logged at trace level
//! and isolated at the point of failure (see `scanner::classfile`). Everything
//! else that can keep a caller from getting a usable `AnalysisResult` or
//! `BuildResult` surfaces here.

use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum SlimJreError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("discovery error: {0}")]
    Discovery(String),

    #[error("module index error: {0}")]
    Index(String),

    #[error("scanner error: {0}")]
    Scanner(String),

    #[error("external tool error: {0}")]
    ExternalTool(String),

    #[error("module resolution error: {0}")]
    ModuleResolution(String),

    #[error("build error: {0}")]
    Build(String),
}

impl SlimJreError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery(msg.into())
    }

    pub fn index(msg: impl Into<String>) -> Self {
        Self::Index(msg.into())
    }

    pub fn external_tool(msg: impl Into<String>) -> Self {
        Self::ExternalTool(msg.into())
    }

    pub fn module_resolution(msg: impl Into<String>) -> Self {
        Self::ModuleResolution(msg.into())
    }

    pub fn build(msg: impl Into<String>) -> Self {
        Self::Build(msg.into())
    }

    /// A short tag naming the taxonomy kind, used by the CLI's non-verbose output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Discovery(_) => "discovery",
            Self::Index(_) => "index",
            Self::Scanner(_) => "scanner",
            Self::ExternalTool(_) => "external-tool",
            Self::ModuleResolution(_) => "module-resolution",
            Self::Build(_) => "build",
        }
    }
}

impl From<std::io::Error> for SlimJreError {
    fn from(err: std::io::Error) -> Self {
        SlimJreError::Discovery(err.to_string())
    }
}

/// Wraps an error with additional context, mirroring `anyhow::Context` but
/// staying inside the tagged taxonomy instead of erasing the variant.
pub trait Contextualize<T> {
    fn context_as(self, make: impl FnOnce(String) -> SlimJreError) -> Result<T, SlimJreError>;
}

impl<T, E: fmt::Display> Contextualize<T> for Result<T, E> {
    fn context_as(self, make: impl FnOnce(String) -> SlimJreError) -> Result<T, SlimJreError> {
        self.map_err(|e| make(e.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, SlimJreError>;

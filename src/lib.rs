//! # slim-jre
//!
//! Computes the minimal set of JDK platform modules an application needs
//! and links a custom runtime image with `jlink`.
//!
//! The library exposes two entry points mirroring the CLI's two modes:
//! [`aggregator::analyze_only`] runs the full scanning pipeline and returns
//! an [`models::AnalysisResult`] without touching the filesystem beyond a
//! scratch area; [`aggregator::create_minimal_jre`] additionally invokes
//! `jlink` and returns a [`models::BuildResult`].
//!
//! ```rust,no_run
//! use slim_jre::aggregator::{self, AggregatorHandle};
//! use slim_jre::models::EngineConfig;
//! use std::path::Path;
//!
//! # fn main() -> slim_jre::error::Result<()> {
//! let config = EngineConfig::default();
//! let handle = AggregatorHandle::new();
//! let result = aggregator::analyze_only(Path::new("app.jar"), &config, &handle)?;
//! println!("modules: {:?}", result.all_modules);
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod catalog;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod image;
pub mod index;
pub mod models;
pub mod resolver;
pub mod scanner;

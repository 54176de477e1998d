//! Single-file bundler for the Simple Physics Engine sources.
//!
//! The binary concatenates a fixed, ordered list of engine source files into
//! one generated artifact, separating the sections with banner comments. The
//! library surface exists for the integration tests and benchmarks.

pub mod bundler;
pub mod config;
pub mod orchestrator;

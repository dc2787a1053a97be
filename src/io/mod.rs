//! Input/output: errors, defaults, documents and the command line

/// Command-line interface
pub mod cli;
/// Compile-time defaults
pub mod configuration;
/// JSON document model
pub mod document;
/// Crate error type
pub mod error;
/// Document to graph reconstruction
pub mod loader;
/// Search progress display
pub mod progress;

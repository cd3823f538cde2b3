//! Utility modules for error handling, configuration and text extraction

pub mod config;
pub mod error;
pub mod text;

// Re-export for convenience
pub use config::ResolverSettings;
pub use error::ResolveError;

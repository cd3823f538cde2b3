//! bililoader library

pub mod extractor;
pub mod utils;

// Re-export main types for easier use
pub use extractor::{BilibiliExtractor, Extractor, ExtractorRegistry, Fetcher, MediaMeta};
pub use utils::{ResolveError, ResolverSettings};

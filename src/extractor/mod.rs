pub mod bilibili;
pub mod http;
pub mod models;
pub mod registry;
pub mod traits;

pub use bilibili::BilibiliExtractor;
pub use http::ReqwestFetcher;
pub use models::{Audio, Headers, MediaMeta, ResourceType, Video};
pub use registry::ExtractorRegistry;
pub use traits::{Extractor, Fetcher};

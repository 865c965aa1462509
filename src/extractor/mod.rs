// src/extractor/mod.rs

pub mod address;
pub mod metadata;
pub mod page;

pub use address::AddressResolver;
pub use metadata::MetadataResolver;
pub use page::{PageFetcher, extract_video_id, validate_page_url};

pub mod loader;
pub mod page_cache;
pub mod service;

pub use page_cache::PageCache;

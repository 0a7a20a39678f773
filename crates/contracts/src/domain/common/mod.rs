//! Common types for all content documents

pub mod reference;
pub mod serde_helpers;

// Re-exports
pub use reference::Reference;
pub use serde_helpers::null_as_default;

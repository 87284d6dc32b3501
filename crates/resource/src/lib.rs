//! Resource providers for card assets.
//!
//! - [`FilesystemResourceProvider`]: loads artwork and font files relative to a schema directory
//! - [`InMemoryResourceProvider`]: pre-populated storage (re-exported from cardwright-traits)

mod filesystem;

pub use filesystem::FilesystemResourceProvider;

pub use cardwright_traits::InMemoryResourceProvider;

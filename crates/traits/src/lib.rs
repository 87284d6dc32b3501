pub mod executor;
pub mod font;
pub mod resource;

pub use executor::{Executor, ExecutorError, SyncExecutor};
pub use font::{
    FontDescriptor, FontError, FontProvider, FontQuery, InMemoryFontProvider, SharedFontData,
};
pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};

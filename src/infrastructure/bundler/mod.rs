//! Bundler Implementations
//!
//! - `PassthroughBundler` - uploads sources as they are, collecting extra
//!   modules by `[[rules]]` globs

mod passthrough;

pub use passthrough::PassthroughBundler;

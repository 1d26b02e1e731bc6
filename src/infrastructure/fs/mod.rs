//! File System Implementations
//!
//! - `LocalFs` - atomic writes to local disk
//! - `write_outdir` - dump an upload payload for inspection (`--outdir`)

mod local;
mod outdir;

pub use local::LocalFs;
pub use outdir::{write_outdir, METADATA_FILE};

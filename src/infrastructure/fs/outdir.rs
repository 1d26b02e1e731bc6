//! `--outdir`: the upload as files on disk
//!
//! `metadata.json` holds the metadata document; every part is written under
//! its part name next to it.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::entities::UploadPayload;
use crate::error::EdgeshipResult;

use super::local::LocalFs;

pub const METADATA_FILE: &str = "metadata.json";

/// Write `payload` into `outdir`, returning the files written.
pub fn write_outdir(outdir: &Path, payload: &UploadPayload) -> EdgeshipResult<Vec<PathBuf>> {
    let fs = LocalFs::new();
    let mut written = Vec::with_capacity(payload.parts.len() + 1);

    let metadata = outdir.join(METADATA_FILE);
    fs.write_atomic(&metadata, payload.metadata_json()?.as_bytes())?;
    written.push(metadata);

    for part in &payload.parts {
        let path = outdir.join(&part.name);
        fs.write_atomic(&path, &part.content)?;
        written.push(path);
    }

    debug!(outdir = %outdir.display(), files = written.len(), "outdir.written");
    Ok(written)
}

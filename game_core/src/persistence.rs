//! RON persistence for `ChunkStaticBlob`, the one artifact `spec.md` §6
//! requires the core to be able to write and read back.

use std::path::{Path, PathBuf};

use amp_core::{Error, Result};

use crate::chunk::{ChunkCoord, ChunkStaticBlob};

const BLOB_VERSION: u32 = 1;

/// Directory baked chunk blobs live under, relative to the working directory.
pub const BAKED_CHUNKS_DIR: &str = "baked_chunks";

/// Versioned wrapper around a `ChunkStaticBlob` as written to disk.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PersistedChunkBlob {
    pub version: u32,
    pub blob: ChunkStaticBlob,
}

#[must_use]
pub fn blob_path(dir: &Path, coord: ChunkCoord) -> PathBuf {
    dir.join(format!("chunk_{}_{}.ron", coord.x, coord.z))
}

/// Serialize a baked chunk to RON and write it under `dir`.
pub fn save_chunk_blob(dir: &Path, blob: &ChunkStaticBlob) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let wrapped = PersistedChunkBlob {
        version: BLOB_VERSION,
        blob: blob.clone(),
    };
    let content = ron::to_string(&wrapped).map_err(|e| Error::serialization(e.to_string()))?;
    std::fs::write(blob_path(dir, blob.chunk_coord), content)?;
    Ok(())
}

/// Read back a chunk blob previously written by [`save_chunk_blob`].
///
/// Returns `Ok(None)` if no file exists for `coord` yet; this is the
/// "chunk not yet baked" case and is not an error per `spec.md` §7.
pub fn load_chunk_blob(dir: &Path, coord: ChunkCoord) -> Result<Option<ChunkStaticBlob>> {
    let path = blob_path(dir, coord);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let wrapped: PersistedChunkBlob =
        ron::from_str(&content).map_err(|e| Error::serialization(e.to_string()))?;
    if wrapped.version > BLOB_VERSION {
        return Err(Error::configuration(format!(
            "chunk blob version {} is newer than supported {}",
            wrapped.version, BLOB_VERSION
        )));
    }
    Ok(Some(wrapped.blob))
}

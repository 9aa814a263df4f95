//! Save records: registry snapshots and the single record file they live in.
#![forbid(unsafe_code)]

mod file;
mod record;

pub use file::{load, save};
pub use record::{WorldRecord, restore, snapshot};

use std::path::PathBuf;

use terrace_blocks::UnknownBlockTag;
use terrace_chunk::RegistryError;
use terrace_world::ChunkDims;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("record encoding: {0}")]
    Encoding(#[from] bincode::Error),
    #[error("record was saved with chunk dims {found:?}, expected {expected:?}")]
    DimsMismatch { expected: ChunkDims, found: ChunkDims },
    #[error("corrupted record: {0}")]
    Corrupted(String),
    #[error(transparent)]
    UnknownTag(#[from] UnknownBlockTag),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

//! Chunk storage, the chunk registry and generation dispatch.
#![forbid(unsafe_code)]

mod chunk;
mod generate;
mod registry;

pub use chunk::{Chunk, MeshBuilder, NullMesher};
pub use generate::generate_chunk;
pub use registry::{BlockAddress, ChunkRegistry, RegistryError, Unreachable};

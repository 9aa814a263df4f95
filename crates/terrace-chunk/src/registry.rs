use hashbrown::{HashMap, HashSet};
use terrace_blocks::BlockType;
use terrace_geom::{IVec2, IVec3};
use terrace_world::ChunkDims;
use thiserror::Error;

use crate::chunk::Chunk;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("chunk {0:?} already registered")]
    DuplicateOrigin(IVec3),
    #[error("origin {origin:?} is not a multiple of {dims:?}")]
    Misaligned { origin: IVec3, dims: ChunkDims },
    #[error("chunk dims {found:?} do not match registry dims {expected:?}")]
    WrongDims {
        expected: ChunkDims,
        found: ChunkDims,
    },
}

/// Why a neighbouring block could not be addressed.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Unreachable {
    #[error("chunk {0:?} not yet streamed")]
    NotStreamed(IVec3),
    #[error("local {local:?} still outside chunk {origin:?}")]
    OutsideChunk { origin: IVec3, local: IVec3 },
}

/// A single voxel: owning chunk plus flat index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockAddress {
    pub origin: IVec3,
    pub index: usize,
}

impl BlockAddress {
    #[inline]
    pub const fn new(origin: IVec3, index: usize) -> Self {
        Self { origin, index }
    }
}

/// Sole owner of every chunk. Chunks are added, never removed.
pub struct ChunkRegistry {
    dims: ChunkDims,
    chunks: HashMap<IVec3, Chunk>,
    columns: HashSet<IVec2>,
}

impl ChunkRegistry {
    pub fn new(dims: ChunkDims) -> Self {
        Self {
            dims,
            chunks: HashMap::new(),
            columns: HashSet::new(),
        }
    }

    #[inline]
    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    #[inline]
    pub fn contains(&self, origin: IVec3) -> bool {
        self.chunks.contains_key(&origin)
    }

    #[inline]
    pub fn get(&self, origin: IVec3) -> Option<&Chunk> {
        self.chunks.get(&origin)
    }

    #[inline]
    pub fn get_mut(&mut self, origin: IVec3) -> Option<&mut Chunk> {
        self.chunks.get_mut(&origin)
    }

    pub fn insert(&mut self, chunk: Chunk) -> Result<&mut Chunk, RegistryError> {
        let origin = chunk.origin();
        if chunk.dims() != self.dims {
            return Err(RegistryError::WrongDims {
                expected: self.dims,
                found: chunk.dims(),
            });
        }
        if !self.dims.is_aligned(origin) {
            return Err(RegistryError::Misaligned {
                origin,
                dims: self.dims,
            });
        }
        match self.chunks.entry(origin) {
            hashbrown::hash_map::Entry::Occupied(_) => Err(RegistryError::DuplicateOrigin(origin)),
            hashbrown::hash_map::Entry::Vacant(v) => Ok(v.insert(chunk)),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    pub fn origins(&self) -> impl Iterator<Item = IVec3> + '_ {
        self.chunks.keys().copied()
    }

    pub fn columns(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.columns.iter().copied()
    }

    #[inline]
    pub fn has_column(&self, column: IVec2) -> bool {
        self.columns.contains(&column)
    }

    #[inline]
    pub fn add_column(&mut self, column: IVec2) -> bool {
        self.columns.insert(column)
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Sets visibility on every resident chunk of a column; returns the origins touched.
    pub fn set_column_visible(&mut self, column: IVec2, slots: i32, visible: bool) -> Vec<IVec3> {
        let mut touched = Vec::new();
        for slot in 0..slots {
            let origin = self.dims.column_slot(column, slot);
            if let Some(chunk) = self.chunks.get_mut(&origin) {
                if chunk.visible != visible {
                    touched.push(origin);
                }
                chunk.visible = visible;
            }
        }
        touched
    }

    /// Addresses a local coordinate relative to `origin`, stepping into the
    /// neighbouring chunk when one axis is one step out of range.
    pub fn locate(&self, local: IVec3, origin: IVec3) -> Result<BlockAddress, Unreachable> {
        let (local, target) = self.dims.resolve_neighbor(local, origin);
        let index = self.dims.try_flatten(local).ok_or(Unreachable::OutsideChunk {
            origin: target,
            local,
        })?;
        if !self.chunks.contains_key(&target) {
            return Err(Unreachable::NotStreamed(target));
        }
        Ok(BlockAddress::new(target, index))
    }

    /// Address of the voxel offset by `delta` from `at`.
    pub fn neighbor(&self, at: BlockAddress, delta: IVec3) -> Result<BlockAddress, Unreachable> {
        let local = self.dims.unflatten(at.index) + delta;
        self.locate(local, at.origin)
    }

    /// Block at an address; `None` when the chunk is missing or the index is out of range.
    #[inline]
    pub fn block(&self, at: BlockAddress) -> Option<BlockType> {
        self.chunks.get(&at.origin).and_then(|c| c.blocks.get(at.index).copied())
    }

    /// World coordinate of an address.
    #[inline]
    pub fn world_pos(&self, at: BlockAddress) -> IVec3 {
        at.origin + self.dims.unflatten(at.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ChunkRegistry {
        ChunkRegistry::new(ChunkDims::cube(4))
    }

    #[test]
    fn insert_rejects_duplicates_and_misaligned() {
        let mut reg = registry();
        let d = reg.dims();
        reg.insert(Chunk::filled(IVec3::ZERO, d, BlockType::Dirt)).unwrap();
        assert_eq!(
            reg.insert(Chunk::filled(IVec3::ZERO, d, BlockType::Stone)).unwrap_err(),
            RegistryError::DuplicateOrigin(IVec3::ZERO)
        );
        assert!(matches!(
            reg.insert(Chunk::filled(IVec3::new(2, 0, 0), d, BlockType::Stone)),
            Err(RegistryError::Misaligned { .. })
        ));
        assert!(matches!(
            reg.insert(Chunk::filled(IVec3::new(4, 0, 0), ChunkDims::cube(2), BlockType::Stone)),
            Err(RegistryError::WrongDims { .. })
        ));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(IVec3::ZERO).unwrap().block(0), BlockType::Dirt);
    }

    #[test]
    fn locate_distinguishes_missing_chunk() {
        let mut reg = registry();
        let d = reg.dims();
        reg.insert(Chunk::filled(IVec3::ZERO, d, BlockType::Dirt)).unwrap();
        let inside = reg.locate(IVec3::new(1, 2, 3), IVec3::ZERO).unwrap();
        assert_eq!(inside.origin, IVec3::ZERO);
        assert_eq!(inside.index, d.flatten(IVec3::new(1, 2, 3)));
        assert_eq!(
            reg.locate(IVec3::new(4, 0, 0), IVec3::ZERO),
            Err(Unreachable::NotStreamed(IVec3::new(4, 0, 0)))
        );
        assert!(matches!(
            reg.locate(IVec3::new(-1, 4, 0), IVec3::ZERO),
            Err(Unreachable::OutsideChunk { .. })
        ));
    }

    #[test]
    fn neighbor_crosses_seam() {
        let mut reg = registry();
        let d = reg.dims();
        reg.insert(Chunk::filled(IVec3::ZERO, d, BlockType::Dirt)).unwrap();
        reg.insert(Chunk::filled(IVec3::new(0, 4, 0), d, BlockType::Air)).unwrap();
        let top = BlockAddress::new(IVec3::ZERO, d.flatten(IVec3::new(2, 3, 1)));
        let above = reg.neighbor(top, IVec3::Y).unwrap();
        assert_eq!(above.origin, IVec3::new(0, 4, 0));
        assert_eq!(reg.world_pos(above), IVec3::new(2, 4, 1));
        assert_eq!(reg.block(above), Some(BlockType::Air));
    }

    #[test]
    fn column_visibility_reports_changes() {
        let mut reg = registry();
        let d = reg.dims();
        for slot in 0..3 {
            reg.insert(Chunk::filled(IVec3::new(8, slot * 4, 4), d, BlockType::Air)).unwrap();
        }
        assert!(reg.add_column(IVec2::new(8, 4)));
        assert!(!reg.add_column(IVec2::new(8, 4)));
        let touched = reg.set_column_visible(IVec2::new(8, 4), 3, false);
        assert_eq!(touched.len(), 3);
        assert!(reg.iter().all(|c| !c.visible));
        assert!(reg.set_column_visible(IVec2::new(8, 4), 3, false).is_empty());
        assert_eq!(reg.column_count(), 1);
    }
}

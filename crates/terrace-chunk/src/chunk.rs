use terrace_blocks::BlockType;
use terrace_geom::IVec3;
use terrace_world::ChunkDims;

/// One cubic chunk: block tags, per-voxel crack stage and visibility.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    origin: IVec3,
    dims: ChunkDims,
    pub blocks: Vec<BlockType>,
    pub health: Vec<BlockType>,
    pub visible: bool,
}

impl Chunk {
    pub fn filled(origin: IVec3, dims: ChunkDims, block: BlockType) -> Self {
        Self::from_blocks(origin, dims, vec![block; dims.volume()])
    }

    /// Wraps a block array, padding with air or truncating to the chunk volume.
    /// Health starts at baseline and the chunk starts visible.
    pub fn from_blocks(origin: IVec3, dims: ChunkDims, blocks: Vec<BlockType>) -> Self {
        let mut b = blocks;
        let expect = dims.volume();
        if b.len() != expect {
            b.resize(expect, BlockType::Air);
        }
        Chunk {
            origin,
            dims,
            blocks: b,
            health: vec![BlockType::BASELINE; expect],
            visible: true,
        }
    }

    #[inline]
    pub fn origin(&self) -> IVec3 {
        self.origin
    }

    #[inline]
    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    #[inline]
    pub fn block(&self, index: usize) -> BlockType {
        self.blocks[index]
    }

    #[inline]
    pub fn health(&self, index: usize) -> BlockType {
        self.health[index]
    }

    #[inline]
    pub fn get_local(&self, local: IVec3) -> Option<BlockType> {
        self.dims.try_flatten(local).map(|i| self.blocks[i])
    }

    #[inline]
    pub fn contains_world(&self, world: IVec3) -> bool {
        self.dims.contains_local(world - self.origin)
    }

    #[inline]
    pub fn get_world(&self, world: IVec3) -> Option<BlockType> {
        self.get_local(world - self.origin)
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.blocks.iter().any(|b| !b.is_air())
    }
}

/// Receives redraw requests after a chunk's arrays or visibility change.
pub trait MeshBuilder {
    fn rebuild(&mut self, chunk: &Chunk);
}

impl<M: MeshBuilder + ?Sized> MeshBuilder for &mut M {
    fn rebuild(&mut self, chunk: &Chunk) {
        (**self).rebuild(chunk);
    }
}

/// Drops every request.
#[derive(Default, Clone, Copy, Debug)]
pub struct NullMesher;

impl MeshBuilder for NullMesher {
    fn rebuild(&mut self, _chunk: &Chunk) {}
}

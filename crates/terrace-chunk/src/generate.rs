use terrace_geom::IVec3;
use terrace_world::{ColumnTile, NoiseField, TerrainGenerator, WorldConfig};

use crate::chunk::Chunk;

/// Builds the chunk at `origin` from terrain noise. Same inputs, same blocks.
pub fn generate_chunk<N: NoiseField + ?Sized>(
    cfg: &WorldConfig,
    noise: &N,
    origin: IVec3,
) -> Chunk {
    let dims = cfg.chunk;
    let generator = TerrainGenerator::new(&cfg.terrain, noise);
    // Padded column tile so canopies reaching across the seam match the neighbour.
    let tile = ColumnTile::prepare(
        &generator,
        origin.x,
        origin.z,
        dims.x as usize,
        dims.z as usize,
    );
    let mut blocks = Vec::with_capacity(dims.volume());
    for z in 0..dims.z {
        for y in 0..dims.y {
            for x in 0..dims.x {
                blocks.push(generator.block_at(&tile, origin.x + x, origin.y + y, origin.z + z));
            }
        }
    }
    log::trace!(target: "stream", "generated chunk {:?}", origin);
    Chunk::from_blocks(origin, dims, blocks)
}

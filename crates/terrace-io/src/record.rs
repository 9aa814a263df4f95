use serde::{Deserialize, Serialize};
use terrace_blocks::BlockType;
use terrace_chunk::{Chunk, ChunkRegistry};
use terrace_geom::{IVec2, IVec3, Vec3};
use terrace_world::ChunkDims;

use crate::PersistenceError;

/// Flat, serializable image of a registry plus the observer position.
///
/// Per-chunk arrays are concatenated in `chunk_origins` order. An empty
/// `health` array restores every voxel at baseline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldRecord {
    pub chunk_dims: ChunkDims,
    pub chunk_origins: Vec<i32>,
    pub columns: Vec<i32>,
    pub blocks: Vec<u8>,
    pub health: Vec<u8>,
    pub visibility: Vec<bool>,
    pub observer: [f32; 3],
}

impl WorldRecord {
    pub fn chunk_count(&self) -> usize {
        self.chunk_origins.len() / 3
    }

    pub fn observer(&self) -> Vec3 {
        Vec3::from_array(self.observer)
    }
}

pub fn snapshot(reg: &ChunkRegistry, observer: Vec3) -> WorldRecord {
    let dims = reg.dims();
    let mut origins: Vec<IVec3> = reg.origins().collect();
    origins.sort_unstable();
    let mut columns: Vec<IVec2> = reg.columns().collect();
    columns.sort_unstable_by_key(|c| (c.x, c.z));

    let volume = dims.volume();
    let mut rec = WorldRecord {
        chunk_dims: dims,
        chunk_origins: Vec::with_capacity(origins.len() * 3),
        columns: columns.iter().flat_map(|c| [c.x, c.z]).collect(),
        blocks: Vec::with_capacity(origins.len() * volume),
        health: Vec::with_capacity(origins.len() * volume),
        visibility: Vec::with_capacity(origins.len()),
        observer: observer.to_array(),
    };
    for origin in origins {
        let Some(chunk) = reg.get(origin) else {
            continue;
        };
        rec.chunk_origins.extend_from_slice(&origin.to_array());
        rec.blocks.extend(chunk.blocks.iter().map(|b| b.tag()));
        rec.health.extend(chunk.health.iter().map(|h| h.tag()));
        rec.visibility.push(chunk.visible);
    }
    log::debug!(
        "snapshot: {} chunks, {} columns",
        rec.visibility.len(),
        rec.columns.len() / 2
    );
    rec
}

fn corrupted(what: impl Into<String>) -> PersistenceError {
    PersistenceError::Corrupted(what.into())
}

/// Rebuilds a registry from a record, checking array lengths and tags.
pub fn restore(
    rec: &WorldRecord,
    dims: ChunkDims,
) -> Result<(ChunkRegistry, Vec3), PersistenceError> {
    if rec.chunk_dims != dims {
        return Err(PersistenceError::DimsMismatch {
            expected: dims,
            found: rec.chunk_dims,
        });
    }
    if rec.chunk_origins.len() % 3 != 0 {
        return Err(corrupted("origin array is not a list of triples"));
    }
    if rec.columns.len() % 2 != 0 {
        return Err(corrupted("column array is not a list of pairs"));
    }
    let count = rec.chunk_count();
    let volume = dims.volume();
    if rec.blocks.len() != count * volume {
        return Err(corrupted(format!(
            "expected {} block tags, found {}",
            count * volume,
            rec.blocks.len()
        )));
    }
    if !rec.health.is_empty() && rec.health.len() != rec.blocks.len() {
        return Err(corrupted("health array does not match block array"));
    }
    if rec.visibility.len() != count {
        return Err(corrupted("visibility array does not match chunk count"));
    }
    if rec.observer.iter().any(|v| !v.is_finite()) {
        return Err(corrupted("observer position is not finite"));
    }

    let mut reg = ChunkRegistry::new(dims);
    for (i, o) in rec.chunk_origins.chunks_exact(3).enumerate() {
        let origin = IVec3::new(o[0], o[1], o[2]);
        let span = i * volume..(i + 1) * volume;
        let blocks = rec.blocks[span.clone()]
            .iter()
            .map(|t| BlockType::from_tag(*t))
            .collect::<Result<Vec<_>, _>>()?;
        let mut chunk = Chunk::from_blocks(origin, dims, blocks);
        if !rec.health.is_empty() {
            for (slot, t) in chunk.health.iter_mut().zip(&rec.health[span]) {
                let h = BlockType::from_tag(*t)?;
                if !h.is_crack_stage() {
                    return Err(corrupted(format!("health tag {t} is not a crack stage")));
                }
                *slot = h;
            }
        }
        chunk.visible = rec.visibility[i];
        reg.insert(chunk)?;
    }
    for c in rec.columns.chunks_exact(2) {
        reg.add_column(IVec2::new(c[0], c[1]));
    }
    log::info!("restored {} chunks", reg.len());
    Ok((reg, rec.observer()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChunkRegistry {
        let d = ChunkDims::new(2, 2, 2);
        let mut reg = ChunkRegistry::new(d);
        let a = reg.insert(Chunk::filled(IVec3::new(2, 0, 0), d, BlockType::Stone)).unwrap();
        a.health[3] = BlockType::Crack2;
        let b = reg.insert(Chunk::filled(IVec3::ZERO, d, BlockType::Water)).unwrap();
        b.visible = false;
        reg.add_column(IVec2::new(0, 0));
        reg.add_column(IVec2::new(2, 0));
        reg
    }

    #[test]
    fn snapshot_orders_origins() {
        let rec = snapshot(&sample(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(rec.chunk_origins, vec![0, 0, 0, 2, 0, 0]);
        assert_eq!(rec.columns, vec![0, 0, 2, 0]);
        assert_eq!(rec.visibility, vec![false, true]);
        assert_eq!(rec.blocks[0], BlockType::Water.tag());
        assert_eq!(rec.health[8 + 3], BlockType::Crack2.tag());
    }

    #[test]
    fn restore_rejects_bad_lengths_and_tags() {
        let good = snapshot(&sample(), Vec3::ZERO);
        let d = good.chunk_dims;

        let mut short = good.clone();
        short.blocks.pop();
        assert!(matches!(restore(&short, d), Err(PersistenceError::Corrupted(_))));

        let mut bad_tag = good.clone();
        bad_tag.blocks[0] = 200;
        assert!(matches!(restore(&bad_tag, d), Err(PersistenceError::UnknownTag(_))));

        let mut bad_health = good.clone();
        bad_health.health[0] = BlockType::Dirt.tag();
        assert!(matches!(restore(&bad_health, d), Err(PersistenceError::Corrupted(_))));

        assert!(matches!(
            restore(&good, ChunkDims::cube(4)),
            Err(PersistenceError::DimsMismatch { .. })
        ));
    }

    #[test]
    fn empty_health_means_baseline() {
        let mut rec = snapshot(&sample(), Vec3::ZERO);
        rec.health.clear();
        let (reg, _) = restore(&rec, rec.chunk_dims).unwrap();
        assert!(reg.iter().all(|c| c.health.iter().all(|h| *h == BlockType::BASELINE)));
    }
}

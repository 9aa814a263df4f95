use hashbrown::HashMap;
use terrace_chunk::{Chunk, MeshBuilder};
use terrace_geom::IVec3;

/// Stand-in for a real mesher: counts redraw requests per chunk.
#[derive(Default)]
pub struct LoggingMesher {
    counts: HashMap<IVec3, u32>,
    total: u64,
}

impl LoggingMesher {
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }
}

impl MeshBuilder for LoggingMesher {
    fn rebuild(&mut self, chunk: &Chunk) {
        let n = self.counts.entry(chunk.origin()).or_insert(0);
        *n += 1;
        self.total += 1;
        log::trace!(
            target: "mesh",
            "rebuild {:?} visible={} solid={} (#{})",
            chunk.origin(),
            chunk.visible,
            chunk.has_non_air(),
            n
        );
    }
}

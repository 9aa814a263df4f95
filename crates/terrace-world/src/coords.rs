use serde::{Deserialize, Serialize};
use terrace_geom::{IVec2, IVec3};

/// Chunk dimensions and the local/flat index arithmetic that goes with them.
///
/// Flat indices run x fastest, then y, then z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkDims {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Default for ChunkDims {
    fn default() -> Self {
        Self::cube(10)
    }
}

impl ChunkDims {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn cube(n: i32) -> Self {
        Self { x: n, y: n, z: n }
    }

    #[inline]
    pub fn as_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn volume(self) -> usize {
        (self.x as usize) * (self.y as usize) * (self.z as usize)
    }

    #[inline]
    pub fn contains_local(self, local: IVec3) -> bool {
        (0..self.x).contains(&local.x)
            && (0..self.y).contains(&local.y)
            && (0..self.z).contains(&local.z)
    }

    /// Flat index of an in-range local coordinate.
    #[inline]
    pub fn flatten(self, local: IVec3) -> usize {
        debug_assert!(self.contains_local(local), "local {local:?} outside {self:?}");
        (local.x + self.x * (local.y + self.y * local.z)) as usize
    }

    #[inline]
    pub fn try_flatten(self, local: IVec3) -> Option<usize> {
        self.contains_local(local).then(|| self.flatten(local))
    }

    #[inline]
    pub fn unflatten(self, index: usize) -> IVec3 {
        let i = index as i32;
        IVec3::new(i % self.x, (i / self.x) % self.y, i / (self.x * self.y))
    }

    /// Moves a local coordinate that sits one step outside the chunk into the
    /// neighbouring chunk.
    ///
    /// Axes are checked in +x, -x, +y, -y, +z, -z order and only the first
    /// overflowing axis is wrapped; a coordinate overflowing two axes comes back
    /// still out of range on the second.
    pub fn resolve_neighbor(self, local: IVec3, origin: IVec3) -> (IVec3, IVec3) {
        let mut out = local;
        let mut target = origin;
        if local.x == self.x {
            target.x += self.x;
            out.x = 0;
        } else if local.x == -1 {
            target.x -= self.x;
            out.x = self.x - 1;
        } else if local.y == self.y {
            target.y += self.y;
            out.y = 0;
        } else if local.y == -1 {
            target.y -= self.y;
            out.y = self.y - 1;
        } else if local.z == self.z {
            target.z += self.z;
            out.z = 0;
        } else if local.z == -1 {
            target.z -= self.z;
            out.z = self.z - 1;
        }
        (out, target)
    }

    /// Origin of the chunk holding a world block coordinate.
    #[inline]
    pub fn origin_of(self, world: IVec3) -> IVec3 {
        IVec3::new(
            world.x.div_euclid(self.x) * self.x,
            world.y.div_euclid(self.y) * self.y,
            world.z.div_euclid(self.z) * self.z,
        )
    }

    #[inline]
    pub fn is_aligned(self, origin: IVec3) -> bool {
        origin.x.rem_euclid(self.x) == 0
            && origin.y.rem_euclid(self.y) == 0
            && origin.z.rem_euclid(self.z) == 0
    }

    /// Column (x/z origin) holding a world block coordinate.
    #[inline]
    pub fn column_of(self, world: IVec3) -> IVec2 {
        self.origin_of(world).xz()
    }

    /// Origin of the chunk in vertical slot `slot` of a column.
    #[inline]
    pub fn column_slot(self, column: IVec2, slot: i32) -> IVec3 {
        IVec3::new(column.x, slot * self.y, column.z)
    }
}

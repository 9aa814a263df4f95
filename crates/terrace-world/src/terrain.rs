use terrace_blocks::BlockType;

use crate::config::TerrainSettings;
use crate::noise::NoiseField;

/// Trunk length above the `WoodBase` surface voxel.
pub const TRUNK_HEIGHT: i32 = 3;

/// Per-column values shared by every voxel in the column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSample {
    pub surface: i32,
    pub stone: i32,
    pub diamond_top: i32,
    pub diamond_bottom: i32,
    pub tree: bool,
}

/// Deterministic block classification over world coordinates.
pub struct TerrainGenerator<'a, N: NoiseField + ?Sized> {
    settings: &'a TerrainSettings,
    noise: &'a N,
}

impl<'a, N: NoiseField + ?Sized> TerrainGenerator<'a, N> {
    pub fn new(settings: &'a TerrainSettings, noise: &'a N) -> Self {
        Self { settings, noise }
    }

    #[inline]
    pub fn settings(&self) -> &TerrainSettings {
        self.settings
    }

    #[inline]
    fn height(&self, wx: i32, wz: i32, s: &crate::noise::NoiseSettings) -> i32 {
        self.noise.sample_height(wx as f32, wz as f32, s).floor() as i32
    }

    #[inline]
    fn below_cutoff(&self, wx: i32, wy: i32, wz: i32, s: &crate::noise::NoiseSettings) -> bool {
        self.noise
            .sample_density(wx as f32, wy as f32, wz as f32, s)
            < s.probability
    }

    pub fn surface_height(&self, wx: i32, wz: i32) -> i32 {
        self.height(wx, wz, &self.settings.surface)
    }

    pub fn column(&self, wx: i32, wz: i32) -> ColumnSample {
        let s = self.settings;
        let surface = self.surface_height(wx, wz);
        let tree = surface > s.sea_level && self.below_cutoff(wx, surface, wz, &s.trees);
        ColumnSample {
            surface,
            stone: self.height(wx, wz, &s.stone),
            diamond_top: self.height(wx, wz, &s.diamond_top),
            diamond_bottom: self.height(wx, wz, &s.diamond_bottom),
            tree,
        }
    }

    fn sample(&self, tile: &ColumnTile, wx: i32, wz: i32) -> ColumnSample {
        tile.get(wx, wz).unwrap_or_else(|| self.column(wx, wz))
    }

    /// Block at a world position. `tile` should cover the column and its
    /// cardinal neighbours; missing columns are sampled directly.
    pub fn block_at(&self, tile: &ColumnTile, wx: i32, wy: i32, wz: i32) -> BlockType {
        if wy < 0 {
            return BlockType::Air;
        }
        if wy == 0 {
            return BlockType::Bedrock;
        }
        let col = self.sample(tile, wx, wz);
        if wy < col.surface {
            if self.below_cutoff(wx, wy, wz, &self.settings.caves) {
                return BlockType::Air;
            }
            if wy < col.stone {
                return self.stone_or_ore(&col, wx, wy, wz);
            }
            return BlockType::Dirt;
        }
        if wy == col.surface {
            return if col.tree {
                BlockType::WoodBase
            } else {
                BlockType::GrassTop
            };
        }
        if wy <= self.settings.sea_level {
            return BlockType::Water;
        }
        self.vegetation(tile, &col, wx, wy, wz)
    }

    fn stone_or_ore(&self, col: &ColumnSample, wx: i32, wy: i32, wz: i32) -> BlockType {
        let s = self.settings;
        if wy > col.diamond_bottom
            && wy < col.diamond_top
            && self.below_cutoff(wx, wy, wz, &s.diamond_top)
        {
            BlockType::Diamond
        } else if self.below_cutoff(wx, wy, wz, &s.redstone) {
            BlockType::Redstone
        } else if self.below_cutoff(wx, wy, wz, &s.gold) {
            BlockType::Gold
        } else {
            BlockType::Stone
        }
    }

    fn vegetation(
        &self,
        tile: &ColumnTile,
        col: &ColumnSample,
        wx: i32,
        wy: i32,
        wz: i32,
    ) -> BlockType {
        if col.tree {
            let above = wy - col.surface;
            if above <= TRUNK_HEIGHT {
                return BlockType::Wood;
            }
            if above == TRUNK_HEIGHT + 1 {
                return BlockType::Leaves;
            }
        }
        for (dx, dz) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let n = self.sample(tile, wx + dx, wz + dz);
            if n.tree && wy == n.surface + TRUNK_HEIGHT + 1 {
                return BlockType::Leaves;
            }
        }
        BlockType::Air
    }
}

/// Column samples for a chunk footprint padded by one column on every side.
pub struct ColumnTile {
    min_x: i32,
    min_z: i32,
    sx: usize,
    sz: usize,
    samples: Vec<ColumnSample>,
}

impl ColumnTile {
    pub fn prepare<N: NoiseField + ?Sized>(
        generator: &TerrainGenerator<'_, N>,
        base_x: i32,
        base_z: i32,
        sx: usize,
        sz: usize,
    ) -> Self {
        let min_x = base_x - 1;
        let min_z = base_z - 1;
        let (sx, sz) = (sx + 2, sz + 2);
        let mut samples = Vec::with_capacity(sx * sz);
        for z in 0..sz {
            for x in 0..sx {
                samples.push(generator.column(min_x + x as i32, min_z + z as i32));
            }
        }
        Self {
            min_x,
            min_z,
            sx,
            sz,
            samples,
        }
    }

    /// Tile covering nothing; every lookup falls back to direct sampling.
    pub fn empty() -> Self {
        Self {
            min_x: 0,
            min_z: 0,
            sx: 0,
            sz: 0,
            samples: Vec::new(),
        }
    }

    #[inline]
    pub fn get(&self, wx: i32, wz: i32) -> Option<ColumnSample> {
        let lx = usize::try_from(wx - self.min_x).ok()?;
        let lz = usize::try_from(wz - self.min_z).ok()?;
        if lx >= self.sx || lz >= self.sz {
            return None;
        }
        self.samples.get(lz * self.sx + lx).copied()
    }
}

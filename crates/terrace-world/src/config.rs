use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use terrace_blocks::BlockType;
use terrace_geom::IVec3;
use thiserror::Error;

use crate::coords::ChunkDims;
use crate::noise::NoiseSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse world config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// World configuration as written in TOML. Every field has a default.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldConfigFile {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub chunk: ChunkSection,
    #[serde(default)]
    pub streaming: StreamingSection,
    #[serde(default)]
    pub mutation: MutationSection,
    #[serde(default)]
    pub terrain: TerrainSettings,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldSection {
    #[serde(default = "d_columns")]
    pub columns_x: i32,
    #[serde(default = "d_chunks_y")]
    pub chunks_y: i32,
    #[serde(default = "d_columns")]
    pub columns_z: i32,
    #[serde(default = "d_extra")]
    pub extra_x: i32,
    #[serde(default = "d_extra")]
    pub extra_z: i32,
}
fn d_columns() -> i32 {
    10
}
fn d_chunks_y() -> i32 {
    4
}
fn d_extra() -> i32 {
    5
}
impl Default for WorldSection {
    fn default() -> Self {
        Self {
            columns_x: d_columns(),
            chunks_y: d_chunks_y(),
            columns_z: d_columns(),
            extra_x: d_extra(),
            extra_z: d_extra(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChunkSection {
    #[serde(default = "d_chunk_dim")]
    pub x: i32,
    #[serde(default = "d_chunk_dim")]
    pub y: i32,
    #[serde(default = "d_chunk_dim")]
    pub z: i32,
}
fn d_chunk_dim() -> i32 {
    10
}
impl Default for ChunkSection {
    fn default() -> Self {
        Self {
            x: d_chunk_dim(),
            y: d_chunk_dim(),
            z: d_chunk_dim(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct StreamingSection {
    #[serde(default = "d_draw_radius")]
    pub draw_radius: i32,
    #[serde(default = "d_update_interval")]
    pub update_interval_secs: f32,
}
fn d_draw_radius() -> i32 {
    5
}
fn d_update_interval() -> f32 {
    0.5
}
impl Default for StreamingSection {
    fn default() -> Self {
        Self {
            draw_radius: d_draw_radius(),
            update_interval_secs: d_update_interval(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct MutationSection {
    #[serde(default = "d_heal_delay")]
    pub heal_delay_secs: f32,
    #[serde(default = "d_drop_delay")]
    pub drop_delay_secs: f32,
    #[serde(default = "d_flow_strength")]
    pub flow_strength: i32,
    /// Block placed by the secondary action until changed, by name.
    #[serde(default = "d_build_type")]
    pub build_type: BlockType,
}
fn d_heal_delay() -> f32 {
    3.0
}
fn d_drop_delay() -> f32 {
    0.1
}
fn d_build_type() -> BlockType {
    BlockType::Dirt
}
fn d_flow_strength() -> i32 {
    3
}
impl Default for MutationSection {
    fn default() -> Self {
        Self {
            heal_delay_secs: d_heal_delay(),
            drop_delay_secs: d_drop_delay(),
            flow_strength: d_flow_strength(),
            build_type: d_build_type(),
        }
    }
}

/// Per-feature noise settings used by terrain generation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TerrainSettings {
    #[serde(default)]
    pub seed: i32,
    #[serde(default = "d_sea_level")]
    pub sea_level: i32,
    #[serde(default = "d_surface")]
    pub surface: NoiseSettings,
    #[serde(default = "d_stone")]
    pub stone: NoiseSettings,
    #[serde(default = "d_diamond_top")]
    pub diamond_top: NoiseSettings,
    #[serde(default = "d_diamond_bottom")]
    pub diamond_bottom: NoiseSettings,
    #[serde(default = "d_gold")]
    pub gold: NoiseSettings,
    #[serde(default = "d_redstone")]
    pub redstone: NoiseSettings,
    #[serde(default = "d_caves")]
    pub caves: NoiseSettings,
    #[serde(default = "d_trees")]
    pub trees: NoiseSettings,
}
fn d_sea_level() -> i32 {
    14
}
fn d_surface() -> NoiseSettings {
    NoiseSettings::new(5.0, 0.015, 2, 12.0, 0.0)
}
fn d_stone() -> NoiseSettings {
    NoiseSettings::new(4.0, 0.02, 2, 6.0, 0.0)
}
fn d_diamond_top() -> NoiseSettings {
    NoiseSettings::new(6.0, 0.05, 1, 4.0, 0.41)
}
fn d_diamond_bottom() -> NoiseSettings {
    NoiseSettings::new(4.0, 0.05, 1, 0.0, 0.0)
}
fn d_gold() -> NoiseSettings {
    NoiseSettings::new(1.0, 0.12, 1, 0.0, 0.4)
}
fn d_redstone() -> NoiseSettings {
    NoiseSettings::new(1.0, 0.09, 1, 0.0, 0.4)
}
fn d_caves() -> NoiseSettings {
    NoiseSettings::new(1.0, 0.06, 2, 0.0, 0.39)
}
fn d_trees() -> NoiseSettings {
    NoiseSettings::new(1.0, 0.3, 1, 0.0, 0.36)
}
impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            sea_level: d_sea_level(),
            surface: d_surface(),
            stone: d_stone(),
            diamond_top: d_diamond_top(),
            diamond_bottom: d_diamond_bottom(),
            gold: d_gold(),
            redstone: d_redstone(),
            caves: d_caves(),
            trees: d_trees(),
        }
    }
}

impl TerrainSettings {
    fn features(&self) -> [(&'static str, &NoiseSettings); 8] {
        [
            ("terrain.surface", &self.surface),
            ("terrain.stone", &self.stone),
            ("terrain.diamond_top", &self.diamond_top),
            ("terrain.diamond_bottom", &self.diamond_bottom),
            ("terrain.gold", &self.gold),
            ("terrain.redstone", &self.redstone),
            ("terrain.caves", &self.caves),
            ("terrain.trees", &self.trees),
        ]
    }
}

/// Validated, immutable world configuration built once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    /// Columns along x/z and chunks per column along y.
    pub world: IVec3,
    /// Width of the invisible backdrop ring along x/z.
    pub extra_world: IVec3,
    pub chunk: ChunkDims,
    pub draw_radius: u32,
    pub update_interval: Duration,
    pub heal_delay: Duration,
    pub drop_delay: Duration,
    pub flow_strength: u32,
    pub build_type: BlockType,
    pub terrain: TerrainSettings,
}

impl Default for WorldConfig {
    fn default() -> Self {
        // Defaults are known-valid.
        match Self::from_file_config(&WorldConfigFile::default()) {
            Ok(cfg) => cfg,
            Err(e) => unreachable!("default world config rejected: {e}"),
        }
    }
}

fn secs(field: &'static str, v: f32) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f32(v).map_err(|e| invalid(field, format!("{v}: {e}")))
}

fn non_negative(field: &'static str, v: i32) -> Result<u32, ConfigError> {
    u32::try_from(v).map_err(|_| invalid(field, format!("{v} must be >= 0")))
}

fn positive(field: &'static str, v: i32) -> Result<i32, ConfigError> {
    if v > 0 {
        Ok(v)
    } else {
        Err(invalid(field, format!("{v} must be > 0")))
    }
}

impl WorldConfig {
    pub fn from_file_config(cfg: &WorldConfigFile) -> Result<Self, ConfigError> {
        let world = IVec3::new(
            positive("world.columns_x", cfg.world.columns_x)?,
            positive("world.chunks_y", cfg.world.chunks_y)?,
            positive("world.columns_z", cfg.world.columns_z)?,
        );
        let extra_world = IVec3::new(
            non_negative("world.extra_x", cfg.world.extra_x)? as i32,
            0,
            non_negative("world.extra_z", cfg.world.extra_z)? as i32,
        );
        let chunk = ChunkDims::new(
            positive("chunk.x", cfg.chunk.x)?,
            positive("chunk.y", cfg.chunk.y)?,
            positive("chunk.z", cfg.chunk.z)?,
        );
        for (field, s) in cfg.terrain.features() {
            if s.octaves < 1 {
                return Err(invalid(field, format!("octaves {} must be >= 1", s.octaves)));
            }
            if !(s.scale.is_finite() && s.height_scale.is_finite() && s.height_offset.is_finite())
            {
                return Err(invalid(field, "non-finite noise parameter"));
            }
        }
        let build_type = cfg.mutation.build_type;
        if build_type.is_crack_stage() || build_type.is_air() {
            return Err(invalid(
                "mutation.build_type",
                format!("{build_type} cannot be placed"),
            ));
        }
        Ok(Self {
            world,
            extra_world,
            chunk,
            draw_radius: non_negative("streaming.draw_radius", cfg.streaming.draw_radius)?,
            update_interval: secs(
                "streaming.update_interval_secs",
                cfg.streaming.update_interval_secs,
            )?,
            heal_delay: secs("mutation.heal_delay_secs", cfg.mutation.heal_delay_secs)?,
            drop_delay: secs("mutation.drop_delay_secs", cfg.mutation.drop_delay_secs)?,
            flow_strength: non_negative("mutation.flow_strength", cfg.mutation.flow_strength)?,
            build_type,
            terrain: cfg.terrain.clone(),
        })
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: WorldConfigFile = toml::from_str(s)?;
        Self::from_file_config(&cfg)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let cfg = Self::from_toml_str(&s)?;
        log::info!("world config loaded from {}", path.display());
        Ok(cfg)
    }

    /// Total number of blocks along x and z covered by the visible world.
    #[inline]
    pub fn world_extent_xz(&self) -> (i32, i32) {
        (self.world.x * self.chunk.x, self.world.z * self.chunk.z)
    }
}

//! Chunk addressing, world configuration and terrain sampling.
#![forbid(unsafe_code)]

pub mod config;
pub mod coords;
pub mod noise;
pub mod terrain;

pub use config::{ConfigError, TerrainSettings, WorldConfig, WorldConfigFile};
pub use coords::ChunkDims;
pub use noise::{NoiseField, NoiseSettings, PerlinField};
pub use terrain::{ColumnSample, ColumnTile, TerrainGenerator};

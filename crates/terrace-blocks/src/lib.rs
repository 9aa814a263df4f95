//! Block type tags, crack stages and per-type behaviour tables.
#![forbid(unsafe_code)]

pub mod types;

pub use types::{BlockType, UnknownBlockTag};

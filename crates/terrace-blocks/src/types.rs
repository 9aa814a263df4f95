use core::fmt;

use serde::{Deserialize, Serialize};

/// Compact voxel tag stored in chunk arrays.
///
/// `NoCrack..=Crack4` doubles as the per-voxel health counter: a freshly placed
/// or healed voxel sits at `NoCrack` and each hit advances one stage.
#[repr(u8)]
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    GrassTop = 0,
    GrassSide = 1,
    Dirt = 2,
    Water = 3,
    Stone = 4,
    Sand = 5,
    Gold = 6,
    Bedrock = 7,
    Redstone = 8,
    Diamond = 9,
    NoCrack = 10,
    Crack1 = 11,
    Crack2 = 12,
    Crack3 = 13,
    Crack4 = 14,
    #[default]
    Air = 15,
    WoodBase = 16,
    Wood = 17,
    Leaves = 18,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnknownBlockTag(pub u8);

impl fmt::Display for UnknownBlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown block tag {}", self.0)
    }
}

impl std::error::Error for UnknownBlockTag {}

impl BlockType {
    pub const ALL: [BlockType; 19] = [
        BlockType::GrassTop,
        BlockType::GrassSide,
        BlockType::Dirt,
        BlockType::Water,
        BlockType::Stone,
        BlockType::Sand,
        BlockType::Gold,
        BlockType::Bedrock,
        BlockType::Redstone,
        BlockType::Diamond,
        BlockType::NoCrack,
        BlockType::Crack1,
        BlockType::Crack2,
        BlockType::Crack3,
        BlockType::Crack4,
        BlockType::Air,
        BlockType::WoodBase,
        BlockType::Wood,
        BlockType::Leaves,
    ];

    /// Baseline health value.
    pub const BASELINE: BlockType = BlockType::NoCrack;

    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn from_tag(tag: u8) -> Result<BlockType, UnknownBlockTag> {
        BlockType::ALL
            .get(tag as usize)
            .copied()
            .ok_or(UnknownBlockTag(tag))
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self == BlockType::Air
    }

    /// Number of hits needed to break this block, `None` for unbreakable tags.
    pub fn break_threshold(self) -> Option<u8> {
        match self {
            BlockType::GrassTop | BlockType::GrassSide => Some(2),
            BlockType::Dirt | BlockType::Leaves => Some(1),
            BlockType::Sand | BlockType::Wood | BlockType::WoodBase => Some(3),
            BlockType::Stone | BlockType::Gold | BlockType::Redstone | BlockType::Diamond => {
                Some(4)
            }
            BlockType::Water
            | BlockType::Bedrock
            | BlockType::NoCrack
            | BlockType::Crack1
            | BlockType::Crack2
            | BlockType::Crack3
            | BlockType::Crack4
            | BlockType::Air => None,
        }
    }

    /// Falls when the voxel below is empty.
    #[inline]
    pub fn can_drop(self) -> bool {
        matches!(self, BlockType::Sand | BlockType::Water)
    }

    /// Spreads sideways once it comes to rest.
    #[inline]
    pub fn can_flow(self) -> bool {
        matches!(self, BlockType::Water)
    }

    #[inline]
    pub fn is_crack_stage(self) -> bool {
        (BlockType::NoCrack..=BlockType::Crack4).contains(&self)
    }

    /// Crack stages advanced past `NoCrack`; `0` for non-stage tags.
    #[inline]
    pub fn crack_level(self) -> u8 {
        if self.is_crack_stage() {
            self.tag() - BlockType::NoCrack.tag()
        } else {
            0
        }
    }

    /// Next crack stage, saturating at `Crack4`. Non-stage tags start from `NoCrack`.
    pub fn next_crack(self) -> BlockType {
        match self {
            BlockType::NoCrack => BlockType::Crack1,
            BlockType::Crack1 => BlockType::Crack2,
            BlockType::Crack2 => BlockType::Crack3,
            BlockType::Crack3 | BlockType::Crack4 => BlockType::Crack4,
            _ => BlockType::Crack1,
        }
    }

    /// Name used by config files and logs.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::GrassTop => "grass_top",
            BlockType::GrassSide => "grass_side",
            BlockType::Dirt => "dirt",
            BlockType::Water => "water",
            BlockType::Stone => "stone",
            BlockType::Sand => "sand",
            BlockType::Gold => "gold",
            BlockType::Bedrock => "bedrock",
            BlockType::Redstone => "redstone",
            BlockType::Diamond => "diamond",
            BlockType::NoCrack => "no_crack",
            BlockType::Crack1 => "crack1",
            BlockType::Crack2 => "crack2",
            BlockType::Crack3 => "crack3",
            BlockType::Crack4 => "crack4",
            BlockType::Air => "air",
            BlockType::WoodBase => "wood_base",
            BlockType::Wood => "wood",
            BlockType::Leaves => "leaves",
        }
    }

    pub fn by_name(name: &str) -> Option<BlockType> {
        BlockType::ALL.iter().copied().find(|b| b.name() == name)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

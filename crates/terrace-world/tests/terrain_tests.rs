use terrace_blocks::BlockType;
use terrace_world::terrain::TRUNK_HEIGHT;
use terrace_world::{
    ColumnTile, NoiseField, NoiseSettings, PerlinField, TerrainGenerator, TerrainSettings,
};

/// Heights are the settings' offset; densities come from a caller-chosen closure.
struct FixedField<F: Fn(f32, f32, f32, &NoiseSettings) -> f32> {
    density: F,
}

impl<F: Fn(f32, f32, f32, &NoiseSettings) -> f32> NoiseField for FixedField<F> {
    fn sample_height(&self, _wx: f32, _wz: f32, s: &NoiseSettings) -> f32 {
        s.height_offset
    }
    fn sample_density(&self, wx: f32, wy: f32, wz: f32, s: &NoiseSettings) -> f32 {
        (self.density)(wx, wy, wz, s)
    }
}

fn fixed<F>(density: F) -> FixedField<F>
where
    F: Fn(f32, f32, f32, &NoiseSettings) -> f32,
{
    FixedField { density }
}

fn layered_settings() -> TerrainSettings {
    let mut s = TerrainSettings::default();
    s.surface = NoiseSettings::new(1.0, 0.1, 1, 5.0, 0.0);
    s.stone = NoiseSettings::new(1.0, 0.1, 1, 3.0, 0.0);
    s.diamond_top = NoiseSettings::new(1.0, 0.1, 1, 0.0, 0.5);
    s.diamond_bottom = NoiseSettings::new(1.0, 0.1, 1, 0.0, 0.0);
    s.sea_level = 2;
    s
}

#[test]
fn layers_follow_surface_and_stone_heights() {
    let settings = layered_settings();
    let field = fixed(|_, _, _, _: &NoiseSettings| 1.0);
    let generator = TerrainGenerator::new(&settings, &field);
    let tile = ColumnTile::empty();
    let column: Vec<BlockType> = (0..8).map(|y| generator.block_at(&tile, 3, y, -4)).collect();
    assert_eq!(
        column,
        vec![
            BlockType::Bedrock,
            BlockType::Stone,
            BlockType::Stone,
            BlockType::Dirt,
            BlockType::Dirt,
            BlockType::GrassTop,
            BlockType::Air,
            BlockType::Air,
        ]
    );
    assert_eq!(generator.block_at(&tile, 0, -1, 0), BlockType::Air);
}

#[test]
fn water_fills_up_to_sea_level() {
    let mut settings = layered_settings();
    settings.sea_level = 8;
    let field = fixed(|_, _, _, _: &NoiseSettings| 1.0);
    let generator = TerrainGenerator::new(&settings, &field);
    let tile = ColumnTile::empty();
    assert_eq!(generator.block_at(&tile, 0, 6, 0), BlockType::Water);
    assert_eq!(generator.block_at(&tile, 0, 8, 0), BlockType::Water);
    assert_eq!(generator.block_at(&tile, 0, 9, 0), BlockType::Air);
}

#[test]
fn caves_carve_below_surface_only() {
    let settings = layered_settings();
    let caves = settings.caves;
    let field = fixed(move |_, _, _, s: &NoiseSettings| if *s == caves { 0.0 } else { 1.0 });
    let generator = TerrainGenerator::new(&settings, &field);
    let tile = ColumnTile::empty();
    assert_eq!(generator.block_at(&tile, 1, 0, 1), BlockType::Bedrock);
    for y in 1..5 {
        assert_eq!(generator.block_at(&tile, 1, y, 1), BlockType::Air);
    }
    assert_eq!(generator.block_at(&tile, 1, 5, 1), BlockType::GrassTop);
}

#[test]
fn trees_grow_trunk_and_canopy_across_columns() {
    let settings = layered_settings();
    let trees = settings.trees;
    // Only the column at x=0,z=0 passes the tree cutoff.
    let field = fixed(move |x, _, z, s: &NoiseSettings| {
        if *s == trees && x == 0.0 && z == 0.0 { 0.0 } else { 1.0 }
    });
    let generator = TerrainGenerator::new(&settings, &field);
    let tile = ColumnTile::prepare(&generator, 0, 0, 4, 4);
    assert_eq!(generator.block_at(&tile, 0, 5, 0), BlockType::WoodBase);
    for dy in 1..=TRUNK_HEIGHT {
        assert_eq!(generator.block_at(&tile, 0, 5 + dy, 0), BlockType::Wood);
    }
    let top = 5 + TRUNK_HEIGHT + 1;
    assert_eq!(generator.block_at(&tile, 0, top, 0), BlockType::Leaves);
    assert_eq!(generator.block_at(&tile, -1, top, 0), BlockType::Leaves);
    assert_eq!(generator.block_at(&tile, 0, top, 1), BlockType::Leaves);
    assert_eq!(generator.block_at(&tile, 1, top, 1), BlockType::Air);
    // Tile lookups and direct sampling agree at the padded edge.
    assert_eq!(
        generator.block_at(&tile, -1, top, 0),
        generator.block_at(&ColumnTile::empty(), -1, top, 0)
    );
}

#[test]
fn diamonds_only_inside_band() {
    let mut settings = layered_settings();
    settings.stone = NoiseSettings::new(1.0, 0.1, 1, 5.0, 0.0);
    settings.diamond_top = NoiseSettings::new(1.0, 0.1, 1, 3.0, 0.5);
    settings.diamond_bottom = NoiseSettings::new(1.0, 0.1, 1, 1.0, 0.0);
    let diamond = settings.diamond_top;
    let field = fixed(move |_, _, _, s: &NoiseSettings| if *s == diamond { 0.0 } else { 1.0 });
    let generator = TerrainGenerator::new(&settings, &field);
    let tile = ColumnTile::empty();
    assert_eq!(generator.block_at(&tile, 0, 1, 0), BlockType::Stone);
    assert_eq!(generator.block_at(&tile, 0, 2, 0), BlockType::Diamond);
    assert_eq!(generator.block_at(&tile, 0, 3, 0), BlockType::Stone);
}

#[test]
fn perlin_generation_is_deterministic() {
    let settings = TerrainSettings {
        seed: 99,
        ..TerrainSettings::default()
    };
    let a = PerlinField::new(settings.seed);
    let b = PerlinField::new(settings.seed);
    let ga = TerrainGenerator::new(&settings, &a);
    let gb = TerrainGenerator::new(&settings, &b);
    let ta = ColumnTile::prepare(&ga, 40, -20, 10, 10);
    let tb = ColumnTile::prepare(&gb, 40, -20, 10, 10);
    for z in -20..-10 {
        for x in 40..50 {
            for y in 0..30 {
                assert_eq!(ga.block_at(&ta, x, y, z), gb.block_at(&tb, x, y, z));
            }
        }
    }
}

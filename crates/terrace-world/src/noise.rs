use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::{Deserialize, Serialize};

/// Fractal sampling parameters for one terrain feature.
///
/// `probability` is the cutoff that density samples are compared against; it is
/// ignored by features that only use the height field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseSettings {
    #[serde(default = "d_height_scale")]
    pub height_scale: f32,
    #[serde(default = "d_scale")]
    pub scale: f32,
    #[serde(default = "d_octaves")]
    pub octaves: i32,
    #[serde(default)]
    pub height_offset: f32,
    #[serde(default = "d_probability")]
    pub probability: f32,
}

fn d_height_scale() -> f32 {
    1.0
}
fn d_scale() -> f32 {
    0.01
}
fn d_octaves() -> i32 {
    1
}
fn d_probability() -> f32 {
    0.5
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            height_scale: d_height_scale(),
            scale: d_scale(),
            octaves: d_octaves(),
            height_offset: 0.0,
            probability: d_probability(),
        }
    }
}

impl NoiseSettings {
    pub const fn new(
        height_scale: f32,
        scale: f32,
        octaves: i32,
        height_offset: f32,
        probability: f32,
    ) -> Self {
        Self {
            height_scale,
            scale,
            octaves,
            height_offset,
            probability,
        }
    }
}

/// Deterministic sampling service used by terrain generation.
///
/// Implementations must be pure: the same arguments always return the same value.
pub trait NoiseField {
    fn sample_height(&self, wx: f32, wz: f32, settings: &NoiseSettings) -> f32;
    fn sample_density(&self, wx: f32, wy: f32, wz: f32, settings: &NoiseSettings) -> f32;
}

/// Seeded Perlin noise with octave summation.
pub struct PerlinField {
    noise: FastNoiseLite,
}

impl PerlinField {
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::Perlin));
        // Scaling is applied per feature before sampling.
        noise.set_frequency(Some(1.0));
        Self { noise }
    }

    #[inline]
    fn unit_2d(&self, x: f32, y: f32) -> f32 {
        ((self.noise.get_noise_2d(x, y) + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    fn fbm(&self, a: f32, b: f32, s: &NoiseSettings) -> f32 {
        let mut total = 0.0_f32;
        let mut frequency = 1.0_f32;
        for _ in 0..s.octaves.max(1) {
            total += self.unit_2d(a * s.scale * frequency, b * s.scale * frequency) * s.height_scale;
            frequency *= 2.0;
        }
        total + s.height_offset
    }
}

impl NoiseField for PerlinField {
    fn sample_height(&self, wx: f32, wz: f32, settings: &NoiseSettings) -> f32 {
        self.fbm(wx, wz, settings)
    }

    fn sample_density(&self, wx: f32, wy: f32, wz: f32, settings: &NoiseSettings) -> f32 {
        let xy = self.fbm(wx, wy, settings);
        let yz = self.fbm(wy, wz, settings);
        let xz = self.fbm(wx, wz, settings);
        let yx = self.fbm(wy, wx, settings);
        let zy = self.fbm(wz, wy, settings);
        let zx = self.fbm(wz, wx, settings);
        (xy + yz + xz + yx + zy + zx) / 6.0
    }
}

//! Procedural noised color swatches, generated once per texture and cached.
#![forbid(unsafe_code)]

use blockyard_world::Texture;
use fastnoise_lite::{FastNoiseLite, NoiseType};
use hashbrown::HashMap;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct SwatchSettings {
    /// Edge length in pixels.
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_seed")]
    pub seed: i32,
}

fn default_size() -> u32 {
    64
}
fn default_seed() -> i32 {
    1337
}

impl Default for SwatchSettings {
    fn default() -> Self {
        Self {
            size: default_size(),
            seed: default_seed(),
        }
    }
}

/// Largest swatch edge; bigger configured sizes are clamped to it.
pub const MAX_SWATCH_SIZE: u32 = 1024;

/// RGBA8 pixels, row-major, `size * size * 4` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Swatch {
    pub texture: Texture,
    pub size: u32,
    pub rgba: Vec<u8>,
}

impl Swatch {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.size + x) * 4) as usize;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }
}

/// Fill a swatch with the texture's base color plus per-pixel noise in
/// `[-factor/2, factor/2]`, shared across the three channels.
pub fn generate(texture: Texture, settings: SwatchSettings) -> Swatch {
    let size = settings.size.clamp(1, MAX_SWATCH_SIZE);
    let seed = settings.seed.wrapping_add(texture.index() as i32 * 7919);
    let mut noise = FastNoiseLite::with_seed(seed);
    noise.set_noise_type(Some(NoiseType::Value));
    noise.set_frequency(Some(1.0));
    let base = texture.base_color();
    let amp = texture.noise_factor() * 0.5;
    let mut rgba = Vec::with_capacity(size as usize * size as usize * 4);
    for y in 0..size {
        for x in 0..size {
            let n = noise.get_noise_2d(x as f32, y as f32) * amp;
            for c in base {
                rgba.push((c as f32 + n).round().clamp(0.0, 255.0) as u8);
            }
            rgba.push(255);
        }
    }
    Swatch {
        texture,
        size,
        rgba,
    }
}

/// Memoizing swatch factory keyed by texture.
#[derive(Debug, Default)]
pub struct TextureProvider {
    settings: SwatchSettings,
    cache: HashMap<Texture, Swatch>,
}

impl TextureProvider {
    pub fn new(settings: SwatchSettings) -> Self {
        Self {
            settings,
            cache: HashMap::new(),
        }
    }

    /// Swap settings; cached swatches are dropped only if they would differ.
    pub fn set_settings(&mut self, settings: SwatchSettings) -> bool {
        if settings == self.settings {
            return false;
        }
        self.settings = settings;
        self.cache.clear();
        log::debug!("swatch settings changed; cache cleared");
        true
    }

    pub fn swatch(&mut self, texture: Texture) -> &Swatch {
        let settings = self.settings;
        self.cache.entry(texture).or_insert_with(|| {
            let swatch = generate(texture, settings);
            log::debug!("generated {} swatch ({}px)", texture, swatch.size);
            swatch
        })
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

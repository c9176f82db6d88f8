use serde::{Deserialize, Serialize};
use std::fmt;

/// Surface texture of a placed cube. Declaration order is the hotbar order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Texture {
    #[default]
    Dirt,
    Grass,
    Glass,
    Wood,
    Log,
}

impl Texture {
    pub const ALL: [Texture; 5] = [
        Texture::Dirt,
        Texture::Grass,
        Texture::Glass,
        Texture::Wood,
        Texture::Log,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Texture::Dirt => "dirt",
            Texture::Grass => "grass",
            Texture::Glass => "glass",
            Texture::Wood => "wood",
            Texture::Log => "log",
        }
    }

    /// Base RGB before noise.
    pub fn base_color(self) -> [u8; 3] {
        match self {
            Texture::Dirt => [0x5d, 0x40, 0x37],
            Texture::Grass => [0x38, 0x8e, 0x3c],
            Texture::Glass => [0xe1, 0xf5, 0xfe],
            Texture::Wood => [0x8d, 0x6e, 0x63],
            Texture::Log => [0x3e, 0x27, 0x23],
        }
    }

    /// Peak-to-peak amplitude of the per-pixel noise, in color units.
    pub fn noise_factor(self) -> f32 {
        match self {
            Texture::Dirt => 40.0,
            Texture::Grass => 30.0,
            Texture::Glass => 10.0,
            Texture::Wood => 25.0,
            Texture::Log => 35.0,
        }
    }

    pub fn opacity(self) -> f32 {
        match self {
            Texture::Glass => 0.6,
            _ => 1.0,
        }
    }

    #[inline]
    pub fn is_translucent(self) -> bool {
        self.opacity() < 1.0
    }
}

impl fmt::Display for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_in_hotbar_order() {
        let names: Vec<&str> = Texture::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names, ["dirt", "grass", "glass", "wood", "log"]);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Texture::Glass).unwrap(), "\"glass\"");
        let t: Texture = serde_json::from_str("\"log\"").unwrap();
        assert_eq!(t, Texture::Log);
    }

    #[test]
    fn only_glass_is_translucent() {
        let translucent: Vec<Texture> = Texture::ALL
            .into_iter()
            .filter(|t| t.is_translucent())
            .collect();
        assert_eq!(translucent, vec![Texture::Glass]);
    }
}

use blockyard_geom::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::texture::Texture;

/// Integer grid coordinate of a cube center.
pub type GridPos = (i32, i32, i32);

/// Opaque identity of a placed cube; unique within one store's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubeId(u64);

impl CubeId {
    #[inline]
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CubeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cube#{:x}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cube {
    pub id: CubeId,
    pub position: GridPos,
    pub texture: Texture,
}

impl Cube {
    #[inline]
    pub fn is_at(&self, x: i32, y: i32, z: i32) -> bool {
        self.position == (x, y, z)
    }

    /// World-space center of the unit cube.
    #[inline]
    pub fn center(&self) -> Vec3 {
        let (x, y, z) = self.position;
        Vec3::new(x as f32, y as f32, z as f32)
    }
}

/// On-disk form of a cube: identity is not persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CubeRecord {
    pub pos: [i32; 3],
    pub texture: Texture,
}

impl From<&Cube> for CubeRecord {
    fn from(c: &Cube) -> Self {
        let (x, y, z) = c.position;
        Self {
            pos: [x, y, z],
            texture: c.texture,
        }
    }
}

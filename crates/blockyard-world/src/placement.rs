//! Turning a click on rendered geometry into a cube edit.

use blockyard_geom::Vec3;

use crate::cube::GridPos;
use crate::storage::KvStore;
use crate::store::{WorldChange, WorldStore};

/// Outward normal of a clicked cube face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceNormal {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl FaceNormal {
    pub const ALL: [FaceNormal; 6] = [
        FaceNormal::PosX,
        FaceNormal::NegX,
        FaceNormal::PosY,
        FaceNormal::NegY,
        FaceNormal::PosZ,
        FaceNormal::NegZ,
    ];

    pub fn offset(self) -> GridPos {
        match self {
            FaceNormal::PosX => (1, 0, 0),
            FaceNormal::NegX => (-1, 0, 0),
            FaceNormal::PosY => (0, 1, 0),
            FaceNormal::NegY => (0, -1, 0),
            FaceNormal::PosZ => (0, 0, 1),
            FaceNormal::NegZ => (0, 0, -1),
        }
    }

    /// Accepts only the six axis-aligned unit vectors.
    pub fn from_offset(d: GridPos) -> Option<FaceNormal> {
        FaceNormal::ALL.into_iter().find(|n| n.offset() == d)
    }
}

/// What the renderer's hit test struck.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Hit {
    Cube {
        position: GridPos,
        normal: Option<FaceNormal>,
    },
    Ground {
        point: Vec3,
    },
    Nothing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Add(GridPos),
    Remove(GridPos),
    None,
}

/// Nearest integer with halves rounded up, matching how the ground snaps clicks.
#[inline]
pub fn round_to_grid(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

/// Decide the edit for a click. `alt` breaks the clicked cube instead of building on it.
pub fn resolve(hit: &Hit, alt: bool) -> Placement {
    match *hit {
        Hit::Cube { position, .. } if alt => Placement::Remove(position),
        Hit::Cube {
            position: (x, y, z),
            normal: Some(n),
        } => {
            let (dx, dy, dz) = n.offset();
            Placement::Add((x + dx, y + dy, z + dz))
        }
        Hit::Cube { normal: None, .. } => Placement::None,
        // Ground placement always lands on the base layer.
        Hit::Ground { point } => {
            Placement::Add((round_to_grid(point.x), 0, round_to_grid(point.z)))
        }
        Hit::Nothing => Placement::None,
    }
}

/// Resolve a click and apply it to the store. Returns `None` for no-op clicks.
pub fn apply<S: KvStore>(store: &mut WorldStore<S>, hit: &Hit, alt: bool) -> Option<WorldChange> {
    match resolve(hit, alt) {
        Placement::Add((x, y, z)) => Some(store.add_cube(x, y, z)),
        Placement::Remove((x, y, z)) => Some(store.remove_cube(x, y, z)),
        Placement::None => None,
    }
}

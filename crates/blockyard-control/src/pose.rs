//! Boxy third-person figure, posed in world space.
//!
//! The figure is 1.9 units from sole to crown and faces +Z before
//! `facing` is applied. The soles sit `SOLE_DEPTH` below the origin; arms and
//! legs pivot at the shoulder and hip.

use blockyard_geom::{Euler, Vec3};

const SKIN: [u8; 3] = [0xF0, 0xB4, 0x78];
const SHIRT: [u8; 3] = [0x66, 0xCC, 0xCC];
const PANTS: [u8; 3] = [0x2B, 0x3E, 0x8C];
const HAIR: [u8; 3] = [0x6B, 0x44, 0x23];
const EYES: [u8; 3] = [0x42, 0x87, 0xF5];
const SHOES: [u8; 3] = [0x1A, 0x1A, 0x1A];

/// Limb swing amplitude in radians.
pub const SWING_AMOUNT: f32 = 0.5;

/// Distance from the rig origin down to the bottom of the shoes.
pub const SOLE_DEPTH: f32 = 0.325;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartKind {
    Head,
    Hair,
    Eye,
    Mouth,
    Torso,
    Arm,
    Hand,
    Leg,
    Shoe,
}

/// One box of the figure. `rotation` is applied about `center`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelPart {
    pub kind: PartKind,
    pub center: Vec3,
    pub size: Vec3,
    pub rotation: Euler,
    pub color: [u8; 3],
}

struct Rig {
    origin: Vec3,
    facing: f32,
    parts: Vec<ModelPart>,
}

impl Rig {
    /// Add a box at `offset` from a joint at `pivot`, the joint bent by `swing` about X.
    fn add(
        &mut self,
        kind: PartKind,
        pivot: Vec3,
        swing: f32,
        offset: Vec3,
        size: Vec3,
        color: [u8; 3],
    ) {
        let joint = Euler::new(0.0, self.facing).rotate(pivot);
        let rotation = Euler::new(swing, self.facing);
        self.parts.push(ModelPart {
            kind,
            center: self.origin + joint + rotation.rotate(offset),
            size,
            rotation,
            color,
        });
    }
}

/// Pose the figure rooted at `origin`, turned by `facing` radians
/// about +Y. `clock` is the walk clock; limbs rest when not `moving`.
pub fn model_pose(origin: Vec3, facing: f32, clock: f32, moving: bool) -> Vec<ModelPart> {
    let swing = if moving { clock.sin() * SWING_AMOUNT } else { 0.0 };
    let mut rig = Rig {
        origin,
        facing,
        parts: Vec::with_capacity(14),
    };
    let v = Vec3::new;

    let head = v(0.0, 1.35, 0.0);
    rig.add(PartKind::Head, head, 0.0, Vec3::ZERO, v(0.45, 0.45, 0.45), SKIN);
    rig.add(PartKind::Hair, head, 0.0, v(0.0, 0.1, 0.0), v(0.48, 0.15, 0.48), HAIR);
    for x in [0.12, -0.12] {
        rig.add(PartKind::Eye, head, 0.0, v(x, 0.05, 0.226), v(0.09, 0.09, 0.01), EYES);
    }
    rig.add(PartKind::Mouth, head, 0.0, v(0.0, -0.12, 0.226), v(0.18, 0.09, 0.01), HAIR);

    rig.add(PartKind::Torso, v(0.0, 0.78, 0.0), 0.0, Vec3::ZERO, v(0.45, 0.68, 0.225), SHIRT);

    let limb = v(0.225, 0.68, 0.225);
    // (side, arm swing, leg swing); each arm moves opposite its leg.
    for (x, arm, leg) in [(-1.0, swing, -swing), (1.0, -swing, swing)] {
        let shoulder = v(0.315 * x, 1.05, 0.0);
        rig.add(PartKind::Arm, shoulder, arm, v(0.0, -0.34, 0.0), limb, SHIRT);
        rig.add(PartKind::Hand, shoulder, arm, v(0.0, -0.74, 0.0), v(0.225, 0.15, 0.225), SKIN);
        let hip = v(0.1125 * x, 0.44, 0.0);
        rig.add(PartKind::Leg, hip, leg, v(0.0, -0.34, 0.0), limb, PANTS);
        rig.add(PartKind::Shoe, hip, leg, v(0.0, -0.72, 0.02), v(0.24, 0.09, 0.28), SHOES);
    }
    rig.parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn of(parts: &[ModelPart], kind: PartKind) -> Vec<ModelPart> {
        parts.iter().copied().filter(|p| p.kind == kind).collect()
    }

    #[test]
    fn idle_pose_is_upright_and_symmetric() {
        let parts = model_pose(Vec3::ZERO, 0.0, 1.3, false);
        assert_eq!(parts.len(), 14);
        for p in &parts {
            assert_eq!(p.rotation.pitch, 0.0);
        }
        let legs = of(&parts, PartKind::Leg);
        assert_eq!(legs.len(), 2);
        assert!((legs[0].center.x + legs[1].center.x).abs() < 1e-6);
        assert!((legs[0].center.y - 0.1).abs() < 1e-5);
    }

    #[test]
    fn figure_spans_sole_to_crown() {
        let parts = model_pose(Vec3::ZERO, 0.0, 0.0, false);
        let top = parts
            .iter()
            .map(|p| p.center.y + p.size.y * 0.5)
            .fold(f32::MIN, f32::max);
        assert!((top - 1.575).abs() < 1e-5, "head top at {top}");
        let bottom = parts
            .iter()
            .map(|p| p.center.y - p.size.y * 0.5)
            .fold(f32::MAX, f32::min);
        assert!((bottom + SOLE_DEPTH).abs() < 1e-5);
        assert!((top - bottom - 1.9).abs() < 1e-5);
    }

    #[test]
    fn arms_swing_opposite_legs() {
        let clock = std::f32::consts::FRAC_PI_2;
        let parts = model_pose(Vec3::ZERO, 0.0, clock, true);
        let arms = of(&parts, PartKind::Arm);
        let legs = of(&parts, PartKind::Leg);
        assert!((arms[0].rotation.pitch - 0.5).abs() < 1e-6);
        assert!((arms[1].rotation.pitch + 0.5).abs() < 1e-6);
        assert_eq!(legs[0].rotation.pitch, -arms[0].rotation.pitch);
        assert_eq!(legs[1].rotation.pitch, -arms[1].rotation.pitch);
    }

    #[test]
    fn facing_turns_eyes_toward_travel() {
        let yaw = std::f32::consts::FRAC_PI_2;
        let parts = model_pose(Vec3::new(5.0, 0.0, 5.0), yaw, 0.0, false);
        for eye in of(&parts, PartKind::Eye) {
            assert!(eye.center.x > 5.2);
            assert_eq!(eye.rotation.yaw, yaw);
        }
    }
}

//! Box-shaped player body that falls, lands, and slides against unit cubes.

use blockyard_geom::{Aabb, Vec3};
use blockyard_world::GridPos;

/// Top of the ground plane; cubes at y = 0 rest on it.
pub const GROUND_Y: f32 = -0.5;

const EPS: f32 = 1e-4;

/// The seam the player controller drives. Velocity in, position out.
pub trait PhysicsBody {
    fn position(&self) -> Vec3;
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, v: Vec3);
    /// Advance by `dt`. `occupied` reports whether a cube fills a grid cell.
    fn integrate(&mut self, dt: f32, occupied: &dyn Fn(GridPos) -> bool);
}

#[derive(Clone, Debug)]
pub struct KinematicBody {
    pub pos: Vec3,
    pub vel: Vec3,
    pub on_ground: bool,
    /// Half the box edge.
    pub radius: f32,
    /// Negative.
    pub gravity: f32,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 1.0, 0.0))
    }
}

impl KinematicBody {
    pub fn new(spawn: Vec3) -> Self {
        Self {
            pos: spawn,
            vel: Vec3::ZERO,
            on_ground: false,
            radius: 0.5,
            gravity: -9.81,
        }
    }

    pub fn aabb_at(&self, pos: Vec3) -> Aabb {
        Aabb::from_center(pos, Vec3::new(self.radius, self.radius, self.radius))
    }

    fn collides_at(&self, pos: Vec3, occupied: &dyn Fn(GridPos) -> bool) -> bool {
        let b = self.aabb_at(pos);
        if b.min.y < GROUND_Y - EPS {
            return true;
        }
        // Cells are centred on integers, so shift by half a unit before flooring.
        let lo = |v: f32| (v + EPS + 0.5).floor() as i32;
        let hi = |v: f32| (v - EPS + 0.5).floor() as i32;
        for y in lo(b.min.y)..=hi(b.max.y) {
            for z in lo(b.min.z)..=hi(b.max.z) {
                for x in lo(b.min.x)..=hi(b.max.x) {
                    if occupied((x, y, z)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Lift the body out of a cube placed where it stands.
    fn eject(&mut self, occupied: &dyn Fn(GridPos) -> bool) {
        const MAX_LIFT: f32 = 8.0;
        let start = self.pos;
        let mut lift = 0.0;
        while lift < MAX_LIFT {
            lift += 0.05;
            let p = Vec3::new(start.x, start.y + lift, start.z);
            if !self.collides_at(p, occupied) {
                self.pos = p;
                self.vel.y = 0.0;
                log::debug!("body ejected {:.2} up from overlapping cube", lift);
                return;
            }
        }
    }

    /// Move along one axis in small increments, stopping flush against the first obstacle.
    fn move_axis(&mut self, axis: usize, amt: f32, occupied: &dyn Fn(GridPos) -> bool) -> f32 {
        if amt == 0.0 {
            return 0.0;
        }
        const STEP_RES: f32 = 0.05;
        let mut moved = 0.0_f32;
        let mut step = STEP_RES * amt.signum();
        let mut remaining = amt;
        while remaining.abs() > 0.0001 {
            let s = if remaining.abs() < step.abs() {
                remaining
            } else {
                step
            };
            let mut p = self.pos;
            match axis {
                0 => p.x += s,
                1 => p.y += s,
                _ => p.z += s,
            };
            if self.collides_at(p, occupied) {
                if step.abs() < 0.001 {
                    break;
                }
                step *= 0.5;
            } else {
                self.pos = p;
                moved += s;
                remaining -= s;
            }
        }
        moved
    }
}

impl PhysicsBody for KinematicBody {
    fn position(&self) -> Vec3 {
        self.pos
    }

    fn velocity(&self) -> Vec3 {
        self.vel
    }

    fn set_velocity(&mut self, v: Vec3) {
        self.vel = v;
    }

    fn integrate(&mut self, dt: f32, occupied: &dyn Fn(GridPos) -> bool) {
        if self.collides_at(self.pos, occupied) {
            self.eject(occupied);
        }
        let mut below = self.pos;
        below.y -= 0.01;
        self.on_ground = self.collides_at(below, occupied);
        if self.on_ground && self.vel.y <= 0.0 {
            self.vel.y = 0.0;
        } else {
            self.vel.y += self.gravity * dt;
        }

        let dx = self.vel.x * dt;
        let dz = self.vel.z * dt;
        let dy = self.vel.y * dt;
        let moved_y = if dy > 0.0 {
            let my = self.move_axis(1, dy, occupied);
            self.move_axis(0, dx, occupied);
            self.move_axis(2, dz, occupied);
            my
        } else {
            self.move_axis(0, dx, occupied);
            self.move_axis(2, dz, occupied);
            self.move_axis(1, dy, occupied)
        };
        if dy < 0.0 && moved_y.abs() < dy.abs() * 0.5 {
            self.on_ground = true;
            self.vel.y = 0.0;
        } else if dy > 0.0 && moved_y < dy * 0.5 {
            // Head bump.
            self.vel.y = 0.0;
        }
    }
}

use blockyard_geom::{Euler, Vec3};
use blockyard_render_raylib::conv::vec3_to_rl;
use raylib::prelude::*;

/// Mouse-look camera. Position is written by the player controller; orientation only by the mouse.
pub struct LookCamera {
    pub position: Vec3,
    pub yaw: f32,   // degrees, 0 looks down -Z, positive turns left
    pub pitch: f32, // degrees
    pub fov: f32,
    pub mouse_sensitivity: f32,
    pub captured: bool,
}

impl LookCamera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: -10.0,
            fov: 75.0,
            mouse_sensitivity: 0.1,
            captured: true,
        }
    }

    pub fn euler(&self) -> Euler {
        Euler::new(self.pitch.to_radians(), self.yaw.to_radians())
    }

    pub fn forward(&self) -> Vec3 {
        self.euler().forward()
    }

    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D::perspective(
            vec3_to_rl(self.position),
            vec3_to_rl(self.position + self.forward()),
            Vector3::new(0.0, 1.0, 0.0),
            self.fov,
        )
    }

    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * self.mouse_sensitivity;
        self.pitch -= dy * self.mouse_sensitivity;
        self.pitch = self.pitch.clamp(-89.9, 89.9);
        self.yaw = self.yaw.rem_euclid(360.0);
    }

    // Update only mouse-look/capture; translation comes from the player controller
    pub fn update_look_only(&mut self, rl: &mut RaylibHandle) {
        if rl.is_key_pressed(KeyboardKey::KEY_TAB) {
            self.captured = !self.captured;
            if self.captured {
                rl.disable_cursor();
            } else {
                rl.enable_cursor();
            }
        }
        if self.captured {
            let md = rl.get_mouse_delta();
            self.apply_mouse_delta(md.x, md.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped() {
        let mut cam = LookCamera::new(Vec3::ZERO);
        cam.apply_mouse_delta(0.0, -100_000.0);
        assert_eq!(cam.pitch, 89.9);
        cam.apply_mouse_delta(0.0, 100_000.0);
        assert_eq!(cam.pitch, -89.9);
    }

    #[test]
    fn moving_mouse_right_turns_right() {
        let mut cam = LookCamera::new(Vec3::ZERO);
        cam.pitch = 0.0;
        cam.apply_mouse_delta(900.0, 0.0);
        let f = cam.forward();
        assert!(f.x > 0.99, "forward {:?}", f);
    }

    #[test]
    fn default_view_looks_slightly_down_negative_z() {
        let cam = LookCamera::new(Vec3::ZERO);
        let f = cam.forward();
        assert!(f.z < -0.9);
        assert!(f.y < 0.0);
    }
}

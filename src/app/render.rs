use blockyard_control::{GROUND_Y, PhysicsBody, SOLE_DEPTH, model_pose};
use blockyard_geom::Vec3;
use blockyard_render_raylib::{draw_ground, draw_hover_outline, texture_tint};
use blockyard_world::{Hit, Texture, ViewMode};
use raylib::prelude::*;

use super::App;
use crate::keys;

const SKY: Color = Color::new(135, 206, 235, 255);
const GROUND_HALF_CELLS: i32 = 32;
const SLOT: i32 = 56;
const SLOT_GAP: i32 = 8;

impl App {
    pub fn render(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let camera = self.cam.to_camera3d();
        let third_person = self.world.view_mode() == ViewMode::ThirdPerson;
        let figure = if third_person {
            let p = self.body.position();
            let origin = Vec3::new(p.x, p.y - self.body.radius + SOLE_DEPTH, p.z);
            model_pose(origin, self.player.facing, self.player.walk_clock, self.player.moving)
        } else {
            Vec::new()
        };
        let sw = rl.get_screen_width();
        let sh = rl.get_screen_height();

        let mut d = rl.begin_drawing(thread);
        d.clear_background(SKY);
        {
            let mut d3 = d.begin_mode3D(camera);
            draw_ground(&mut d3, GROUND_Y, GROUND_HALF_CELLS);
            self.models.draw_figure(&mut d3, &figure);
            self.models.draw_cubes(&mut d3, self.world.cubes());
            if let Hit::Cube { position, .. } = self.hover {
                draw_hover_outline(&mut d3, position);
            }
        }

        Self::draw_crosshair(&mut d, sw, sh);
        self.draw_controls_panel(&mut d);
        self.draw_selector(&mut d, sw, sh);
    }

    fn draw_crosshair(d: &mut RaylibDrawHandle, sw: i32, sh: i32) {
        let (cx, cy) = (sw / 2, sh / 2);
        d.draw_rectangle(cx - 9, cy - 1, 18, 2, Color::WHITE);
        d.draw_rectangle(cx - 1, cy - 9, 2, 18, Color::WHITE);
    }

    fn draw_controls_panel(&self, d: &mut RaylibDrawHandle) {
        let b = self.mapper.bindings();
        let lines = [
            format!(
                "{}{}{}{} move, {} jump",
                keys::label(b.forward),
                keys::label(b.left),
                keys::label(b.backward),
                keys::label(b.right),
                keys::label(b.jump)
            ),
            "Click build, ".to_string() + &keys::label(b.modifier) + "+Click break",
            format!("{} view: {}", keys::label(b.toggle_view), self.world.view_mode().label()),
            format!("{} save, {} reset", keys::label(b.save), keys::label(b.reset)),
            format!("Tab mouse, {} cube(s)", self.world.cubes().len()),
        ];
        let font_size = 16;
        let line_h = font_size + 4;
        let w = lines
            .iter()
            .map(|l| d.measure_text(l, font_size))
            .max()
            .unwrap_or(0)
            + 20;
        let h = line_h * lines.len() as i32 + 34;
        d.draw_rectangle(8, 8, w, h, Color::new(0, 0, 0, 140));
        let mut y = 16;
        for line in &lines {
            d.draw_text(line, 19, y + 1, font_size, Color::BLACK);
            d.draw_text(line, 18, y, font_size, Color::WHITE);
            y += line_h;
        }
        d.draw_fps(18, y + 4);
    }

    fn draw_selector(&self, d: &mut RaylibDrawHandle, sw: i32, sh: i32) {
        let n = Texture::ALL.len() as i32;
        let total = n * SLOT + (n - 1) * SLOT_GAP;
        let x0 = (sw - total) / 2;
        let y0 = sh - SLOT - 28;
        d.draw_rectangle(x0 - 8, y0 - 8, total + 16, SLOT + 32, Color::new(0, 0, 0, 120));
        let active = self.world.active_texture();
        let b = self.mapper.bindings();
        for t in Texture::ALL {
            let x = x0 + t.index() as i32 * (SLOT + SLOT_GAP);
            if let Some(tex) = self.models.texture(t) {
                let scale = (SLOT - 8) as f32 / tex.width() as f32;
                let at = Vector2::new((x + 4) as f32, (y0 + 4) as f32);
                d.draw_texture_ex(tex, at, 0.0, scale, texture_tint(t));
            }
            let border = if t == active { Color::YELLOW } else { Color::new(200, 200, 200, 160) };
            d.draw_rectangle_lines(x, y0, SLOT, SLOT, border);
            if t == active {
                d.draw_rectangle_lines(x - 2, y0 - 2, SLOT + 4, SLOT + 4, border);
            }
            let key = keys::label(b.texture_key(t));
            d.draw_text(&key, x + 5, y0 + 5, 14, Color::WHITE);
            let name = t.name();
            let nw = d.measure_text(name, 12);
            d.draw_text(name, x + (SLOT - nw) / 2, y0 + SLOT + 6, 12, Color::WHITE);
        }
    }
}

use blockyard_control::{FrameInput, PhysicsBody, step};
use raylib::prelude::*;

use super::App;
use crate::event::Event;
use crate::{keys, raycast};

impl App {
    pub fn step(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, dt: f32) {
        self.process_config_file_events();
        self.cam.update_look_only(rl);

        // Input intents become events for this tick
        let held = keys::held_keys(rl, self.mapper.bindings());
        let intents = self.mapper.map(&held, self.world.active_texture());
        if intents.toggle_view {
            self.queue.emit_now(Event::ViewModeToggled);
        }
        if let Some(texture) = intents.texture {
            self.queue.emit_now(Event::TextureSelected { texture });
        }
        if intents.save {
            self.queue.emit_now(Event::SaveRequested);
        }
        if intents.reset {
            self.queue.emit_now(Event::ResetRequested);
        }

        let occupied = &self.occupied;
        self.hover = raycast::pick(
            self.cam.position,
            self.cam.forward(),
            self.config.camera.reach,
            |p| occupied.contains(&p),
        );
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if self.cam.captured {
                self.queue.emit_now(Event::PlacementRequested {
                    hit: self.hover,
                    alt: intents.alt,
                });
            } else {
                self.cam.captured = true;
                rl.disable_cursor();
            }
        }
        self.queue.emit_now(Event::Tick);

        while let Some(env) = self.queue.pop_ready() {
            Self::log_event(env.tick, &env.kind);
            self.handle_event(rl, thread, env);
            self.evt_processed_total += 1;
        }
        self.sync_occupied();

        // Player controller drives the body; the body's result drives the camera
        let input = FrameInput {
            movement: intents.movement,
            look: self.cam.euler(),
            view_mode: self.world.view_mode(),
            body_position: self.body.position(),
            body_velocity: self.body.velocity(),
        };
        self.player = step(&self.config.player, &self.player, &input, dt);
        self.body.set_velocity(self.player.velocity);
        let occupied = &self.occupied;
        self.body.integrate(dt, &|p| occupied.contains(&p));
        self.cam.position = self.player.camera_position;

        self.queue.advance_tick();
    }
}

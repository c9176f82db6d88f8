use blockyard_world::{Hit, WorldChange, placement};
use raylib::prelude::*;

use super::App;
use crate::config::{AppConfig, pin_storage};
use crate::event::{Event, EventEnvelope};

impl App {
    pub fn handle_event(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        env: EventEnvelope,
    ) {
        let tick = env.tick;
        let change = match env.kind {
            Event::Tick => None,
            Event::ViewModeToggled => Some(self.world.toggle_view_mode()),
            Event::TextureSelected { texture } => Some(self.world.set_texture(texture)),
            Event::PlacementRequested { hit, alt } => {
                let change = placement::apply(&mut self.world, &hit, alt);
                if change.is_none() {
                    log::debug!(target: "events", "[tick {}] click on {:?} ignored", tick, hit);
                }
                change
            }
            Event::SaveRequested => Some(self.world.save_world()),
            Event::ResetRequested => Some(self.world.reset_world()),
            Event::ConfigReloaded { config } => {
                self.apply_config(rl, thread, *config);
                None
            }
        };
        if let Some(change) = change {
            Self::log_change(tick, &change);
        }
    }

    /// Re-apply everything that can change without a restart. The storage
    /// directory stays fixed for the session.
    fn apply_config(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        mut config: AppConfig,
    ) {
        if pin_storage(&self.config.storage, &mut config) {
            log::warn!("storage settings changed; restart to use them");
        }
        self.cam.fov = config.camera.fov;
        self.cam.mouse_sensitivity = config.camera.mouse_sensitivity;
        self.mapper.set_bindings(config.controls.clone());
        if self.textures.set_settings(config.textures) {
            if let Err(e) = self.models.refresh_textures(rl, thread, &mut self.textures) {
                log::error!("texture refresh failed: {}", e);
            }
        }
        if config.window.target_fps != self.config.window.target_fps {
            rl.set_target_fps(config.window.target_fps);
        }
        if config.window.title != self.config.window.title {
            rl.set_window_title(thread, &config.window.title);
        }
        let size = (config.window.width, config.window.height);
        if size != (self.config.window.width, self.config.window.height) {
            rl.set_window_size(size.0, size.1);
        }
        self.config = config;
        log::info!("config applied from {}", self.config_path.display());
    }

    pub(super) fn log_event(tick: u64, ev: &Event) {
        match ev {
            Event::Tick => {
                log::trace!(target: "events", "[tick {}] Tick", tick);
            }
            Event::ViewModeToggled => {
                log::info!(target: "events", "[tick {}] ViewModeToggled", tick);
            }
            Event::TextureSelected { texture } => {
                log::info!(target: "events", "[tick {}] TextureSelected texture={}", tick, texture);
            }
            Event::PlacementRequested { hit, alt } => match hit {
                Hit::Cube { position, normal } => {
                    log::info!(target: "events", "[tick {}] PlacementRequested cube={:?} face={:?} alt={}",
                        tick, position, normal, alt);
                }
                Hit::Ground { point } => {
                    log::info!(target: "events", "[tick {}] PlacementRequested ground=({:.2},{:.2},{:.2}) alt={}",
                        tick, point.x, point.y, point.z, alt);
                }
                Hit::Nothing => {
                    log::debug!(target: "events", "[tick {}] PlacementRequested nothing alt={}", tick, alt);
                }
            },
            Event::SaveRequested => {
                log::info!(target: "events", "[tick {}] SaveRequested", tick);
            }
            Event::ResetRequested => {
                log::info!(target: "events", "[tick {}] ResetRequested", tick);
            }
            Event::ConfigReloaded { .. } => {
                log::info!(target: "events", "[tick {}] ConfigReloaded", tick);
            }
        }
    }

    fn log_change(tick: u64, change: &WorldChange) {
        match change {
            WorldChange::CubeAdded {
                id,
                position,
                texture,
            } => {
                log::info!(target: "world", "[tick {}] added {} at {:?} ({})", tick, id, position, texture);
            }
            WorldChange::CubesRemoved { position, count } => {
                log::info!(target: "world", "[tick {}] removed {} cube(s) at {:?}", tick, count, position);
            }
            WorldChange::TextureSelected { texture } => {
                log::info!(target: "world", "[tick {}] active texture {}", tick, texture);
            }
            WorldChange::ViewModeToggled { mode } => {
                log::info!(target: "world", "[tick {}] view {}", tick, mode.label());
            }
            WorldChange::Saved { cubes, persisted } => {
                if *persisted {
                    log::info!(target: "world", "[tick {}] saved {} cube(s)", tick, cubes);
                } else {
                    log::warn!(target: "world", "[tick {}] save of {} cube(s) not persisted", tick, cubes);
                }
            }
            WorldChange::Reset { cleared, persisted } => {
                if *persisted {
                    log::info!(target: "world", "[tick {}] reset; cleared {} cube(s)", tick, cleared);
                } else {
                    log::warn!(target: "world", "[tick {}] reset cleared {} cube(s); saved copy remains", tick, cleared);
                }
            }
        }
    }
}

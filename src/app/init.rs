use std::error::Error;
use std::path::PathBuf;

use blockyard_control::{InputMapper, KinematicBody, PlayerState};
use blockyard_render_raylib::CubeModels;
use blockyard_textures::TextureProvider;
use blockyard_world::{FileStore, Hit, WorldStore};
use hashbrown::HashSet;
use raylib::prelude::*;

use super::App;
use super::watchers::spawn_config_watcher;
use crate::camera::LookCamera;
use crate::config::AppConfig;
use crate::event::EventQueue;

impl App {
    pub fn new(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        config: AppConfig,
        config_path: PathBuf,
        storage_override: Option<PathBuf>,
        watch_config: bool,
    ) -> Result<Self, Box<dyn Error>> {
        let storage = FileStore::new(config.storage.dir.clone());
        let world = WorldStore::load(storage);
        log::info!(
            "world ready: {} cube(s), saves under {}",
            world.cubes().len(),
            world.storage().dir().display()
        );

        let mut textures = TextureProvider::new(config.textures);
        let models = CubeModels::load(rl, thread, &mut textures)?;

        let body = KinematicBody::default();
        let player = PlayerState::spawn(body.pos);
        let mut cam = LookCamera::new(body.pos);
        cam.fov = config.camera.fov;
        cam.mouse_sensitivity = config.camera.mouse_sensitivity;
        if cam.captured {
            rl.disable_cursor();
        }

        let config_event_rx = if watch_config {
            Some(spawn_config_watcher(config_path.clone()))
        } else {
            None
        };

        let mut app = Self {
            world,
            queue: EventQueue::new(),
            cam,
            body,
            player,
            mapper: InputMapper::new(config.controls.clone()),
            textures,
            models,
            config,
            hover: Hit::Nothing,
            occupied: HashSet::new(),
            occupied_rev: u64::MAX,
            evt_processed_total: 0,
            config_path,
            storage_override,
            config_event_rx,
        };
        app.sync_occupied();
        Ok(app)
    }
}

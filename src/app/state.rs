use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use blockyard_control::{InputMapper, KinematicBody, PlayerState};
use blockyard_render_raylib::CubeModels;
use blockyard_textures::TextureProvider;
use blockyard_world::{FileStore, GridPos, Hit, WorldStore};
use hashbrown::HashSet;

use crate::camera::LookCamera;
use crate::config::AppConfig;
use crate::event::EventQueue;

pub struct App {
    pub world: WorldStore<FileStore>,
    pub queue: EventQueue,
    pub cam: LookCamera,
    pub body: KinematicBody,
    pub player: PlayerState,
    pub mapper: InputMapper,
    pub textures: TextureProvider,
    pub models: CubeModels,
    pub config: AppConfig,
    /// Latest hit-test result under the crosshair.
    pub hover: Hit,
    pub(crate) occupied: HashSet<GridPos>,
    pub(crate) occupied_rev: u64,
    pub(crate) evt_processed_total: usize,
    pub(crate) config_path: PathBuf,
    /// `--storage-dir`, re-applied to every reloaded config.
    pub(crate) storage_override: Option<PathBuf>,
    pub(crate) config_event_rx: Option<Receiver<()>>,
}

impl App {
    pub fn events_processed(&self) -> usize {
        self.evt_processed_total
    }

    /// Rebuild the occupied-cell set if the world changed since the last call.
    pub(crate) fn sync_occupied(&mut self) {
        let rev = self.world.rev();
        if rev == self.occupied_rev {
            return;
        }
        self.occupied.clear();
        self.occupied
            .extend(self.world.cubes().iter().map(|c| c.position));
        self.occupied_rev = rev;
    }
}

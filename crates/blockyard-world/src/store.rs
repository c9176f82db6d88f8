//! The world store: the single owner of placed cubes, texture selection, and view mode.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cube::{Cube, CubeId, CubeRecord, GridPos};
use crate::storage::KvStore;
use crate::texture::Texture;

/// Storage key the cube list is saved under.
pub const WORLD_KEY: &str = "world";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    #[default]
    FirstPerson,
    ThirdPerson,
}

impl ViewMode {
    #[inline]
    pub fn toggled(self) -> ViewMode {
        match self {
            ViewMode::FirstPerson => ViewMode::ThirdPerson,
            ViewMode::ThirdPerson => ViewMode::FirstPerson,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::FirstPerson => "1st Person",
            ViewMode::ThirdPerson => "3rd Person",
        }
    }
}

#[derive(Clone, Debug, Default)]
struct WorldState {
    active_texture: Texture,
    view_mode: ViewMode,
    cubes: Arc<Vec<Cube>>,
}

/// Read-only view of the world at one revision. Cheap to clone.
#[derive(Clone, Debug)]
pub struct WorldSnapshot {
    pub rev: u64,
    pub active_texture: Texture,
    pub view_mode: ViewMode,
    pub cubes: Arc<Vec<Cube>>,
}

/// What a store operation did.
#[derive(Clone, Debug, PartialEq)]
pub enum WorldChange {
    CubeAdded {
        id: CubeId,
        position: GridPos,
        texture: Texture,
    },
    CubesRemoved {
        position: GridPos,
        count: usize,
    },
    TextureSelected {
        texture: Texture,
    },
    ViewModeToggled {
        mode: ViewMode,
    },
    Saved {
        cubes: usize,
        persisted: bool,
    },
    Reset {
        cleared: usize,
        persisted: bool,
    },
}

impl WorldChange {
    /// True when the cube list may differ from before the operation.
    pub fn touches_cubes(&self) -> bool {
        match self {
            WorldChange::CubeAdded { .. } => true,
            WorldChange::CubesRemoved { count, .. } => *count > 0,
            WorldChange::Reset { cleared, .. } => *cleared > 0,
            _ => false,
        }
    }
}

pub struct WorldStore<S: KvStore> {
    storage: S,
    state: WorldState,
    next_id: u64,
    rev: u64,
}

impl<S: KvStore> WorldStore<S> {
    /// Build the store from whatever `storage` holds under [`WORLD_KEY`],
    /// seeding the demo layout when nothing usable is there.
    pub fn load(storage: S) -> Self {
        let mut store = Self {
            storage,
            state: WorldState::default(),
            next_id: 1,
            rev: 0,
        };
        let cubes = match store.read_saved() {
            Some(records) => {
                log::info!("restored {} cube(s) from '{}'", records.len(), WORLD_KEY);
                records
                    .into_iter()
                    .map(|r| {
                        let [x, y, z] = r.pos;
                        store.make_cube((x, y, z), r.texture)
                    })
                    .collect()
            }
            None => {
                log::info!("no saved world; seeding demo layout");
                store.demo_layout()
            }
        };
        store.state.cubes = Arc::new(cubes);
        store
    }

    fn read_saved(&self) -> Option<Vec<CubeRecord>> {
        let raw = match self.storage.get(WORLD_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("world read failed: {}", e);
                return None;
            }
        };
        match serde_json::from_str::<Option<Vec<CubeRecord>>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("saved world is malformed, ignoring: {}", e);
                None
            }
        }
    }

    fn demo_layout(&mut self) -> Vec<Cube> {
        Texture::ALL
            .into_iter()
            .enumerate()
            .map(|(i, t)| self.make_cube((i as i32 + 1, 0, 1), t))
            .collect()
    }

    #[inline]
    fn alloc_id(&mut self) -> CubeId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        CubeId::from_raw(id)
    }

    fn make_cube(&mut self, position: GridPos, texture: Texture) -> Cube {
        Cube {
            id: self.alloc_id(),
            position,
            texture,
        }
    }

    #[inline]
    fn bump(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.state.cubes
    }

    pub fn cubes_at(&self, x: i32, y: i32, z: i32) -> impl Iterator<Item = &Cube> {
        self.state.cubes.iter().filter(move |c| c.is_at(x, y, z))
    }

    pub fn active_texture(&self) -> Texture {
        self.state.active_texture
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.view_mode
    }

    /// Revision counter; advances on every state mutation.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            rev: self.rev,
            active_texture: self.state.active_texture,
            view_mode: self.state.view_mode,
            cubes: Arc::clone(&self.state.cubes),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Append a cube with the active texture. Occupied coordinates are not checked.
    pub fn add_cube(&mut self, x: i32, y: i32, z: i32) -> WorldChange {
        let texture = self.state.active_texture;
        let cube = self.make_cube((x, y, z), texture);
        Arc::make_mut(&mut self.state.cubes).push(cube);
        self.bump();
        WorldChange::CubeAdded {
            id: cube.id,
            position: cube.position,
            texture,
        }
    }

    /// Remove every cube at exactly `(x, y, z)`.
    pub fn remove_cube(&mut self, x: i32, y: i32, z: i32) -> WorldChange {
        let count = self.cubes_at(x, y, z).count();
        if count > 0 {
            Arc::make_mut(&mut self.state.cubes).retain(|c| !c.is_at(x, y, z));
            self.bump();
        }
        WorldChange::CubesRemoved {
            position: (x, y, z),
            count,
        }
    }

    pub fn set_texture(&mut self, texture: Texture) -> WorldChange {
        self.state.active_texture = texture;
        self.bump();
        WorldChange::TextureSelected { texture }
    }

    pub fn toggle_view_mode(&mut self) -> WorldChange {
        self.state.view_mode = self.state.view_mode.toggled();
        self.bump();
        WorldChange::ViewModeToggled {
            mode: self.state.view_mode,
        }
    }

    /// Persist the cube list, overwriting any previous save. Failures are logged only.
    pub fn save_world(&mut self) -> WorldChange {
        let records: Vec<CubeRecord> = self.state.cubes.iter().map(CubeRecord::from).collect();
        let persisted = match serde_json::to_string(&records) {
            Ok(json) => match self.storage.set(WORLD_KEY, &json) {
                Ok(()) => true,
                Err(e) => {
                    log::error!("world save failed: {}", e);
                    false
                }
            },
            Err(e) => {
                log::error!("world serialization failed: {}", e);
                false
            }
        };
        WorldChange::Saved {
            cubes: records.len(),
            persisted,
        }
    }

    /// Drop the saved entry and clear the in-memory cubes.
    pub fn reset_world(&mut self) -> WorldChange {
        let persisted = match self.storage.remove(WORLD_KEY) {
            Ok(()) => true,
            Err(e) => {
                log::error!("world reset could not clear storage: {}", e);
                false
            }
        };
        let cleared = self.state.cubes.len();
        self.state.cubes = Arc::new(Vec::new());
        self.bump();
        WorldChange::Reset { cleared, persisted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StorageError, StorageResult};
    use crate::storage::MemoryStore;

    struct ReadOnlyStore;

    impl KvStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }
        fn set(&mut self, key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::InvalidKey(key.to_string()))
        }
        fn remove(&mut self, key: &str) -> StorageResult<()> {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }

    struct UnreadableStore;

    impl KvStore for UnreadableStore {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Io {
                path: format!("{key}.json").into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }
        fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
            Ok(())
        }
        fn remove(&mut self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    fn positions(store: &WorldStore<MemoryStore>) -> Vec<(GridPos, Texture)> {
        store.cubes().iter().map(|c| (c.position, c.texture)).collect()
    }

    #[test]
    fn empty_storage_seeds_demo_row() {
        let store = WorldStore::load(MemoryStore::new());
        assert_eq!(
            positions(&store),
            vec![
                ((1, 0, 1), Texture::Dirt),
                ((2, 0, 1), Texture::Grass),
                ((3, 0, 1), Texture::Glass),
                ((4, 0, 1), Texture::Wood),
                ((5, 0, 1), Texture::Log),
            ]
        );
        assert_eq!(store.active_texture(), Texture::Dirt);
        assert_eq!(store.view_mode(), ViewMode::FirstPerson);
        assert_eq!(store.rev(), 0);
    }

    #[test]
    fn malformed_and_null_entries_seed_demo_row() {
        for raw in [
            "{not json",
            "null",
            r#"[{"pos":[1,2],"texture":"dirt"}]"#,
            r#"[{"pos":[0,0,0],"texture":"stone"}]"#,
        ] {
            let mut mem = MemoryStore::new();
            mem.set(WORLD_KEY, raw).unwrap();
            let store = WorldStore::load(mem);
            assert_eq!(store.cubes().len(), 5, "raw={raw}");
        }
    }

    #[test]
    fn read_error_seeds_demo_row() {
        let store = WorldStore::load(UnreadableStore);
        let textures: Vec<Texture> = store.cubes().iter().map(|c| c.texture).collect();
        assert_eq!(textures, Texture::ALL.to_vec());
        assert!(store.cubes().iter().all(|c| c.position.1 == 0 && c.position.2 == 1));
    }

    #[test]
    fn saved_empty_world_stays_empty() {
        let mut mem = MemoryStore::new();
        mem.set(WORLD_KEY, "[]").unwrap();
        let store = WorldStore::load(mem);
        assert!(store.cubes().is_empty());
    }

    #[test]
    fn legacy_key_field_is_ignored() {
        let mut mem = MemoryStore::new();
        mem.set(
            WORLD_KEY,
            r#"[{"key":"V1StGXR8_Z5jdHi6B-myT","pos":[7,1,-2],"texture":"wood"}]"#,
        )
        .unwrap();
        let store = WorldStore::load(mem);
        assert_eq!(positions(&store), vec![((7, 1, -2), Texture::Wood)]);
    }

    #[test]
    fn add_uses_texture_active_at_placement() {
        let mut store = WorldStore::load(MemoryStore::new());
        store.set_texture(Texture::Glass);
        store.add_cube(0, 0, 0);
        store.set_texture(Texture::Log);
        let placed: Vec<Texture> = store.cubes_at(0, 0, 0).map(|c| c.texture).collect();
        assert_eq!(placed, vec![Texture::Glass]);
    }

    #[test]
    fn ids_are_unique() {
        let mut store = WorldStore::load(MemoryStore::new());
        store.add_cube(1, 0, 1);
        store.add_cube(1, 0, 1);
        let mut ids: Vec<CubeId> = store.cubes().iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), store.cubes().len());
    }

    #[test]
    fn remove_takes_all_duplicates_at_position() {
        let mut store = WorldStore::load(MemoryStore::new());
        store.add_cube(3, 0, 1);
        let change = store.remove_cube(3, 0, 1);
        assert_eq!(
            change,
            WorldChange::CubesRemoved {
                position: (3, 0, 1),
                count: 2
            }
        );
        assert_eq!(store.cubes().len(), 4);
    }

    #[test]
    fn removing_empty_coordinate_keeps_revision() {
        let mut store = WorldStore::load(MemoryStore::new());
        let rev = store.rev();
        let change = store.remove_cube(40, 40, 40);
        assert!(!change.touches_cubes());
        assert_eq!(store.rev(), rev);
    }

    #[test]
    fn snapshot_is_unaffected_by_later_mutation() {
        let mut store = WorldStore::load(MemoryStore::new());
        let snap = store.snapshot();
        store.add_cube(9, 9, 9);
        store.reset_world();
        assert_eq!(snap.cubes.len(), 5);
        assert!(store.cubes().is_empty());
        assert!(store.rev() > snap.rev);
    }

    #[test]
    fn write_failure_keeps_memory_state() {
        let mut store = WorldStore::load(ReadOnlyStore);
        store.add_cube(0, 0, 0);
        assert_eq!(
            store.save_world(),
            WorldChange::Saved {
                cubes: 6,
                persisted: false
            }
        );
        assert_eq!(store.cubes().len(), 6);
        assert_eq!(
            store.reset_world(),
            WorldChange::Reset {
                cleared: 6,
                persisted: false
            }
        );
        assert!(store.cubes().is_empty());
    }

    #[test]
    fn saved_json_matches_wire_format() {
        let mut mem = MemoryStore::new();
        mem.set(WORLD_KEY, "[]").unwrap();
        let mut store = WorldStore::load(mem);
        store.set_texture(Texture::Grass);
        store.add_cube(-1, 2, 3);
        store.save_world();
        let raw = store.storage().get(WORLD_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"[{"pos":[-1,2,3],"texture":"grass"}]"#);
    }
}

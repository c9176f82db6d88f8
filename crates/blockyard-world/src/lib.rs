//! Voxel world state: cubes, textures, persistence, and placement.
#![forbid(unsafe_code)]

pub mod cube;
pub mod error;
pub mod placement;
pub mod storage;
pub mod store;
pub mod texture;

pub use cube::{Cube, CubeId, GridPos};
pub use error::StorageError;
pub use placement::{FaceNormal, Hit, Placement};
pub use storage::{FileStore, KvStore, MemoryStore};
pub use store::{ViewMode, WORLD_KEY, WorldChange, WorldSnapshot, WorldStore};
pub use texture::Texture;

//! Input intents, the per-frame player controller, and the body it drives.
#![forbid(unsafe_code)]

pub mod body;
pub mod input;
pub mod player;
pub mod pose;

pub use body::{GROUND_Y, KinematicBody, PhysicsBody};
pub use input::{InputMapper, Intents, Key, KeyBindings, KeySet, MoveIntents};
pub use player::{FrameInput, PlayerState, PlayerTuning, SmoothedIntents, step};
pub use pose::{ModelPart, PartKind, SOLE_DEPTH, model_pose};

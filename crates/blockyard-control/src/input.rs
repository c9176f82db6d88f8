//! Physical keys to named intents, with key-down edge detection.

use std::collections::HashSet;

use blockyard_world::Texture;
use serde::{Deserialize, Serialize};

/// Keys the toy can bind. Names match the config file spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Space,
    Tab,
    Enter,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    Up,
    Down,
    Left,
    Right,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl Key {
    pub const ALL: [Key; 61] = [
        Key::A,
        Key::B,
        Key::C,
        Key::D,
        Key::E,
        Key::F,
        Key::G,
        Key::H,
        Key::I,
        Key::J,
        Key::K,
        Key::L,
        Key::M,
        Key::N,
        Key::O,
        Key::P,
        Key::Q,
        Key::R,
        Key::S,
        Key::T,
        Key::U,
        Key::V,
        Key::W,
        Key::X,
        Key::Y,
        Key::Z,
        Key::Digit0,
        Key::Digit1,
        Key::Digit2,
        Key::Digit3,
        Key::Digit4,
        Key::Digit5,
        Key::Digit6,
        Key::Digit7,
        Key::Digit8,
        Key::Digit9,
        Key::Space,
        Key::Tab,
        Key::Enter,
        Key::LeftShift,
        Key::RightShift,
        Key::LeftControl,
        Key::RightControl,
        Key::LeftAlt,
        Key::RightAlt,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::F1,
        Key::F2,
        Key::F3,
        Key::F4,
        Key::F5,
        Key::F6,
        Key::F7,
        Key::F8,
        Key::F9,
        Key::F10,
        Key::F11,
        Key::F12,
    ];
}

/// Keys held during one frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeySet {
    keys: HashSet<Key>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: Key) {
        self.keys.insert(key);
    }

    #[inline]
    pub fn contains(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: Key,
    pub backward: Key,
    pub left: Key,
    pub right: Key,
    pub jump: Key,
    pub toggle_view: Key,
    pub modifier: Key,
    pub save: Key,
    pub reset: Key,
    /// One key per texture, in hotbar order.
    pub textures: [Key; 5],
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: Key::W,
            backward: Key::S,
            left: Key::A,
            right: Key::D,
            jump: Key::Space,
            toggle_view: Key::V,
            modifier: Key::LeftAlt,
            save: Key::F5,
            reset: Key::F9,
            textures: [
                Key::Digit1,
                Key::Digit2,
                Key::Digit3,
                Key::Digit4,
                Key::Digit5,
            ],
        }
    }
}

impl KeyBindings {
    pub fn texture_key(&self, texture: Texture) -> Key {
        self.textures[texture.index()]
    }

    /// Every key this binding set listens to.
    pub fn keys(&self) -> Vec<Key> {
        let mut v = vec![
            self.forward,
            self.backward,
            self.left,
            self.right,
            self.jump,
            self.toggle_view,
            self.modifier,
            self.save,
            self.reset,
        ];
        v.extend_from_slice(&self.textures);
        v.sort();
        v.dedup();
        v
    }
}

/// Held-level movement intents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveIntents {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub movement: MoveIntents,
    /// Break modifier, combined with a click.
    pub alt: bool,
    pub toggle_view: bool,
    pub save: bool,
    pub reset: bool,
    /// Texture to switch to; only set when it differs from the active one.
    pub texture: Option<Texture>,
}

#[derive(Debug, Default)]
pub struct InputMapper {
    bindings: KeyBindings,
    prev: KeySet,
}

impl InputMapper {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            prev: KeySet::new(),
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.bindings = bindings;
    }

    #[inline]
    fn pressed(&self, held: &KeySet, key: Key) -> bool {
        held.contains(key) && !self.prev.contains(key)
    }

    /// Map this frame's held keys. `active` is the texture currently selected in the store.
    pub fn map(&mut self, held: &KeySet, active: Texture) -> Intents {
        let b = &self.bindings;
        let movement = MoveIntents {
            forward: held.contains(b.forward),
            backward: held.contains(b.backward),
            left: held.contains(b.left),
            right: held.contains(b.right),
            jump: held.contains(b.jump),
        };
        let intents = Intents {
            movement,
            alt: held.contains(b.modifier),
            toggle_view: self.pressed(held, b.toggle_view),
            save: self.pressed(held, b.save),
            reset: self.pressed(held, b.reset),
            texture: self.select_texture(held, active),
        };
        self.prev = held.clone();
        intents
    }

    /// On any edge of a texture key, pick the first held texture key in hotbar
    /// order. Lower slots win when several are held.
    fn select_texture(&self, held: &KeySet, active: Texture) -> Option<Texture> {
        let b = &self.bindings;
        let edge = b
            .textures
            .iter()
            .any(|&k| held.contains(k) != self.prev.contains(k));
        if !edge {
            return None;
        }
        Texture::ALL
            .into_iter()
            .find(|&t| held.contains(b.texture_key(t)))
            .filter(|&t| t != active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(ks: &[Key]) -> KeySet {
        ks.iter().copied().collect()
    }

    #[test]
    fn movement_is_level_triggered() {
        let mut m = InputMapper::default();
        let held = keys(&[Key::W, Key::D, Key::Space]);
        for _ in 0..3 {
            let i = m.map(&held, Texture::Dirt);
            assert!(i.movement.forward && i.movement.right && i.movement.jump);
            assert!(!i.movement.backward && !i.movement.left);
        }
    }

    #[test]
    fn view_toggle_fires_once_per_press() {
        let mut m = InputMapper::default();
        let held = keys(&[Key::V]);
        assert!(m.map(&held, Texture::Dirt).toggle_view);
        assert!(!m.map(&held, Texture::Dirt).toggle_view);
        assert!(!m.map(&held, Texture::Dirt).toggle_view);
        assert!(!m.map(&KeySet::new(), Texture::Dirt).toggle_view);
        assert!(m.map(&held, Texture::Dirt).toggle_view);
    }

    #[test]
    fn texture_selects_on_press_only_when_different() {
        let mut m = InputMapper::default();
        assert_eq!(m.map(&keys(&[Key::Digit3]), Texture::Dirt).texture, Some(Texture::Glass));
        // Still held, no new edge.
        assert_eq!(m.map(&keys(&[Key::Digit3]), Texture::Glass).texture, None);
        m.map(&KeySet::new(), Texture::Glass);
        assert_eq!(m.map(&keys(&[Key::Digit3]), Texture::Glass).texture, None);
    }

    #[test]
    fn simultaneous_texture_keys_prefer_lower_slot() {
        let mut m = InputMapper::default();
        let i = m.map(&keys(&[Key::Digit5, Key::Digit2]), Texture::Dirt);
        assert_eq!(i.texture, Some(Texture::Grass));
    }

    #[test]
    fn releasing_one_of_two_texture_keys_reselects() {
        let mut m = InputMapper::default();
        m.map(&keys(&[Key::Digit2, Key::Digit4]), Texture::Dirt);
        let i = m.map(&keys(&[Key::Digit4]), Texture::Grass);
        assert_eq!(i.texture, Some(Texture::Wood));
    }

    #[test]
    fn alt_is_level() {
        let mut m = InputMapper::default();
        assert!(m.map(&keys(&[Key::LeftAlt]), Texture::Dirt).alt);
        assert!(m.map(&keys(&[Key::LeftAlt]), Texture::Dirt).alt);
    }

    #[test]
    fn binding_keys_are_deduplicated() {
        let mut b = KeyBindings::default();
        b.jump = Key::W;
        let ks = b.keys();
        assert_eq!(ks.iter().filter(|&&k| k == Key::W).count(), 1);
        assert_eq!(ks.len(), 13);
    }
}

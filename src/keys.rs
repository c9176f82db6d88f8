use blockyard_control::{Key, KeyBindings, KeySet};
use raylib::prelude::*;

pub fn to_rl(key: Key) -> KeyboardKey {
    use KeyboardKey as K;
    match key {
        Key::A => K::KEY_A,
        Key::B => K::KEY_B,
        Key::C => K::KEY_C,
        Key::D => K::KEY_D,
        Key::E => K::KEY_E,
        Key::F => K::KEY_F,
        Key::G => K::KEY_G,
        Key::H => K::KEY_H,
        Key::I => K::KEY_I,
        Key::J => K::KEY_J,
        Key::K => K::KEY_K,
        Key::L => K::KEY_L,
        Key::M => K::KEY_M,
        Key::N => K::KEY_N,
        Key::O => K::KEY_O,
        Key::P => K::KEY_P,
        Key::Q => K::KEY_Q,
        Key::R => K::KEY_R,
        Key::S => K::KEY_S,
        Key::T => K::KEY_T,
        Key::U => K::KEY_U,
        Key::V => K::KEY_V,
        Key::W => K::KEY_W,
        Key::X => K::KEY_X,
        Key::Y => K::KEY_Y,
        Key::Z => K::KEY_Z,
        Key::Digit0 => K::KEY_ZERO,
        Key::Digit1 => K::KEY_ONE,
        Key::Digit2 => K::KEY_TWO,
        Key::Digit3 => K::KEY_THREE,
        Key::Digit4 => K::KEY_FOUR,
        Key::Digit5 => K::KEY_FIVE,
        Key::Digit6 => K::KEY_SIX,
        Key::Digit7 => K::KEY_SEVEN,
        Key::Digit8 => K::KEY_EIGHT,
        Key::Digit9 => K::KEY_NINE,
        Key::Space => K::KEY_SPACE,
        Key::Tab => K::KEY_TAB,
        Key::Enter => K::KEY_ENTER,
        Key::LeftShift => K::KEY_LEFT_SHIFT,
        Key::RightShift => K::KEY_RIGHT_SHIFT,
        Key::LeftControl => K::KEY_LEFT_CONTROL,
        Key::RightControl => K::KEY_RIGHT_CONTROL,
        Key::LeftAlt => K::KEY_LEFT_ALT,
        Key::RightAlt => K::KEY_RIGHT_ALT,
        Key::Up => K::KEY_UP,
        Key::Down => K::KEY_DOWN,
        Key::Left => K::KEY_LEFT,
        Key::Right => K::KEY_RIGHT,
        Key::F1 => K::KEY_F1,
        Key::F2 => K::KEY_F2,
        Key::F3 => K::KEY_F3,
        Key::F4 => K::KEY_F4,
        Key::F5 => K::KEY_F5,
        Key::F6 => K::KEY_F6,
        Key::F7 => K::KEY_F7,
        Key::F8 => K::KEY_F8,
        Key::F9 => K::KEY_F9,
        Key::F10 => K::KEY_F10,
        Key::F11 => K::KEY_F11,
        Key::F12 => K::KEY_F12,
    }
}

/// Short label for on-screen hints.
pub fn label(key: Key) -> String {
    match key {
        Key::Digit0 => "0".into(),
        Key::Digit1 => "1".into(),
        Key::Digit2 => "2".into(),
        Key::Digit3 => "3".into(),
        Key::Digit4 => "4".into(),
        Key::Digit5 => "5".into(),
        Key::Digit6 => "6".into(),
        Key::Digit7 => "7".into(),
        Key::Digit8 => "8".into(),
        Key::Digit9 => "9".into(),
        Key::LeftAlt | Key::RightAlt => "Alt".into(),
        Key::LeftShift | Key::RightShift => "Shift".into(),
        Key::LeftControl | Key::RightControl => "Ctrl".into(),
        other => format!("{:?}", other),
    }
}

/// Keys from `bindings` that are down this frame.
pub fn held_keys(rl: &RaylibHandle, bindings: &KeyBindings) -> KeySet {
    bindings
        .keys()
        .into_iter()
        .filter(|&k| rl.is_key_down(to_rl(k)))
        .collect()
}

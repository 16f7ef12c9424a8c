use crate::config::GameRules;
use macroquad::prelude::*;

/// Directional state sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

pub struct InputConfig {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
}

impl InputConfig {
    pub fn from_rules(rules: &GameRules) -> Self {
        match rules.control_scheme.to_lowercase().as_str() {
            "arrows" => Self {
                move_left: vec![KeyCode::Left],
                move_right: vec![KeyCode::Right],
            },
            "wasd" => Self {
                move_left: vec![KeyCode::A],
                move_right: vec![KeyCode::D],
            },
            "custom" => {
                let left = parse_key(&rules.key_left).unwrap_or_else(|| {
                    log::warn!("Unknown key '{}', using Left", rules.key_left);
                    KeyCode::Left
                });
                let right = parse_key(&rules.key_right).unwrap_or_else(|| {
                    log::warn!("Unknown key '{}', using Right", rules.key_right);
                    KeyCode::Right
                });
                Self {
                    move_left: vec![left],
                    move_right: vec![right],
                }
            }
            _ => Self {
                move_left: vec![KeyCode::Left, KeyCode::A],
                move_right: vec![KeyCode::Right, KeyCode::D],
            },
        }
    }

    pub fn read(&self) -> InputState {
        InputState {
            left: self.move_left.iter().any(|k| is_key_down(*k)),
            right: self.move_right.iter().any(|k| is_key_down(*k)),
        }
    }
}

pub fn parse_key(name: &str) -> Option<KeyCode> {
    let s = name.trim().to_ascii_uppercase();
    let key = match s.as_str() {
        "A" => KeyCode::A,
        "B" => KeyCode::B,
        "C" => KeyCode::C,
        "D" => KeyCode::D,
        "E" => KeyCode::E,
        "F" => KeyCode::F,
        "G" => KeyCode::G,
        "H" => KeyCode::H,
        "I" => KeyCode::I,
        "J" => KeyCode::J,
        "K" => KeyCode::K,
        "L" => KeyCode::L,
        "M" => KeyCode::M,
        "N" => KeyCode::N,
        "O" => KeyCode::O,
        "P" => KeyCode::P,
        "Q" => KeyCode::Q,
        "R" => KeyCode::R,
        "S" => KeyCode::S,
        "T" => KeyCode::T,
        "U" => KeyCode::U,
        "V" => KeyCode::V,
        "W" => KeyCode::W,
        "X" => KeyCode::X,
        "Y" => KeyCode::Y,
        "Z" => KeyCode::Z,
        "LEFT" => KeyCode::Left,
        "RIGHT" => KeyCode::Right,
        "UP" => KeyCode::Up,
        "DOWN" => KeyCode::Down,
        "SPACE" | "SPACEBAR" => KeyCode::Space,
        _ => return None,
    };
    Some(key)
}

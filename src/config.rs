use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub seed: Option<u64>,

    // Viewport and physics
    pub game_width: f32,
    pub game_height: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub move_speed: f32,
    pub deadzone_factor: f32,

    // Platform field
    pub platform_count: usize,
    pub platform_spacing: f32,
    pub platform_min_x: i32,
    pub platform_max_x: i32,
    pub recycle_threshold: f32,
    pub recycle_jitter_min: i32,
    pub recycle_jitter_max: i32,
    pub end_margin: f32,

    // Display scales applied to the source textures
    pub platform_scale: f32,
    pub player_scale: f32,
    pub carrot_scale: f32,

    // Input
    pub control_scheme: String,
    pub key_left: String,
    pub key_right: String,

    // Presentation
    pub debug_overlay: bool,
    pub show_fps: bool,
    pub theme: String,

    // Placeholder asset sizes, in source pixels
    pub asset_player_width: u32,
    pub asset_player_height: u32,
    pub asset_platform_width: u32,
    pub asset_platform_height: u32,
    pub asset_carrot_width: u32,
    pub asset_carrot_height: u32,
    pub background_width: u32,
    pub background_height: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            seed: None,
            game_width: 480.0,
            game_height: 640.0,
            gravity: 200.0,
            jump_impulse: 300.0,
            move_speed: 200.0,
            deadzone_factor: 1.5,
            platform_count: 5,
            platform_spacing: 150.0,
            platform_min_x: 80,
            platform_max_x: 400,
            recycle_threshold: 700.0,
            recycle_jitter_min: 50,
            recycle_jitter_max: 100,
            end_margin: 200.0,
            platform_scale: 0.5,
            player_scale: 0.5,
            carrot_scale: 0.5,
            control_scheme: "both".to_string(),
            key_left: "Left".to_string(),
            key_right: "Right".to_string(),
            debug_overlay: false,
            show_fps: false,
            theme: "meadow".to_string(),
            asset_player_width: 120,
            asset_player_height: 191,
            asset_platform_width: 380,
            asset_platform_height: 94,
            asset_carrot_width: 107,
            asset_carrot_height: 117,
            background_width: 480,
            background_height: 640,
        }
    }
}

impl GameRules {
    /// Clamps values that would make the loop degenerate (empty pool,
    /// inverted ranges, zero-sized sprites).
    pub fn sanitized(mut self) -> Self {
        self.game_width = self.game_width.max(1.0);
        self.game_height = self.game_height.max(1.0);
        self.platform_count = self.platform_count.max(1);
        if self.platform_min_x > self.platform_max_x {
            std::mem::swap(&mut self.platform_min_x, &mut self.platform_max_x);
        }
        self.recycle_jitter_min = self.recycle_jitter_min.max(0);
        if self.recycle_jitter_min > self.recycle_jitter_max {
            std::mem::swap(&mut self.recycle_jitter_min, &mut self.recycle_jitter_max);
        }
        self.platform_scale = positive_or(self.platform_scale, 0.5);
        self.player_scale = positive_or(self.player_scale, 0.5);
        self.carrot_scale = positive_or(self.carrot_scale, 0.5);
        self.deadzone_factor = self.deadzone_factor.max(0.0);
        self.asset_player_width = self.asset_player_width.max(4);
        self.asset_player_height = self.asset_player_height.max(4);
        self.asset_platform_width = self.asset_platform_width.max(4);
        self.asset_platform_height = self.asset_platform_height.max(4);
        self.asset_carrot_width = self.asset_carrot_width.max(4);
        self.asset_carrot_height = self.asset_carrot_height.max(4);
        self.background_width = self.background_width.max(16);
        self.background_height = self.background_height.max(16);
        self
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value > 0.0 {
        value
    } else {
        fallback
    }
}

/// Reads the rules file, falling back to defaults when it is missing or
/// malformed.
pub fn load_rules(path: impl AsRef<Path>) -> GameRules {
    match try_load_rules(path.as_ref()) {
        Ok(rules) => rules.sanitized(),
        Err(e) => {
            log::warn!("{e}. Using defaults.");
            GameRules::default()
        }
    }
}

pub fn try_load_rules(path: &Path) -> Result<GameRules, ConfigError> {
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: display,
        source,
    })
}

pub fn save_rules(path: impl AsRef<Path>, rules: &GameRules) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let text = serde_json::to_string_pretty(rules)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }
    fs::write(path, text).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    log::info!("Saved rules to {}", path.display());
    Ok(())
}

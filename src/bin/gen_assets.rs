#[allow(dead_code)]
#[path = "../config.rs"]
mod config;
#[allow(dead_code)]
#[path = "../error.rs"]
mod error;

use config::{load_rules, GameRules};
use image::{ImageBuffer, Rgba};
use std::fs;
use std::path::Path;

const RULES_PATH: &str = "assets/config/rules.json";

type RgbaImage = ImageBuffer<Rgba<u8>, Vec<u8>>;

/// A single-colour sprite, or a vertical gradient when `top != bottom`.
struct FlatSprite {
    path: &'static str,
    width: u32,
    height: u32,
    top: [u8; 4],
    bottom: [u8; 4],
}

impl FlatSprite {
    fn render(&self) -> RgbaImage {
        let (top, bottom, height) = (self.top, self.bottom, self.height);
        ImageBuffer::from_fn(self.width, height, |_x, y| {
            let t = y as f32 / (height.saturating_sub(1).max(1) as f32);
            let mut px = [0u8; 4];
            for (i, c) in px.iter_mut().enumerate() {
                let v = top[i] as f32 + (bottom[i] as f32 - top[i] as f32) * t;
                *c = v.round().clamp(0.0, 255.0) as u8;
            }
            Rgba(px)
        })
    }
}

/// Overwrites assets/ with flat placeholders sized from the rules file.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let rules = load_rules(RULES_PATH);
    let base = Path::new("assets");
    for sprite in flat_sprites(&rules) {
        write_png(&base.join(sprite.path), &sprite.render())?;
    }

    println!("Placeholder sprites written to the assets/ folder.");
    Ok(())
}

fn flat_sprites(rules: &GameRules) -> Vec<FlatSprite> {
    let solid = |path, width, height, color| FlatSprite {
        path,
        width,
        height,
        top: color,
        bottom: color,
    };
    vec![
        solid(
            "sprites/player/stand.png",
            rules.asset_player_width,
            rules.asset_player_height,
            [190, 170, 150, 255],
        ),
        solid(
            "sprites/player/jump.png",
            rules.asset_player_width,
            rules.asset_player_height,
            [215, 195, 175, 255],
        ),
        solid(
            "tiles/platform.png",
            rules.asset_platform_width,
            rules.asset_platform_height,
            [140, 95, 55, 255],
        ),
        solid(
            "sprites/carrot.png",
            rules.asset_carrot_width,
            rules.asset_carrot_height,
            [245, 130, 30, 255],
        ),
        FlatSprite {
            path: "backgrounds/background.png",
            width: rules.background_width,
            height: rules.background_height,
            top: [120, 180, 240, 255],
            bottom: [210, 235, 255, 255],
        },
    ]
}

fn write_png(path: &Path, img: &RgbaImage) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    img.save(path)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

use image::{ImageBuffer, Rgba};
use std::fs;
use std::path::Path;

use ::rand::rngs::StdRng;
use ::rand::Rng;
use ::rand::SeedableRng;

use crate::assets::SpriteKind;
use crate::config::GameRules;
use crate::error::AssetError;

type RgbaImage = ImageBuffer<Rgba<u8>, Vec<u8>>;

/// Writes a placeholder PNG for every sprite missing under `root`.
/// Existing files are left alone. Returns the kinds that were written.
pub fn generate_placeholder_assets(
    root: &Path,
    seed: u64,
    rules: &GameRules,
) -> Result<Vec<SpriteKind>, AssetError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let palette = pick_theme_colors(&rules.theme);
    let mut written = Vec::new();

    for kind in SpriteKind::ALL {
        // The rng advances for every kind, present on disk or not.
        let img = match kind {
            SpriteKind::BunnyStand => bunny(
                rules.asset_player_width,
                rules.asset_player_height,
                random_color(&mut rng, palette.bunny_stand, 30),
                false,
            ),
            SpriteKind::BunnyJump => bunny(
                rules.asset_player_width,
                rules.asset_player_height,
                random_color(&mut rng, palette.bunny_jump, 30),
                true,
            ),
            SpriteKind::Platform => platform(
                rules.asset_platform_width,
                rules.asset_platform_height,
                random_color(&mut rng, palette.platform_top, 20),
                random_color(&mut rng, palette.platform_base, 20),
            ),
            SpriteKind::Carrot => carrot(
                rules.asset_carrot_width,
                rules.asset_carrot_height,
                random_color(&mut rng, palette.carrot, 20),
                random_color(&mut rng, palette.carrot_leaves, 20),
            ),
            SpriteKind::Background => vertical_gradient(
                rules.background_width,
                rules.background_height,
                random_color(&mut rng, palette.bg_top, 20),
                random_color(&mut rng, palette.bg_bottom, 20),
            ),
        };

        let path = root.join(kind.relative_path());
        if path.is_file() {
            continue;
        }
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        img.save(&path).map_err(|source| AssetError::Encode {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Generated placeholder {}", path.display());
        written.push(kind);
    }

    Ok(written)
}

fn ensure_dir(path: &Path) -> Result<(), AssetError> {
    fs::create_dir_all(path).map_err(|source| AssetError::Directory {
        path: path.display().to_string(),
        source,
    })
}

/// Rounded body with two ears; the jump pose stretches the ears out.
fn bunny(width: u32, height: u32, color: [u8; 4], jumping: bool) -> RgbaImage {
    let w = width.max(4) as f32;
    let h = height.max(4) as f32;
    let ear_h = if jumping { h * 0.45 } else { h * 0.35 };
    let body_cy = ear_h + (h - ear_h) / 2.0;
    let (body_rx, body_ry) = (w / 2.0, (h - ear_h) / 2.0);
    let ear_w = w * 0.18;
    let ears = [w * 0.3, w * 0.7];

    ImageBuffer::from_fn(width.max(4), height.max(4), |x, y| {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        let dx = (px - w / 2.0) / body_rx;
        let dy = (py - body_cy) / body_ry;
        let in_body = dx * dx + dy * dy <= 1.0;
        let in_ear = py < ear_h + body_ry * 0.2
            && ears.iter().any(|cx| (px - cx).abs() <= ear_w / 2.0);
        if in_body || in_ear {
            Rgba(color)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Solid slab with a lighter strip along the top.
fn platform(width: u32, height: u32, top: [u8; 4], base: [u8; 4]) -> RgbaImage {
    let strip = (height / 4).max(1);
    ImageBuffer::from_fn(width.max(4), height.max(4), |_x, y| {
        if y < strip {
            Rgba(top)
        } else {
            Rgba(base)
        }
    })
}

/// Downward-pointing triangle with a tuft on top.
fn carrot(width: u32, height: u32, root: [u8; 4], leaves: [u8; 4]) -> RgbaImage {
    let w = width.max(4) as f32;
    let h = height.max(4) as f32;
    let tuft = h * 0.25;
    ImageBuffer::from_fn(width.max(4), height.max(4), |x, y| {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        let off = (px - w / 2.0).abs();
        if py < tuft {
            if off <= w * 0.15 {
                return Rgba(leaves);
            }
            return Rgba([0, 0, 0, 0]);
        }
        let t = (py - tuft) / (h - tuft);
        if off <= (w / 2.0) * (1.0 - t) {
            Rgba(root)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

fn vertical_gradient(
    width: u32,
    height: u32,
    top_color: [u8; 4],
    bottom_color: [u8; 4],
) -> RgbaImage {
    ImageBuffer::from_fn(width, height, |_x, y| {
        let t = y as f32 / (height.saturating_sub(1).max(1) as f32);
        let lerp = |a: u8, b: u8| -> u8 {
            ((a as f32 * (1.0 - t)) + (b as f32 * t)).round().clamp(0.0, 255.0) as u8
        };
        Rgba([
            lerp(top_color[0], bottom_color[0]),
            lerp(top_color[1], bottom_color[1]),
            lerp(top_color[2], bottom_color[2]),
            lerp(top_color[3], bottom_color[3]),
        ])
    })
}

fn random_color(rng: &mut StdRng, base: [u8; 3], variance: u8) -> [u8; 4] {
    let mut out = [0u8; 4];
    for i in 0..3 {
        let offset: i16 = rng.gen_range(-(variance as i16)..=(variance as i16));
        let v = base[i] as i16 + offset;
        out[i] = v.clamp(0, 255) as u8;
    }
    out[3] = 255;
    out
}

struct ThemePalette {
    bunny_stand: [u8; 3],
    bunny_jump: [u8; 3],
    platform_top: [u8; 3],
    platform_base: [u8; 3],
    carrot: [u8; 3],
    carrot_leaves: [u8; 3],
    bg_top: [u8; 3],
    bg_bottom: [u8; 3],
}

fn pick_theme_colors(theme: &str) -> ThemePalette {
    match theme.to_lowercase().as_str() {
        "dusk" => ThemePalette {
            bunny_stand: [200, 190, 210],
            bunny_jump: [230, 220, 240],
            platform_top: [120, 90, 150],
            platform_base: [70, 50, 90],
            carrot: [240, 120, 40],
            carrot_leaves: [60, 150, 80],
            bg_top: [20, 20, 60],
            bg_bottom: [200, 110, 90],
        },
        "snow" => ThemePalette {
            bunny_stand: [240, 240, 245],
            bunny_jump: [255, 255, 255],
            platform_top: [250, 250, 255],
            platform_base: [150, 170, 200],
            carrot: [250, 130, 40],
            carrot_leaves: [40, 140, 70],
            bg_top: [150, 190, 230],
            bg_bottom: [230, 240, 250],
        },
        "neon" => ThemePalette {
            bunny_stand: [80, 200, 255],
            bunny_jump: [255, 80, 200],
            platform_top: [120, 255, 120],
            platform_base: [80, 80, 80],
            carrot: [255, 160, 40],
            carrot_leaves: [80, 255, 120],
            bg_top: [10, 10, 30],
            bg_bottom: [40, 0, 80],
        },
        _ => ThemePalette {
            bunny_stand: [190, 170, 150],
            bunny_jump: [215, 195, 175],
            platform_top: [90, 190, 80],
            platform_base: [140, 95, 55],
            carrot: [245, 130, 30],
            carrot_leaves: [50, 160, 60],
            bg_top: [120, 180, 240],
            bg_bottom: [210, 235, 255],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    #[test]
    fn fills_in_every_missing_sprite() {
        let dir = tempfile::tempdir().unwrap();
        let rules = GameRules::default();
        let written = generate_placeholder_assets(dir.path(), 5, &rules).unwrap();
        assert_eq!(written, SpriteKind::ALL.to_vec());

        let carrot = image::open(dir.path().join(SpriteKind::Carrot.relative_path())).unwrap();
        assert_eq!((carrot.width(), carrot.height()), (107, 117));
        let bg = image::open(dir.path().join(SpriteKind::Background.relative_path())).unwrap();
        assert_eq!((bg.width(), bg.height()), (480, 640));
    }

    #[test]
    fn leaves_existing_files_alone() {
        let dir = tempfile::tempdir().unwrap();
        let rules = GameRules::default();
        let custom = dir.path().join(SpriteKind::Platform.relative_path());
        fs::create_dir_all(custom.parent().unwrap()).unwrap();
        platform(10, 10, [1, 2, 3, 255], [1, 2, 3, 255]).save(&custom).unwrap();

        let written = generate_placeholder_assets(dir.path(), 5, &rules).unwrap();
        assert!(!written.contains(&SpriteKind::Platform));
        assert_eq!(written.len(), 4);
        let kept = image::open(&custom).unwrap();
        assert_eq!(kept.width(), 10);

        assert!(generate_placeholder_assets(dir.path(), 5, &rules)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn same_seed_same_colours() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let rules = GameRules::default();
        generate_placeholder_assets(a.path(), 77, &rules).unwrap();
        generate_placeholder_assets(b.path(), 77, &rules).unwrap();
        let path = SpriteKind::BunnyJump.relative_path();
        let ia = image::open(a.path().join(path)).unwrap().to_rgba8();
        let ib = image::open(b.path().join(path)).unwrap().to_rgba8();
        assert_eq!(ia, ib);
    }

    #[test]
    fn carrot_is_transparent_beside_the_tip() {
        let img = carrot(40, 40, [255, 0, 0, 255], [0, 255, 0, 255]);
        assert_eq!(img.get_pixel(20, 5)[1], 255);
        assert_eq!(img.get_pixel(0, 39)[3], 0);
        assert_eq!(img.get_pixel(20, 12)[0], 255);
    }
}

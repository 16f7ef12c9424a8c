use crate::config::GameRules;
use crate::error::AssetError;
use crate::session::SpriteSizes;
use macroquad::prelude::*;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    BunnyStand,
    BunnyJump,
    Platform,
    Carrot,
    Background,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 5] = [
        SpriteKind::BunnyStand,
        SpriteKind::BunnyJump,
        SpriteKind::Platform,
        SpriteKind::Carrot,
        SpriteKind::Background,
    ];

    /// Location under the assets root.
    pub fn relative_path(self) -> &'static str {
        match self {
            SpriteKind::BunnyStand => "sprites/player/stand.png",
            SpriteKind::BunnyJump => "sprites/player/jump.png",
            SpriteKind::Platform => "tiles/platform.png",
            SpriteKind::Carrot => "sprites/carrot.png",
            SpriteKind::Background => "backgrounds/background.png",
        }
    }
}

pub struct Assets {
    pub bunny_stand: Texture2D,
    pub bunny_jump: Texture2D,
    pub platform: Texture2D,
    pub carrot: Texture2D,
    pub background: Texture2D,
}

impl Assets {
    /// On-screen sizes of the loaded textures after the rules' scales.
    pub fn sprite_sizes(&self, rules: &GameRules) -> SpriteSizes {
        SpriteSizes {
            player: self.bunny_stand.size() * rules.player_scale,
            platform: self.platform.size() * rules.platform_scale,
            carrot: self.carrot.size() * rules.carrot_scale,
        }
    }
}

pub async fn load_assets(root: &str) -> Result<Assets, AssetError> {
    let root = Path::new(root);
    Ok(Assets {
        bunny_stand: load_sprite(root, SpriteKind::BunnyStand).await?,
        bunny_jump: load_sprite(root, SpriteKind::BunnyJump).await?,
        platform: load_sprite(root, SpriteKind::Platform).await?,
        carrot: load_sprite(root, SpriteKind::Carrot).await?,
        background: load_sprite(root, SpriteKind::Background).await?,
    })
}

async fn load_sprite(root: &Path, kind: SpriteKind) -> Result<Texture2D, AssetError> {
    let path = root.join(kind.relative_path());
    let path_str = path.to_str().ok_or_else(|| AssetError::Texture {
        path: path.display().to_string(),
        message: "non-UTF8 path".to_string(),
    })?;

    let texture = load_texture(path_str)
        .await
        .map_err(|e| AssetError::Texture {
            path: path_str.to_string(),
            message: format!("{e:?}"),
        })?;
    texture.set_filter(FilterMode::Nearest);
    log::debug!(
        "Loaded {:?} from {path_str} ({}x{})",
        kind,
        texture.width(),
        texture.height()
    );
    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_sprite_has_its_own_png() {
        let paths: HashSet<&str> = SpriteKind::ALL.iter().map(|k| k.relative_path()).collect();
        assert_eq!(paths.len(), SpriteKind::ALL.len());
        assert!(paths.iter().all(|p| p.ends_with(".png")));
    }
}

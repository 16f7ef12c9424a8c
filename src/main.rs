mod assets;
mod asset_gen;
mod camera;
mod collectibles;
mod config;
mod error;
mod input;
mod physics;
mod platforms;
mod player;
mod pool;
mod scene;
mod score;
mod session;

use crate::config::{load_rules, save_rules, GameRules};
use crate::input::InputConfig;
use crate::scene::Scene;
use crate::session::{Session, SessionEvent};
use macroquad::prelude::*;
use std::path::Path;

const ASSETS_ROOT: &str = "assets";
const RULES_PATH: &str = "assets/config/rules.json";

/// Longest frame the simulation will integrate in one go.
const MAX_FRAME_TIME: f32 = 1.0 / 30.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum GameState {
    Playing,
    GameOver { carrots: u32 },
}

#[macroquad::main("Bunny Hop")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let rules = load_rules(RULES_PATH);
    if !Path::new(RULES_PATH).exists() {
        if let Err(e) = save_rules(RULES_PATH, &rules) {
            log::warn!("Could not write default rules: {e}");
        }
    }

    let seed = rules.seed.unwrap_or_else(random_seed_from_time);
    log::info!("Using rules: {:?}, seed: {}", rules, seed);

    macroquad::window::request_new_screen_size(rules.game_width, rules.game_height);

    match asset_gen::generate_placeholder_assets(Path::new(ASSETS_ROOT), seed, &rules) {
        Ok(written) if !written.is_empty() => {
            log::info!("Generated {} placeholder sprite(s)", written.len());
        }
        Ok(_) => {}
        Err(e) => log::error!("Failed to generate placeholder assets: {e}"),
    }

    let assets = match assets::load_assets(ASSETS_ROOT).await {
        Ok(a) => a,
        Err(e) => {
            log::error!("Failed to load assets: {e}");
            return;
        }
    };
    let sizes = assets.sprite_sizes(&rules);
    let scene = Scene::new(assets, rules.debug_overlay, rules.show_fps);
    let controls = InputConfig::from_rules(&rules);

    let mut session = Session::new(&rules, sizes, seed);
    let mut state = GameState::Playing;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        match state {
            GameState::Playing => {
                let dt = get_frame_time().min(MAX_FRAME_TIME);
                session.update(controls.read(), dt);

                for event in session.drain_events() {
                    match event {
                        SessionEvent::Bounced => log::trace!("bounce"),
                        SessionEvent::ScoreChanged(n) => log::debug!("score -> {n}"),
                        SessionEvent::PlatformRecycled { y } => {
                            log::trace!("platform recycled to {y}")
                        }
                        SessionEvent::RunEnded { carrots } => {
                            log::debug!("run ended with {carrots} carrots")
                        }
                    }
                }
                if !session.is_running() {
                    state = GameState::GameOver {
                        carrots: session.score.carrots(),
                    };
                }

                scene.draw(&session);
            }
            GameState::GameOver { carrots } => {
                if is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter) {
                    session = new_session(&rules, &scene, seed);
                    state = GameState::Playing;
                }
                scene.draw_game_over(carrots);
            }
        }

        next_frame().await;
    }
}

/// A fixed seed in the rules replays the same layout every run.
fn new_session(rules: &GameRules, scene: &Scene, seed: u64) -> Session {
    let seed = rules.seed.map_or_else(random_seed_from_time, |_| seed);
    Session::new(rules, scene.assets.sprite_sizes(rules), seed)
}

fn random_seed_from_time() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    // mix seconds and nanos a bit
    now.as_secs() ^ (now.subsec_nanos() as u64).rotate_left(32)
}

use crate::camera::Camera;
use crate::collectibles::CollectibleManager;
use crate::config::GameRules;
use crate::input::InputState;
use crate::physics::Arcade;
use crate::platforms::PlatformManager;
use crate::player::Player;
use crate::score::Score;
use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Ended,
}

/// Things that happened during an update, drained by the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Bounced,
    ScoreChanged(u32),
    PlatformRecycled { y: f32 },
    RunEnded { carrots: u32 },
}

/// Display sizes of the three sprite kinds (texture size times scale).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteSizes {
    pub player: Vec2,
    pub platform: Vec2,
    pub carrot: Vec2,
}

impl SpriteSizes {
    /// Sizes of the generated placeholder textures.
    #[cfg(test)]
    pub fn from_rules(rules: &GameRules) -> Self {
        Self {
            player: vec2(
                rules.asset_player_width as f32,
                rules.asset_player_height as f32,
            ) * rules.player_scale,
            platform: vec2(
                rules.asset_platform_width as f32,
                rules.asset_platform_height as f32,
            ) * rules.platform_scale,
            carrot: vec2(
                rules.asset_carrot_width as f32,
                rules.asset_carrot_height as f32,
            ) * rules.carrot_scale,
        }
    }
}

/// One run, from the first bounce to falling off the bottom.
pub struct Session {
    pub rules: GameRules,
    pub player: Player,
    pub camera: Camera,
    pub platforms: PlatformManager,
    pub collectibles: CollectibleManager,
    pub score: Score,
    pub state: RunState,
    pub touching_down: bool,
    pub frame: u64,
    arcade: Arcade,
    rng: StdRng,
    events: Vec<SessionEvent>,
}

impl Session {
    pub fn new(rules: &GameRules, sizes: SpriteSizes, seed: u64) -> Self {
        let score = Score::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let viewport = vec2(rules.game_width, rules.game_height);
        let platforms = PlatformManager::new(rules, sizes.platform, &mut rng);
        let collectibles = CollectibleManager::new(sizes.carrot, rules.recycle_threshold);
        let player = Player::new(viewport / 2.0, sizes.player);
        let mut camera = Camera::new(viewport, rules.game_width * rules.deadzone_factor);
        camera.follow(player.position);

        log::info!(
            "New run: seed {seed}, {} platforms, view {}x{}",
            rules.platform_count,
            rules.game_width,
            rules.game_height
        );

        Self {
            rules: rules.clone(),
            player,
            camera,
            platforms,
            collectibles,
            score,
            state: RunState::Running,
            touching_down: false,
            frame: 0,
            arcade: Arcade::new(rules.gravity),
            rng,
            events: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn score_text(&self) -> String {
        self.score.text()
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, SessionEvent> {
        self.events.drain(..)
    }

    /// Advances the run by one frame. Does nothing once the run has ended.
    pub fn update(&mut self, input: InputState, dt: f32) {
        if self.state == RunState::Ended {
            return;
        }
        self.frame += 1;
        log::trace!(
            "frame {} dt={dt} player=({}, {}) scroll_y={}",
            self.frame,
            self.player.position.x,
            self.player.position.y,
            self.camera.scroll_y()
        );

        // Bounce off whatever the last physics step landed us on.
        if self.player.bounce(self.touching_down, self.rules.jump_impulse) {
            self.events.push(SessionEvent::Bounced);
        }
        self.player.settle_anim();

        let outcome = self.arcade.step(
            dt,
            &mut self.player,
            &self.platforms,
            &mut self.collectibles,
        );
        self.touching_down = outcome.touching_down;
        for handle in outcome.overlaps {
            if self.collectibles.collect(handle, &mut self.score) {
                self.events
                    .push(SessionEvent::ScoreChanged(self.score.carrots()));
            }
        }
        self.camera.follow(self.player.position);

        let scroll_y = self.camera.scroll_y();
        let recycled = self
            .platforms
            .recycle(scroll_y, &mut self.rng, &mut self.collectibles);
        for handle in recycled {
            if let Some(platform) = self.platforms.pool().get(handle) {
                self.events.push(SessionEvent::PlatformRecycled {
                    y: platform.position.y,
                });
            }
        }

        let missed = self.collectibles.cleanup(scroll_y);
        if missed > 0 {
            log::debug!("{missed} carrot(s) scrolled away");
        }

        self.player
            .steer(input, self.touching_down, self.rules.move_speed);
        self.player.wrap_horizontal(self.rules.game_width);

        self.check_end();
    }

    fn check_end(&mut self) {
        let Some((_, bottom)) = self.platforms.find_bottom_most() else {
            return;
        };
        if self.player.position.y > bottom.position.y + self.rules.end_margin {
            self.state = RunState::Ended;
            let carrots = self.score.carrots();
            log::info!("Run ended after {} frames with {carrots} carrots", self.frame);
            self.events.push(SessionEvent::RunEnded { carrots });
        }
    }
}

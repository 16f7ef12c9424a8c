use crate::input::InputState;
use macroquad::prelude::*;

/// Which texture the bunny shows. Purely cosmetic: physics never reads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerAnim {
    Standing,
    Jumping,
}

pub struct Player {
    /// Sprite centre, y grows downward.
    pub position: Vec2,
    pub velocity: Vec2,
    /// Display size (texture size times scale).
    pub size: Vec2,
    pub anim: PlayerAnim,
}

impl Player {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
            anim: PlayerAnim::Standing,
        }
    }

    pub fn half_width(&self) -> f32 {
        self.size.x * 0.5
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y * 0.5
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.position.x - self.size.x / 2.0,
            self.position.y - self.size.y / 2.0,
            self.size.x,
            self.size.y,
        )
    }

    /// Launches the bunny whenever it is touching a platform from above.
    /// Returns true when the impulse was applied this frame.
    pub fn bounce(&mut self, touching_down: bool, jump_impulse: f32) -> bool {
        if touching_down {
            self.velocity.y = -jump_impulse;
            self.anim = PlayerAnim::Jumping;
            true
        } else {
            false
        }
    }

    /// Switches back to the standing texture once the bunny starts falling.
    pub fn settle_anim(&mut self) {
        if self.velocity.y > 0.0 && self.anim != PlayerAnim::Standing {
            self.anim = PlayerAnim::Standing;
        }
    }

    /// Horizontal control only works mid-air.
    pub fn steer(&mut self, input: InputState, touching_down: bool, move_speed: f32) {
        self.velocity.x = if touching_down {
            0.0
        } else {
            match (input.left, input.right) {
                (true, false) => -move_speed,
                (false, true) => move_speed,
                _ => 0.0,
            }
        };
    }

    /// Teleports to the opposite edge once the sprite has fully left the
    /// viewport.
    pub fn wrap_horizontal(&mut self, game_width: f32) {
        let half_w = self.half_width();
        if self.position.x < -half_w {
            self.position.x = game_width + half_w;
        } else if self.position.x > game_width + half_w {
            self.position.x = -half_w;
        }
    }
}

use crate::collectibles::CollectibleManager;
use crate::platforms::PlatformManager;
use crate::player::Player;
use crate::pool::Handle;
use macroquad::prelude::*;

/// Result of one physics step.
#[derive(Debug, Default)]
pub struct StepOutcome {
    /// The player's bottom edge rests on a platform.
    pub touching_down: bool,
    /// Carrots overlapping the player after the step, in pool order.
    pub overlaps: Vec<Handle>,
}

/// Minimal arcade physics: gravity, platforms that only block from above,
/// and overlap tests for pickups.
pub struct Arcade {
    pub gravity: f32,
}

impl Arcade {
    pub fn new(gravity: f32) -> Self {
        Self { gravity }
    }

    pub fn step(
        &self,
        dt: f32,
        player: &mut Player,
        platforms: &PlatformManager,
        collectibles: &mut CollectibleManager,
    ) -> StepOutcome {
        let bodies: Vec<Rect> = platforms.iter().map(|(_, p)| p.body).collect();

        let prev_bottom = player.bottom();
        player.velocity.y += self.gravity * dt;
        player.position += player.velocity * dt;
        let half_h = player.size.y / 2.0;
        let touching_down = land_on_platforms(
            &mut player.position,
            &mut player.velocity,
            player.size.x / 2.0,
            half_h,
            prev_bottom,
            &bodies,
        );

        for (_, carrot) in collectibles.pool_mut().iter_active_mut() {
            let Some(size) = carrot.body else {
                continue;
            };
            let prev_bottom = carrot.position.y + size.y / 2.0;
            carrot.velocity.y += self.gravity * dt;
            carrot.position += carrot.velocity * dt;
            land_on_platforms(
                &mut carrot.position,
                &mut carrot.velocity,
                size.x / 2.0,
                size.y / 2.0,
                prev_bottom,
                &bodies,
            );
        }

        let player_rect = player.rect();
        let overlaps = collectibles
            .pool()
            .iter_active()
            .filter(|(_, c)| c.body_rect().map_or(false, |r| r.overlaps(&player_rect)))
            .map(|(h, _)| h)
            .collect();

        StepOutcome {
            touching_down,
            overlaps,
        }
    }
}

/// Only the body's bottom edge collides: a body lands when it is moving
/// down, its bottom is past a platform top and it was above the platform's
/// mid-line before the step. Bodies pass through from below and the sides.
fn land_on_platforms(
    position: &mut Vec2,
    velocity: &mut Vec2,
    half_w: f32,
    half_h: f32,
    prev_bottom: f32,
    platforms: &[Rect],
) -> bool {
    if velocity.y < 0.0 {
        return false;
    }

    let bottom = position.y + half_h;
    let left = position.x - half_w;
    let right = position.x + half_w;

    let mut landed_on: Option<f32> = None;
    for plat in platforms {
        if right <= plat.left() || left >= plat.right() {
            continue;
        }
        if prev_bottom <= plat.top() + plat.h / 2.0 && bottom >= plat.top() {
            landed_on = Some(match landed_on {
                Some(top) => top.min(plat.top()),
                None => plat.top(),
            });
        }
    }

    match landed_on {
        Some(top) => {
            position.y = top - half_h;
            velocity.y = 0.0;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameRules;
    use crate::platforms::sync_body;
    use ::rand::rngs::StdRng;
    use ::rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;
    const PLATFORM: Vec2 = Vec2::new(190.0, 47.0);

    fn world() -> (PlatformManager, CollectibleManager) {
        let mut rng = StdRng::seed_from_u64(9);
        let mut platforms = PlatformManager::new(&GameRules::default(), PLATFORM, &mut rng);
        // Line every platform up under x = 240 so tests know where they are.
        let handles: Vec<Handle> = platforms.iter().map(|(h, _)| h).collect();
        for h in handles {
            let p = platforms.pool_mut().get_mut(h).unwrap();
            p.position.x = 240.0;
            sync_body(p, PLATFORM);
        }
        (platforms, CollectibleManager::new(vec2(53.5, 58.5), 700.0))
    }

    #[test]
    fn gravity_accelerates_free_fall() {
        let (platforms, mut carrots) = world();
        let mut player = Player::new(vec2(240.0, -300.0), vec2(60.0, 95.5));
        let out = Arcade::new(200.0).step(0.5, &mut player, &platforms, &mut carrots);
        assert!(!out.touching_down);
        assert_eq!(player.velocity.y, 100.0);
        assert_eq!(player.position.y, -250.0);
    }

    #[test]
    fn lands_on_platform_top() {
        let (platforms, mut carrots) = world();
        // Platform at y=150 has its top at 126.5.
        let mut player = Player::new(vec2(240.0, 126.5 - 47.75 - 1.0), vec2(60.0, 95.5));
        player.velocity.y = 120.0;
        let out = Arcade::new(200.0).step(DT, &mut player, &platforms, &mut carrots);
        assert!(out.touching_down);
        assert_eq!(player.velocity.y, 0.0);
        assert_eq!(player.bottom(), 126.5);
    }

    #[test]
    fn passes_through_from_below() {
        let (platforms, mut carrots) = world();
        let mut player = Player::new(vec2(240.0, 180.0), vec2(60.0, 95.5));
        player.velocity.y = -300.0;
        let out = Arcade::new(200.0).step(DT, &mut player, &platforms, &mut carrots);
        assert!(!out.touching_down);
        assert!(player.velocity.y < 0.0);
    }

    #[test]
    fn misses_platform_when_beside_it() {
        let (platforms, mut carrots) = world();
        let mut player = Player::new(vec2(20.0, 126.5 - 47.75 - 1.0), vec2(60.0, 95.5));
        player.velocity.y = 120.0;
        let out = Arcade::new(200.0).step(DT, &mut player, &platforms, &mut carrots);
        assert!(!out.touching_down);
    }

    #[test]
    fn carrot_falls_and_rests_on_platform() {
        let (platforms, mut carrots) = world();
        let (_, plat) = platforms
            .iter()
            .find(|(_, p)| p.position.y == 150.0)
            .unwrap();
        let h = carrots.spawn_above(plat, PLATFORM.y);
        let mut player = Player::new(vec2(240.0, -2000.0), vec2(60.0, 95.5));
        let arcade = Arcade::new(200.0);
        for _ in 0..120 {
            arcade.step(DT, &mut player, &platforms, &mut carrots);
        }
        let carrot = carrots.pool().get(h).unwrap();
        assert_eq!(carrot.velocity.y, 0.0);
        assert_eq!(carrot.position.y + 58.5 / 2.0, 126.5);
    }

    #[test]
    fn reports_overlapping_carrots_once_each() {
        let (platforms, mut carrots) = world();
        let (_, plat) = platforms
            .iter()
            .find(|(_, p)| p.position.y == 0.0)
            .unwrap();
        let h = carrots.spawn_above(plat, PLATFORM.y);
        let far = carrots.pool_mut().acquire_or_grow(vec2(5000.0, 5000.0));
        carrots.pool_mut().get_mut(far).unwrap().body = Some(vec2(10.0, 10.0));

        let carrot_pos = carrots.pool().get(h).unwrap().position;
        let mut player = Player::new(carrot_pos, vec2(60.0, 95.5));
        let out = Arcade::new(200.0).step(DT, &mut player, &platforms, &mut carrots);
        assert_eq!(out.overlaps, vec![h]);
    }

    #[test]
    fn disabled_bodies_are_ignored() {
        let (platforms, mut carrots) = world();
        let h = carrots.pool_mut().acquire_or_grow(vec2(240.0, -1000.0));
        let mut player = Player::new(vec2(240.0, -1000.0), vec2(60.0, 95.5));
        let out = Arcade::new(200.0).step(DT, &mut player, &platforms, &mut carrots);
        assert!(out.overlaps.is_empty());
        assert_eq!(carrots.pool().get(h).unwrap().position.y, -1000.0);
    }
}

use crate::collectibles::CollectibleManager;
use crate::config::GameRules;
use crate::pool::{Handle, Pool, Pooled};
use macroquad::prelude::*;
use ::rand::Rng;

/// A platform. `body` is a static collision box: it does not follow
/// `position` until [`sync_body`] is called.
#[derive(Default)]
pub struct Platform {
    pub position: Vec2,
    pub body: Rect,
}

impl Pooled for Platform {
    fn place(&mut self, position: Vec2) {
        self.position = position;
    }
}

pub fn sync_body(platform: &mut Platform, size: Vec2) {
    platform.body = Rect::new(
        platform.position.x - size.x / 2.0,
        platform.position.y - size.y / 2.0,
        size.x,
        size.y,
    );
}

pub struct PlatformManager {
    pool: Pool<Platform>,
    size: Vec2,
    recycle_threshold: f32,
    jitter_min: i32,
    jitter_max: i32,
}

impl PlatformManager {
    /// Lays out `platform_count` platforms `platform_spacing` apart starting
    /// at y = 0, each at a random x.
    pub fn new(rules: &GameRules, size: Vec2, rng: &mut impl Rng) -> Self {
        let mut pool = Pool::with_capacity(rules.platform_count);
        for i in 0..rules.platform_count {
            let x = rng.gen_range(rules.platform_min_x..=rules.platform_max_x) as f32;
            let y = rules.platform_spacing * i as f32;
            match pool.acquire(vec2(x, y)) {
                Some(handle) => {
                    if let Some(platform) = pool.get_mut(handle) {
                        sync_body(platform, size);
                    }
                }
                None => log::error!("platform pool exhausted at {i}"),
            }
        }

        Self {
            pool,
            size,
            recycle_threshold: rules.recycle_threshold,
            jitter_min: rules.recycle_jitter_min,
            jitter_max: rules.recycle_jitter_max,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn pool(&self) -> &Pool<Platform> {
        &self.pool
    }

    #[cfg(test)]
    pub fn pool_mut(&mut self) -> &mut Pool<Platform> {
        &mut self.pool
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, &Platform)> {
        self.pool.iter_active()
    }

    /// Moves every platform that scrolled below `scroll_y + threshold` to
    /// just above the top of the view and puts a carrot on it.
    pub fn recycle(
        &mut self,
        scroll_y: f32,
        rng: &mut impl Rng,
        collectibles: &mut CollectibleManager,
    ) -> Vec<Handle> {
        let limit = scroll_y + self.recycle_threshold;
        let size = self.size;
        let (jitter_min, jitter_max) = (self.jitter_min, self.jitter_max);
        let mut recycled = Vec::new();

        for (handle, platform) in self.pool.iter_active_mut() {
            if platform.position.y < limit {
                continue;
            }
            let jitter = rng.gen_range(jitter_min..=jitter_max) as f32;
            platform.position.y = scroll_y - jitter;
            sync_body(platform, size);
            collectibles.spawn_above(platform, size.y);
            log::debug!(
                "platform {} recycled to y={} (scroll_y={})",
                handle.index(),
                platform.position.y,
                scroll_y
            );
            recycled.push(handle);
        }

        recycled
    }

    /// The visually lowest platform. Ties go to the first one in pool order.
    pub fn find_bottom_most(&self) -> Option<(Handle, &Platform)> {
        let mut bottom: Option<(Handle, &Platform)> = None;
        for (handle, platform) in self.pool.iter_active() {
            match bottom {
                Some((_, b)) if platform.position.y <= b.position.y => {}
                _ => bottom = Some((handle, platform)),
            }
        }
        bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::rngs::StdRng;
    use ::rand::SeedableRng;

    const SIZE: Vec2 = Vec2::new(190.0, 47.0);

    fn setup(seed: u64) -> (PlatformManager, CollectibleManager, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let rules = GameRules::default();
        let platforms = PlatformManager::new(&rules, SIZE, &mut rng);
        let carrots = CollectibleManager::new(vec2(53.5, 58.5), rules.recycle_threshold);
        (platforms, carrots, rng)
    }

    fn ys(platforms: &PlatformManager) -> Vec<f32> {
        platforms.iter().map(|(_, p)| p.position.y).collect()
    }

    #[test]
    fn initial_layout_is_spaced_and_in_range() {
        for seed in 0..20 {
            let (platforms, _, _) = setup(seed);
            assert_eq!(ys(&platforms), vec![0.0, 150.0, 300.0, 450.0, 600.0]);
            for (_, p) in platforms.iter() {
                assert!((80.0..=400.0).contains(&p.position.x));
                assert_eq!(p.position.x.fract(), 0.0);
                assert_eq!(p.body.center(), p.position);
                assert_eq!(p.body.size(), SIZE);
            }
        }
    }

    #[test]
    fn bottom_platform_recycles_at_exact_threshold() {
        let (mut platforms, mut carrots, mut rng) = setup(7);

        assert!(platforms.recycle(0.0, &mut rng, &mut carrots).is_empty());
        assert!(platforms.recycle(-50.0, &mut rng, &mut carrots).is_empty());

        let recycled = platforms.recycle(-100.0, &mut rng, &mut carrots);
        assert_eq!(recycled.len(), 1);
        let p = platforms.pool().get(recycled[0]).unwrap();
        assert!((-200.0..=-150.0).contains(&p.position.y));
        assert_eq!(p.position.y.fract(), 0.0);
        assert_eq!(p.body.center(), p.position);
    }

    #[test]
    fn recycle_spawns_carrot_above_platform() {
        let (mut platforms, mut carrots, mut rng) = setup(3);
        let recycled = platforms.recycle(-100.0, &mut rng, &mut carrots);
        let p = platforms.pool().get(recycled[0]).unwrap();
        assert_eq!(carrots.active_count(), 1);
        let (_, carrot) = carrots.pool().iter_active().next().unwrap();
        assert_eq!(carrot.position, vec2(p.position.x, p.position.y - SIZE.y));
    }

    #[test]
    fn pool_size_never_changes() {
        let (mut platforms, mut carrots, mut rng) = setup(11);
        let mut scroll_y = 0.0;
        for _ in 0..500 {
            scroll_y -= 13.0;
            platforms.recycle(scroll_y, &mut rng, &mut carrots);
            assert_eq!(platforms.pool().active_count(), 5);
            assert_eq!(platforms.pool().capacity(), 5);
            for (_, p) in platforms.iter() {
                assert!(p.position.y < scroll_y + 700.0);
            }
        }
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let (mut platforms, mut carrots, mut rng) = setup(5);
        for step in 1..200 {
            let scroll_y = -(step as f32) * 150.0;
            for handle in platforms.recycle(scroll_y, &mut rng, &mut carrots) {
                let y = platforms.pool().get(handle).unwrap().position.y;
                let r = scroll_y - y;
                assert!((50.0..=100.0).contains(&r), "jitter {r} out of range");
            }
        }
    }

    #[test]
    fn bottom_most_picks_max_y_first_on_ties() {
        let (mut platforms, _, _) = setup(1);
        assert_eq!(
            platforms.find_bottom_most().map(|(_, p)| p.position.y),
            Some(600.0)
        );

        let handles: Vec<Handle> = platforms.iter().map(|(h, _)| h).collect();
        for (i, h) in handles.iter().enumerate() {
            let p = platforms.pool_mut().get_mut(*h).unwrap();
            p.position.y = if i == 1 || i == 3 { 900.0 } else { 10.0 };
        }
        let (bottom, _) = platforms.find_bottom_most().unwrap();
        assert_eq!(bottom, handles[1]);
    }
}

use crate::platforms::Platform;
use crate::pool::{Handle, Pool, Pooled};
use crate::score::Score;
use macroquad::prelude::*;

/// A carrot. `body` holds the collision size while the physics body is
/// enabled; `None` means physics ignores it entirely.
#[derive(Default)]
pub struct Collectible {
    pub position: Vec2,
    pub velocity: Vec2,
    pub body: Option<Vec2>,
}

impl Pooled for Collectible {
    fn place(&mut self, position: Vec2) {
        self.position = position;
    }
}

impl Collectible {
    pub fn body_rect(&self) -> Option<Rect> {
        self.body.map(|size| {
            Rect::new(
                self.position.x - size.x / 2.0,
                self.position.y - size.y / 2.0,
                size.x,
                size.y,
            )
        })
    }
}

pub struct CollectibleManager {
    pool: Pool<Collectible>,
    size: Vec2,
    cleanup_threshold: f32,
}

impl CollectibleManager {
    pub fn new(size: Vec2, cleanup_threshold: f32) -> Self {
        Self {
            pool: Pool::new(),
            size,
            cleanup_threshold,
        }
    }

    pub fn pool(&self) -> &Pool<Collectible> {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut Pool<Collectible> {
        &mut self.pool
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    /// Puts a carrot on top of a freshly recycled platform. Grows the pool
    /// instead of dropping the carrot when every slot is taken.
    pub fn spawn_above(&mut self, platform: &Platform, platform_height: f32) -> Handle {
        let pos = vec2(platform.position.x, platform.position.y - platform_height);
        let handle = self.pool.acquire_or_grow(pos);
        if let Some(carrot) = self.pool.get_mut(handle) {
            carrot.velocity = Vec2::ZERO;
            carrot.body = Some(self.size);
        }
        log::trace!("carrot {} spawned at ({}, {})", handle.index(), pos.x, pos.y);
        handle
    }

    /// Drops carrots that fell out of the playable band without being
    /// collected. Returns how many were released.
    pub fn cleanup(&mut self, scroll_y: f32) -> usize {
        let limit = scroll_y + self.cleanup_threshold;
        let missed: Vec<Handle> = self
            .pool
            .iter_active()
            .filter(|(_, c)| c.position.y >= limit)
            .map(|(h, _)| h)
            .collect();
        for handle in &missed {
            self.disable(*handle);
        }
        missed.len()
    }

    /// Picks up a carrot. Does nothing (and scores nothing) if the handle is
    /// not active.
    pub fn collect(&mut self, handle: Handle, score: &mut Score) -> bool {
        if !self.disable(handle) {
            return false;
        }
        let total = score.increment();
        log::debug!("carrot {} collected, total {}", handle.index(), total);
        true
    }

    fn disable(&mut self, handle: Handle) -> bool {
        if let Some(carrot) = self.pool.get_mut(handle) {
            carrot.body = None;
            carrot.velocity = Vec2::ZERO;
        }
        self.pool.release(handle)
    }
}

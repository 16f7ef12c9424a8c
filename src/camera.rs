use macroquad::prelude::*;

/// Scrolling view over the world.
///
/// Vertically it keeps the target centred but only ever scrolls up, so
/// the recycling thresholds measured from `scroll.y` move monotonically.
/// Horizontally the target may roam inside a deadzone band centred on the
/// view before the camera follows.
pub struct Camera {
    pub scroll: Vec2,
    pub viewport: Vec2,
    pub deadzone_width: f32,
}

impl Camera {
    pub fn new(viewport: Vec2, deadzone_width: f32) -> Self {
        Self {
            scroll: Vec2::ZERO,
            viewport,
            deadzone_width,
        }
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll.y
    }

    pub fn follow(&mut self, target: Vec2) {
        let centre_x = self.scroll.x + self.viewport.x / 2.0;
        let half_band = self.deadzone_width / 2.0;
        if target.x < centre_x - half_band {
            self.scroll.x -= centre_x - half_band - target.x;
        } else if target.x > centre_x + half_band {
            self.scroll.x += target.x - (centre_x + half_band);
        }

        let wanted_y = target.y - self.viewport.y / 2.0;
        self.scroll.y = self.scroll.y.min(wanted_y);
    }

    /// World-space rectangle currently on screen.
    pub fn view_rect(&self) -> Rect {
        Rect::new(self.scroll.x, self.scroll.y, self.viewport.x, self.viewport.y)
    }

    /// macroquad camera matching this view.
    pub fn to_camera2d(&self) -> Camera2D {
        Camera2D {
            target: self.scroll + self.viewport / 2.0,
            zoom: vec2(2.0 / self.viewport.x, 2.0 / self.viewport.y),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(vec2(480.0, 640.0), 480.0 * 1.5)
    }

    #[test]
    fn tracks_upward_movement() {
        let mut cam = camera();
        cam.follow(vec2(240.0, 320.0));
        assert_eq!(cam.scroll_y(), 0.0);
        cam.follow(vec2(240.0, 100.0));
        assert_eq!(cam.scroll_y(), -220.0);
    }

    #[test]
    fn never_scrolls_down() {
        let mut cam = camera();
        cam.follow(vec2(240.0, -500.0));
        let top = cam.scroll_y();
        cam.follow(vec2(240.0, 900.0));
        assert_eq!(cam.scroll_y(), top);
    }

    #[test]
    fn wide_deadzone_pins_horizontal_scroll() {
        let mut cam = camera();
        for x in [-30.0, 0.0, 240.0, 480.0, 510.0] {
            cam.follow(vec2(x, 320.0));
            assert_eq!(cam.scroll.x, 0.0);
        }
    }

    #[test]
    fn narrow_deadzone_follows_horizontally() {
        let mut cam = Camera::new(vec2(480.0, 640.0), 100.0);
        cam.follow(vec2(400.0, 320.0));
        assert_eq!(cam.scroll.x, 110.0);
        cam.follow(vec2(0.0, 320.0));
        assert_eq!(cam.scroll.x, -190.0);
    }

    #[test]
    fn view_rect_tracks_both_axes() {
        let mut cam = Camera::new(vec2(480.0, 640.0), 100.0);
        cam.follow(vec2(400.0, -200.0));
        let view = cam.view_rect();
        assert_eq!(view.point(), cam.scroll);
        assert_eq!(view.size(), vec2(480.0, 640.0));
        assert!(view.contains(vec2(400.0, -200.0)));
        assert_eq!(cam.to_camera2d().target, view.center());
    }
}

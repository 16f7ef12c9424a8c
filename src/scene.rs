use crate::assets::Assets;
use crate::player::PlayerAnim;
use crate::session::Session;
use macroquad::prelude::*;

const HUD_FONT_SIZE: u16 = 24;
const GAME_OVER_FONT_SIZE: u16 = 48;

/// Draws a [`Session`] with the loaded textures.
pub struct Scene {
    pub assets: Assets,
    pub debug_overlay: bool,
    pub show_fps: bool,
}

impl Scene {
    pub fn new(assets: Assets, debug_overlay: bool, show_fps: bool) -> Self {
        Self {
            assets,
            debug_overlay,
            show_fps,
        }
    }

    /// Everything in world space, then the HUD on top.
    pub fn draw(&self, session: &Session) {
        clear_background(WHITE);
        set_camera(&session.camera.to_camera2d());
        self.draw_background(session);
        self.draw_world(session);
        if self.debug_overlay {
            self.debug_draw(session);
        }
        set_default_camera();
        self.draw_hud(session);
    }

    /// The backdrop is pinned to the view so it always fills it.
    pub fn draw_background(&self, session: &Session) {
        let view = session.camera.view_rect();
        draw_texture_ex(
            &self.assets.background,
            view.x,
            view.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(view.size()),
                ..Default::default()
            },
        );
    }

    pub fn draw_world(&self, session: &Session) {
        for (_, platform) in session.platforms.iter() {
            let r = platform.body;
            draw_texture_ex(
                &self.assets.platform,
                r.x,
                r.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(r.size()),
                    ..Default::default()
                },
            );
        }

        for (_, carrot) in session.collectibles.pool().iter_active() {
            let Some(rect) = carrot.body_rect() else {
                continue;
            };
            draw_texture_ex(
                &self.assets.carrot,
                rect.x,
                rect.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(rect.size()),
                    ..Default::default()
                },
            );
        }

        let player = &session.player;
        let tex = match player.anim {
            PlayerAnim::Standing => &self.assets.bunny_stand,
            PlayerAnim::Jumping => &self.assets.bunny_jump,
        };
        let r = player.rect();
        draw_texture_ex(
            tex,
            r.x,
            r.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(r.size()),
                ..Default::default()
            },
        );
    }

    pub fn debug_draw(&self, session: &Session) {
        for (_, platform) in session.platforms.iter() {
            let r = platform.body;
            draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, GREEN);
        }
        for (_, carrot) in session.collectibles.pool().iter_active() {
            if let Some(r) = carrot.body_rect() {
                draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, YELLOW);
            }
        }
        let r = session.player.rect();
        let color = if session.touching_down { RED } else { MAGENTA };
        draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, color);

        // Recycle line: platforms at or below it move back to the top.
        let view = session.camera.view_rect();
        let limit = view.y + session.rules.recycle_threshold;
        draw_line(view.left(), limit, view.right(), limit, 1.0, ORANGE);
    }

    pub fn draw_hud(&self, session: &Session) {
        let text = session.score_text();
        let dims = measure_text(&text, None, HUD_FONT_SIZE, 1.0);
        draw_text(
            &text,
            centred(dims.width, screen_width()),
            10.0 + dims.offset_y,
            HUD_FONT_SIZE as f32,
            BLACK,
        );

        if self.show_fps {
            draw_text(
                &format!("FPS: {}", get_fps()),
                screen_width() - 90.0,
                20.0,
                20.0,
                DARKGREEN,
            );
        }

        if self.debug_overlay {
            let dbg = format!(
                "frame {} | scroll_y {:.0} | carrots live {}/{}",
                session.frame,
                session.camera.scroll_y(),
                session.collectibles.active_count(),
                session.collectibles.pool().capacity()
            );
            draw_text(&dbg, 8.0, screen_height() - 10.0, 18.0, DARKGREEN);
        }
    }

    /// Game-over card shown in place of the world.
    pub fn draw_game_over(&self, carrots: u32) {
        clear_background(BLACK);
        let cy = screen_height() * 0.5;

        let title = "Game Over";
        let dims = measure_text(title, None, GAME_OVER_FONT_SIZE, 1.0);
        draw_text(
            title,
            centred(dims.width, screen_width()),
            cy,
            GAME_OVER_FONT_SIZE as f32,
            WHITE,
        );

        let summary = format!("Carrots: {carrots}");
        let dims = measure_text(&summary, None, HUD_FONT_SIZE, 1.0);
        draw_text(
            &summary,
            centred(dims.width, screen_width()),
            cy + 44.0,
            HUD_FONT_SIZE as f32,
            ORANGE,
        );

        let hint = "Press Space to play again";
        let dims = measure_text(hint, None, 20, 1.0);
        draw_text(hint, centred(dims.width, screen_width()), cy + 84.0, 20.0, GRAY);
    }
}

fn centred(width: f32, view_width: f32) -> f32 {
    ((view_width - width) / 2.0).max(0.0)
}

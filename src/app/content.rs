//! 3-D viewport for `WordCloudApp`.
//!
//! Everything is drawn with the egui painter after a software perspective
//! projection: starfield first, then connector lines, then words sorted
//! far-to-near so nearer labels overdraw farther ones.

use eframe::egui;

use wordcloud3d::render::camera::{OrbitCamera, Projected, Viewport};
use wordcloud3d::render::connections::LINE_OPACITY;
use wordcloud3d::render::galaxy::{
    spun, Star, COLORED_OPACITY, COLORED_SIZE, SPIN_SPEED, WHITE_OPACITY, WHITE_SIZE,
};
use wordcloud3d::render::BackgroundMode;

use super::WordCloudApp;

/// Smallest star radius in points, keeps distant stars visible
const MIN_STAR_RADIUS: f32 = 0.6;
const MAX_FONT_PX: f32 = 160.0;

fn viewport_of(rect: egui::Rect) -> Viewport {
    Viewport {
        x: rect.min.x,
        y: rect.min.y,
        width: rect.width(),
        height: rect.height(),
    }
}

fn rgba(rgb: [u8; 3], alpha: f32) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(rgb[0], rgb[1], rgb[2], (alpha * 255.0) as u8)
}

impl WordCloudApp {
    /// Render the scene into the remaining panel area and handle orbit input.
    pub fn draw_content(&mut self, ui: &mut egui::Ui) {
        let response = ui.allocate_response(
            ui.available_size(),
            egui::Sense::click_and_drag().union(egui::Sense::hover()),
        );

        // Drag to orbit
        if response.dragged() {
            let delta = response.drag_delta();
            self.camera.orbit(delta.x, delta.y);
        }

        // Scroll to dolly in/out
        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom(scroll);
            }
        }

        let rect = response.rect;
        let viewport = viewport_of(rect);
        let painter = ui.painter_at(rect);
        let t = self.app_start.elapsed().as_secs_f32();

        self.draw_starfield(&painter, &viewport, t);
        self.draw_connections(&painter, &viewport);

        self.scene.step_hover(self.hovered);
        let pointer = response.hover_pos();
        self.hovered = self.draw_words(&painter, &viewport, t, pointer);
    }

    fn draw_starfield(&self, painter: &egui::Painter, viewport: &Viewport, t: f32) {
        let angle = t * SPIN_SPEED;
        let fixed = OrbitCamera::default();

        let project = |star: &Star| -> Option<Projected> {
            let p = spun(star.position, angle);
            match self.background {
                BackgroundMode::Static => fixed.project(p, viewport),
                BackgroundMode::FollowCamera => self.camera.project_attached(p, viewport),
            }
        };

        let layers = [
            (&self.galaxy.colored, COLORED_SIZE, COLORED_OPACITY),
            (&self.galaxy.white, WHITE_SIZE, WHITE_OPACITY),
        ];
        for (stars, size, opacity) in layers {
            for star in stars.iter() {
                let Some(proj) = project(star) else { continue };
                let radius = (size * 0.5 * proj.scale).max(MIN_STAR_RADIUS);
                let [r, g, b] = star.color;
                let color = egui::Color32::from_rgba_unmultiplied(
                    (r * 255.0) as u8,
                    (g * 255.0) as u8,
                    (b * 255.0) as u8,
                    (opacity * 255.0) as u8,
                );
                painter.circle_filled(egui::pos2(proj.pos[0], proj.pos[1]), radius, color);
            }
        }
    }

    fn draw_connections(&self, painter: &egui::Painter, viewport: &Viewport) {
        for conn in &self.scene.connections {
            let (Some(a), Some(b)) = (
                self.camera.project(conn.start, viewport),
                self.camera.project(conn.end, viewport),
            ) else {
                continue;
            };
            painter.line_segment(
                [egui::pos2(a.pos[0], a.pos[1]), egui::pos2(b.pos[0], b.pos[1])],
                egui::Stroke::new(1.0, rgba(conn.color, LINE_OPACITY)),
            );
        }
    }

    /// Draw all words and return the index of the nearest one under `pointer`.
    fn draw_words(
        &self,
        painter: &egui::Painter,
        viewport: &Viewport,
        t: f32,
        pointer: Option<egui::Pos2>,
    ) -> Option<usize> {
        let mut visible: Vec<(usize, Projected)> = (0..self.scene.len())
            .filter_map(|i| {
                let pos = self.scene.word_position(i, t)?;
                Some((i, self.camera.project(pos, viewport)?))
            })
            .collect();
        visible.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));

        let mut hovered = None;
        for (i, proj) in visible {
            let word = &self.scene.words[i];
            let font_px = (word.size * word.scale * proj.scale).clamp(1.0, MAX_FONT_PX);
            let text_rect = painter.text(
                egui::pos2(proj.pos[0], proj.pos[1]),
                egui::Align2::CENTER_CENTER,
                &word.text,
                egui::FontId::proportional(font_px),
                egui::Color32::WHITE,
            );
            // Later words are nearer, so the last hit wins
            if pointer.is_some_and(|p| text_rect.contains(p)) {
                hovered = Some(i);
            }
        }
        hovered
    }
}

use std::collections::VecDeque;

use eframe::egui::{Color32, FontId, Painter, Rect, vec2};

use crate::field::TickStats;

const FPS_SAMPLE_WINDOW: usize = 180;

#[derive(Default)]
pub(in crate::app) struct StatsOverlay {
    pub(in crate::app) visible: bool,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

impl StatsOverlay {
    pub(in crate::app) fn new(visible: bool) -> Self {
        Self {
            visible,
            ..Self::default()
        }
    }

    pub(in crate::app) fn record_frame(&mut self, dt: f32) {
        if dt <= f32::EPSILON {
            return;
        }

        self.fps_current = (1.0 / dt).clamp(0.0, 1000.0);
        self.fps_samples.push_back(self.fps_current);
        while self.fps_samples.len() > FPS_SAMPLE_WINDOW {
            self.fps_samples.pop_front();
        }
    }

    pub(in crate::app) fn text(&self, stats: TickStats, frames: u64, stopped: bool) -> String {
        let mut parts = vec![format!("FPS {:.0}", self.fps_current)];

        if !self.fps_samples.is_empty() {
            let avg = self.fps_samples.iter().sum::<f32>() / self.fps_samples.len() as f32;
            parts.push(format!("avg {avg:.1}"));
        }
        if let Some(low) = self.fps_samples.iter().copied().reduce(f32::min) {
            parts.push(format!("low {low:.0}"));
        }

        parts.push(format!(
            "{} points / {} links / {} cursor",
            stats.points, stats.links, stats.cursor_links
        ));
        parts.push(format!("frame {frames}"));
        if stopped {
            parts.push("stopped".to_owned());
        }

        parts.join(" | ")
    }

    pub(in crate::app) fn draw(
        &self,
        painter: &Painter,
        rect: Rect,
        stats: TickStats,
        frames: u64,
        stopped: bool,
    ) {
        if !self.visible {
            return;
        }

        let text_color = Color32::from_rgb(236, 240, 241);
        let galley = painter.layout_no_wrap(
            self.text(stats, frames, stopped),
            FontId::monospace(12.0),
            text_color,
        );
        let anchor = rect.left_top() + vec2(10.0, 8.0);
        painter.rect_filled(
            Rect::from_min_size(anchor, galley.size()).expand(4.0),
            3.0,
            Color32::from_rgba_unmultiplied(19, 23, 29, 150),
        );
        painter.galley(anchor, galley, text_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_window_is_bounded_and_ignores_zero_deltas() {
        let mut overlay = StatsOverlay::new(true);
        overlay.record_frame(0.0);
        assert!(overlay.fps_samples.is_empty());

        for _ in 0..(FPS_SAMPLE_WINDOW + 20) {
            overlay.record_frame(1.0 / 60.0);
        }
        assert_eq!(overlay.fps_samples.len(), FPS_SAMPLE_WINDOW);
        assert!((overlay.fps_current - 60.0).abs() < 0.01);
    }

    #[test]
    fn text_reports_connection_counts() {
        let mut overlay = StatsOverlay::new(true);
        overlay.record_frame(1.0 / 50.0);
        let stats = TickStats {
            points: 500,
            links: 1234,
            cursor_links: 3,
        };

        let text = overlay.text(stats, 17, true);
        assert!(text.starts_with("FPS 50"));
        assert!(text.contains("500 points / 1234 links / 3 cursor"));
        assert!(text.contains("frame 17"));
        assert!(text.ends_with("stopped"));
    }
}

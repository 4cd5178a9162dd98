use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};

use crate::field::{DrawSurface, SurfaceBounds};

/// `DrawSurface` over an egui painter clipped to the backdrop rect.
pub(in crate::app) struct PainterSurface<'a> {
    painter: &'a Painter,
    origin: Pos2,
    background: Color32,
}

impl<'a> PainterSurface<'a> {
    pub(in crate::app) fn new(painter: &'a Painter, rect: Rect, background: Color32) -> Self {
        Self {
            painter,
            origin: rect.min,
            background,
        }
    }

    fn to_screen(&self, local: Pos2) -> Pos2 {
        self.origin + local.to_vec2()
    }
}

impl DrawSurface for PainterSurface<'_> {
    fn clear(&mut self, bounds: SurfaceBounds) {
        let rect = Rect::from_min_size(self.origin, bounds.size());
        self.painter.rect_filled(rect, 0.0, self.background);
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter
            .circle_filled(self.to_screen(center), radius, color);
    }

    fn draw_line(&mut self, from: Pos2, to: Pos2, color: Color32, width: f32, opacity: f32) {
        let color = color.gamma_multiply(opacity.clamp(0.0, 1.0));
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            Stroke::new(width, color),
        );
    }
}

pub(in crate::app) fn surface_local(rect: Rect, screen: Pos2) -> Pos2 {
    (screen - rect.min).to_pos2()
}

use eframe::egui::{Color32, Pos2, Vec2, vec2};

/// Drawing target for the field. Coordinates are surface-local pixels.
pub trait DrawSurface {
    fn clear(&mut self, bounds: SurfaceBounds);
    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);
    fn draw_line(&mut self, from: Pos2, to: Pos2, color: Color32, width: f32, opacity: f32);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceBounds {
    pub width: u32,
    pub height: u32,
}

impl SurfaceBounds {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn from_viewport(viewport: Vec2) -> Self {
        let to_pixels = |value: f32| {
            if value.is_finite() {
                value.max(0.0).round() as u32
            } else {
                0
            }
        };
        Self::new(to_pixels(viewport.x), to_pixels(viewport.y))
    }

    pub fn size(self) -> Vec2 {
        vec2(self.width as f32, self.height as f32)
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Tracks the surface dimensions. Resizing never touches existing points.
#[derive(Debug, Default)]
pub struct SurfaceManager {
    bounds: SurfaceBounds,
}

impl SurfaceManager {
    pub fn new(bounds: SurfaceBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> SurfaceBounds {
        self.bounds
    }

    /// Returns `true` when the dimensions actually changed.
    pub fn resize(&mut self, viewport: Vec2) -> bool {
        let next = SurfaceBounds::from_viewport(viewport);
        if next == self.bounds {
            return false;
        }
        self.bounds = next;
        true
    }
}

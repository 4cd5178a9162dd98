mod grid;
mod point;
mod pointer;
mod surface;

use anyhow::{Result, bail};
use clap::ValueEnum;
use eframe::egui::{Color32, Pos2};
use log::info;
use rand::Rng;
use serde::Deserialize;

use grid::NeighborGrid;
pub use point::Point;
pub use pointer::PointerTracker;
#[cfg(test)]
pub(crate) use surface::recording;
pub use surface::{DrawSurface, SurfaceBounds, SurfaceManager};

/// How the per-frame link pass finds candidate pairs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStrategy {
    /// Every unordered pair, O(n²).
    #[default]
    Pairwise,
    /// Threshold-sized bucket grid; same lines as `Pairwise`.
    Grid,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldSettings {
    pub point_count: usize,
    pub link_threshold: f32,
    pub cursor_threshold: f32,
    pub point_radius: f32,
    pub max_speed: f32,
    pub line_width: f32,
    pub point_color: Color32,
    pub link_color: Color32,
    pub cursor_color: Color32,
    pub strategy: ConnectionStrategy,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            point_count: 500,
            link_threshold: 120.0,
            cursor_threshold: 60.0,
            point_radius: 3.0,
            max_speed: 0.25,
            line_width: 1.0,
            point_color: Color32::WHITE,
            link_color: Color32::from_rgb(45, 52, 54),
            cursor_color: Color32::WHITE,
            strategy: ConnectionStrategy::Pairwise,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub points: usize,
    pub links: usize,
    pub cursor_links: usize,
}

pub fn is_linked(distance: f32, threshold: f32) -> bool {
    distance < threshold
}

/// Fades linearly from 1.0 at zero distance to 0.0 at the threshold.
pub fn link_opacity(distance: f32, threshold: f32) -> f32 {
    1.0 - distance / threshold
}

pub struct SimulationField {
    settings: FieldSettings,
    points: Vec<Point>,
    surface: SurfaceManager,
    pointer: PointerTracker,
    grid: NeighborGrid,
}

impl SimulationField {
    pub fn new(settings: FieldSettings, bounds: SurfaceBounds) -> Self {
        Self {
            settings,
            points: Vec::new(),
            surface: SurfaceManager::new(bounds),
            pointer: PointerTracker::default(),
            grid: NeighborGrid::default(),
        }
    }

    /// Replaces the point collection with `count` freshly randomized points.
    /// The surface must already have a non-empty size.
    pub fn initialize<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Result<()> {
        let bounds = self.surface.bounds();
        if bounds.is_empty() {
            bail!(
                "cannot place points on an empty {}x{} surface",
                bounds.width,
                bounds.height
            );
        }

        let max_speed = self.settings.max_speed;
        self.points.clear();
        self.points.reserve(count);
        self.points
            .extend((0..count).map(|_| Point::create(bounds, max_speed, rng)));

        info!(
            "initialized {count} points on a {}x{} surface",
            bounds.width, bounds.height
        );
        Ok(())
    }

    pub fn tick(&mut self, surface: &mut dyn DrawSurface) -> TickStats {
        let bounds = self.surface.bounds();
        surface.clear(bounds);

        let radius = self.settings.point_radius;
        let color = self.settings.point_color;
        for point in &mut self.points {
            point.step(bounds);
            point.render(surface, radius, color);
        }

        self.connect(surface)
    }

    /// Redraws the current state without advancing it.
    pub fn render_frozen(&mut self, surface: &mut dyn DrawSurface) -> TickStats {
        surface.clear(self.surface.bounds());
        for point in &self.points {
            point.render(surface, self.settings.point_radius, self.settings.point_color);
        }

        self.connect(surface)
    }

    fn connect(&mut self, surface: &mut dyn DrawSurface) -> TickStats {
        let pointer = self.pointer.current();
        let settings = &self.settings;
        let points = &self.points;
        let mut stats = TickStats {
            points: points.len(),
            ..TickStats::default()
        };

        match settings.strategy {
            ConnectionStrategy::Pairwise => {
                for i in 0..points.len() {
                    if draw_cursor_link(&points[i], pointer, settings, surface) {
                        stats.cursor_links += 1;
                    }
                    for j in (i + 1)..points.len() {
                        if draw_link(&points[i], &points[j], settings, surface) {
                            stats.links += 1;
                        }
                    }
                }
            }
            ConnectionStrategy::Grid => {
                self.grid.rebuild(points, settings.link_threshold);
                for i in 0..points.len() {
                    if draw_cursor_link(&points[i], pointer, settings, surface) {
                        stats.cursor_links += 1;
                    }
                    for &j in self.grid.later_neighbors(i) {
                        if draw_link(&points[i], &points[j], settings, surface) {
                            stats.links += 1;
                        }
                    }
                }
            }
        }

        stats
    }

    #[cfg(test)]
    pub(crate) fn with_points(settings: FieldSettings, bounds: SurfaceBounds, points: Vec<Point>) -> Self {
        let mut field = Self::new(settings, bounds);
        field.points = points;
        field
    }

    #[cfg(test)]
    pub(crate) fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn surface(&self) -> &SurfaceManager {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut SurfaceManager {
        &mut self.surface
    }

    pub fn pointer_mut(&mut self) -> &mut PointerTracker {
        &mut self.pointer
    }
}

fn draw_cursor_link(
    point: &Point,
    pointer: Option<Pos2>,
    settings: &FieldSettings,
    surface: &mut dyn DrawSurface,
) -> bool {
    let Some(pointer) = pointer else {
        return false;
    };
    if !is_linked(point.distance_to(pointer), settings.cursor_threshold) {
        return false;
    }

    surface.draw_line(
        point.position,
        pointer,
        settings.cursor_color,
        settings.line_width,
        1.0,
    );
    true
}

fn draw_link(
    a: &Point,
    b: &Point,
    settings: &FieldSettings,
    surface: &mut dyn DrawSurface,
) -> bool {
    let distance = a.distance_to(b.position);
    if !is_linked(distance, settings.link_threshold) {
        return false;
    }

    surface.draw_line(
        a.position,
        b.position,
        settings.link_color,
        settings.line_width,
        link_opacity(distance, settings.link_threshold),
    );
    true
}

use eframe::egui::{Color32, Pos2, Vec2, pos2, vec2};
use rand::Rng;

use super::surface::{DrawSurface, SurfaceBounds};

/// A single moving marker. Velocity only changes sign on a boundary crossing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub position: Pos2,
    pub velocity: Vec2,
}

impl Point {
    pub fn new(position: Pos2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }

    pub fn create<R: Rng + ?Sized>(bounds: SurfaceBounds, max_speed: f32, rng: &mut R) -> Self {
        let size = bounds.size();
        let position = pos2(rng.gen_range(0.0..=size.x), rng.gen_range(0.0..=size.y));
        let velocity = vec2(
            rng.gen_range(-max_speed..=max_speed),
            rng.gen_range(-max_speed..=max_speed),
        );
        Self::new(position, velocity)
    }

    /// Moves by one velocity step and reflects off the surface edges.
    ///
    /// The position is not clamped: on the frame a point crosses an edge it
    /// stays outside by less than one step and comes back on the next one.
    pub fn step(&mut self, bounds: SurfaceBounds) {
        self.position += self.velocity;

        let size = bounds.size();
        if self.position.x < 0.0 || self.position.x > size.x {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > size.y {
            self.velocity.y = -self.velocity.y;
        }
    }

    pub fn render(&self, surface: &mut dyn DrawSurface, radius: f32, color: Color32) {
        surface.fill_circle(self.position, radius, color);
    }

    pub fn distance_to(&self, other: Pos2) -> f32 {
        self.position.distance(other)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn create_places_point_inside_bounds_with_bounded_velocity() {
        let bounds = SurfaceBounds::new(320, 240);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let point = Point::create(bounds, 0.25, &mut rng);
            assert!((0.0..=320.0).contains(&point.position.x));
            assert!((0.0..=240.0).contains(&point.position.y));
            assert!(point.velocity.x.abs() <= 0.25);
            assert!(point.velocity.y.abs() <= 0.25);
        }
    }

    #[test]
    fn reflection_flips_velocity_once_per_crossing() {
        let bounds = SurfaceBounds::new(100, 100);
        let mut point = Point::new(pos2(100.0, 50.0), vec2(0.5, 0.0));

        point.step(bounds);
        assert_eq!(point.position.x, 100.5);
        assert!(point.velocity.x < 0.0);

        // Back at the edge, inside the closed interval: no second flip.
        point.step(bounds);
        assert_eq!(point.position.x, 100.0);
        assert!(point.velocity.x < 0.0);
    }

    #[test]
    fn reflection_applies_to_each_axis_independently() {
        let bounds = SurfaceBounds::new(100, 100);
        let mut point = Point::new(pos2(50.0, 0.1), vec2(0.2, -0.25));

        point.step(bounds);
        assert!(point.position.y < 0.0);
        assert_eq!(point.velocity, vec2(0.2, 0.25));
    }

    #[test]
    fn stepping_keeps_points_within_one_step_of_bounds() {
        let bounds = SurfaceBounds::new(200, 150);
        let mut rng = StdRng::seed_from_u64(11);
        let mut points = (0..64)
            .map(|_| Point::create(bounds, 0.25, &mut rng))
            .collect::<Vec<_>>();

        for _ in 0..5_000 {
            for point in &mut points {
                point.step(bounds);
                let tolerance = point.velocity.x.abs().max(point.velocity.y.abs()) + 1e-3;
                assert!(point.position.x >= -tolerance && point.position.x <= 200.0 + tolerance);
                assert!(point.position.y >= -tolerance && point.position.y <= 150.0 + tolerance);
            }
        }
    }

    #[test]
    fn zero_velocity_point_never_moves() {
        let bounds = SurfaceBounds::new(10, 10);
        let mut point = Point::new(pos2(0.0, 0.0), Vec2::ZERO);
        point.step(bounds);
        assert_eq!(point.position, pos2(0.0, 0.0));
        assert_eq!(point.velocity, Vec2::ZERO);
    }
}

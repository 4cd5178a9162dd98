use std::collections::HashMap;

use eframe::egui::Pos2;

use super::point::Point;

type CellKey = (i32, i32);

const CELL_PADDING: f32 = 1.001;

#[derive(Default)]
pub(super) struct NeighborGrid {
    cell_size: f32,
    cells: HashMap<CellKey, Vec<usize>>,
    cell_of: Vec<CellKey>,
    candidates: Vec<usize>,
}

impl NeighborGrid {
    fn key_for(&self, position: Pos2) -> CellKey {
        (
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        )
    }

    pub(super) fn rebuild(&mut self, points: &[Point], cell_size: f32) {
        self.cell_size = cell_size.max(f32::EPSILON) * CELL_PADDING;

        for bucket in self.cells.values_mut() {
            bucket.clear();
        }

        self.cell_of.clear();
        self.cell_of
            .reserve(points.len().saturating_sub(self.cell_of.capacity()));
        for (index, point) in points.iter().enumerate() {
            let key = self.key_for(point.position);
            self.cell_of.push(key);
            self.cells.entry(key).or_default().push(index);
        }

        self.cells.retain(|_, bucket| !bucket.is_empty());
    }

    /// Indices greater than `index` in the 3x3 neighborhood, ascending.
    pub(super) fn later_neighbors(&mut self, index: usize) -> &[usize] {
        self.candidates.clear();
        let Some(&(cx, cy)) = self.cell_of.get(index) else {
            return &self.candidates;
        };

        for dy in -1..=1 {
            for dx in -1..=1 {
                let key = (cx.saturating_add(dx), cy.saturating_add(dy));
                if let Some(bucket) = self.cells.get(&key) {
                    self.candidates
                        .extend(bucket.iter().copied().filter(|&other| other > index));
                }
            }
        }

        self.candidates.sort_unstable();
        &self.candidates
    }

    #[cfg(test)]
    pub(super) fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}

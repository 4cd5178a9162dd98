use eframe::egui::Pos2;

/// Last known pointer position in surface-local coordinates.
#[derive(Debug, Default)]
pub struct PointerTracker {
    position: Option<Pos2>,
}

impl PointerTracker {
    pub fn on_move(&mut self, position: Pos2) {
        self.position = Some(position);
    }

    pub fn on_leave(&mut self) {
        self.position = None;
    }

    pub fn current(&self) -> Option<Pos2> {
        self.position
    }
}

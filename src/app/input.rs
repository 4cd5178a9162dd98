use eframe::egui::{Event, Key, Rect};
use log::debug;

use super::painter::surface_local;
use crate::field::SimulationField;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum Shortcut {
    ToggleStats,
    Stop,
}

pub(in crate::app) fn sync_viewport(field: &mut SimulationField, rect: Rect) {
    if field.surface_mut().resize(rect.size()) {
        let bounds = field.surface().bounds();
        debug!("surface resized to {}x{}", bounds.width, bounds.height);
    }
}

/// Feeds pointer events to the tracker in delivery order.
pub(in crate::app) fn apply_pointer_events(field: &mut SimulationField, events: &[Event], rect: Rect) {
    for event in events {
        match event {
            Event::PointerMoved(position) => {
                field.pointer_mut().on_move(surface_local(rect, *position));
            }
            Event::PointerGone => field.pointer_mut().on_leave(),
            _ => {}
        }
    }
}

pub(in crate::app) fn shortcuts(events: &[Event]) -> Vec<Shortcut> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Key {
                key,
                pressed: true,
                repeat: false,
                ..
            } => match key {
                Key::F3 => Some(Shortcut::ToggleStats),
                Key::Escape => Some(Shortcut::Stop),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use eframe::egui::{Modifiers, Vec2, pos2, vec2};

    use super::*;
    use crate::field::recording::RecordingSurface;
    use crate::field::{FieldSettings, Point, SurfaceBounds};

    fn key(key: Key, pressed: bool, repeat: bool) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn pointer_events_are_applied_in_order_and_made_local() {
        let rect = Rect::from_min_size(pos2(0.0, 20.0), vec2(200.0, 200.0));
        let mut field = SimulationField::with_points(
            FieldSettings::default(),
            SurfaceBounds::new(200, 200),
            vec![Point::new(pos2(60.0, 60.0), Vec2::ZERO)],
        );

        apply_pointer_events(
            &mut field,
            &[Event::PointerMoved(pos2(190.0, 210.0)), Event::PointerMoved(pos2(60.0, 80.0))],
            rect,
        );
        assert_eq!(field.tick(&mut RecordingSurface::default()).cursor_links, 1);

        apply_pointer_events(
            &mut field,
            &[Event::PointerMoved(pos2(60.0, 80.0)), Event::PointerGone],
            rect,
        );
        assert_eq!(field.tick(&mut RecordingSurface::default()).cursor_links, 0);

        apply_pointer_events(
            &mut field,
            &[Event::PointerGone, Event::PointerMoved(pos2(70.0, 90.0))],
            rect,
        );
        assert_eq!(field.tick(&mut RecordingSurface::default()).cursor_links, 1);
    }

    #[test]
    fn viewport_changes_resize_the_surface() {
        let mut field = SimulationField::new(FieldSettings::default(), SurfaceBounds::new(200, 200));
        sync_viewport(&mut field, Rect::from_min_size(pos2(0.0, 0.0), vec2(320.0, 180.0)));
        assert_eq!(field.surface().bounds(), SurfaceBounds::new(320, 180));
    }

    #[test]
    fn only_fresh_key_presses_become_shortcuts() {
        let events = [
            key(Key::F3, true, false),
            key(Key::F3, true, true),
            key(Key::Escape, false, false),
            key(Key::Escape, true, false),
            key(Key::A, true, false),
        ];
        assert_eq!(shortcuts(&events), vec![Shortcut::ToggleStats, Shortcut::Stop]);
    }
}

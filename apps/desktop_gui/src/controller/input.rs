//! egui input events to toolkit-free gesture events.

use client_core::{InputEvent, NavKey};
use eframe::egui;

/// Mouse drags on desktop are fed through the touch path so a primary-button
/// drag swipes like a finger would.
#[derive(Debug, Default)]
pub struct EguiInputTranslator {
    primary_down: bool,
}

impl EguiInputTranslator {
    pub fn translate(&mut self, events: &[egui::Event]) -> Vec<InputEvent> {
        events
            .iter()
            .filter_map(|event| self.translate_one(event))
            .collect()
    }

    fn translate_one(&mut self, event: &egui::Event) -> Option<InputEvent> {
        match event {
            egui::Event::Key {
                key, pressed: true, ..
            } => Some(InputEvent::Key(match key {
                egui::Key::ArrowLeft => NavKey::ArrowLeft,
                egui::Key::ArrowRight => NavKey::ArrowRight,
                _ => NavKey::Other,
            })),
            egui::Event::Touch { phase, pos, .. } => Some(match phase {
                egui::TouchPhase::Start => InputEvent::TouchStart { x: pos.x },
                egui::TouchPhase::Move => InputEvent::TouchMove { x: pos.x },
                egui::TouchPhase::End | egui::TouchPhase::Cancel => InputEvent::TouchEnd,
            }),
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                ..
            } => {
                self.primary_down = *pressed;
                Some(if *pressed {
                    InputEvent::TouchStart { x: pos.x }
                } else {
                    InputEvent::TouchEnd
                })
            }
            egui::Event::PointerMoved(pos) if self.primary_down => {
                Some(InputEvent::TouchMove { x: pos.x })
            }
            egui::Event::PointerGone if self.primary_down => {
                self.primary_down = false;
                Some(InputEvent::TouchEnd)
            }
            _ => None,
        }
    }
}

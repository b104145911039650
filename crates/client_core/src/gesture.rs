//! Keyboard and touch input to navigation commands.

use crate::deck::Direction;

pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(NavKey),
    TouchStart { x: f32 },
    TouchMove { x: f32 },
    TouchEnd,
}

/// Pure displacement detector. A touch start arms it, the first move past the
/// threshold fires once and disarms it.
#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    threshold_px: f32,
    touch_origin: Option<f32>,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD_PX)
    }
}

impl GestureInterpreter {
    pub fn new(threshold_px: f32) -> Self {
        Self {
            threshold_px,
            touch_origin: None,
        }
    }

    pub fn threshold_px(&self) -> f32 {
        self.threshold_px
    }

    pub fn is_armed(&self) -> bool {
        self.touch_origin.is_some()
    }

    pub fn interpret(&mut self, event: InputEvent) -> Option<Direction> {
        match event {
            InputEvent::Key(key) => Self::on_key(key),
            InputEvent::TouchStart { x } => {
                self.touch_origin = Some(x);
                None
            }
            InputEvent::TouchMove { x } => self.on_touch_move(x),
            InputEvent::TouchEnd => {
                self.touch_origin = None;
                None
            }
        }
    }

    pub fn on_key(key: NavKey) -> Option<Direction> {
        match key {
            NavKey::ArrowLeft => Some(Direction::Backward),
            NavKey::ArrowRight => Some(Direction::Forward),
            NavKey::Other => None,
        }
    }

    fn on_touch_move(&mut self, x: f32) -> Option<Direction> {
        let origin = self.touch_origin?;
        let delta = origin - x;
        if delta.abs() <= self.threshold_px {
            return None;
        }
        self.touch_origin = None;
        // Finger travelled leftward.
        if delta > 0.0 {
            Some(Direction::Backward)
        } else {
            Some(Direction::Forward)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(interpreter: &mut GestureInterpreter, from: f32, moves: &[f32]) -> Vec<Direction> {
        let mut fired = Vec::new();
        interpreter.interpret(InputEvent::TouchStart { x: from });
        for &x in moves {
            if let Some(direction) = interpreter.interpret(InputEvent::TouchMove { x }) {
                fired.push(direction);
            }
        }
        fired
    }

    #[test]
    fn arrow_keys_map_to_directions_and_others_are_ignored() {
        let mut interpreter = GestureInterpreter::default();
        assert_eq!(
            interpreter.interpret(InputEvent::Key(NavKey::ArrowLeft)),
            Some(Direction::Backward)
        );
        assert_eq!(
            interpreter.interpret(InputEvent::Key(NavKey::ArrowRight)),
            Some(Direction::Forward)
        );
        assert_eq!(interpreter.interpret(InputEvent::Key(NavKey::Other)), None);
    }

    #[test]
    fn displacement_of_49_does_not_fire_but_51_fires_once() {
        let mut interpreter = GestureInterpreter::default();
        assert!(swipe(&mut interpreter, 200.0, &[151.0]).is_empty());
        assert!(interpreter.is_armed());

        let mut interpreter = GestureInterpreter::default();
        assert_eq!(
            swipe(&mut interpreter, 200.0, &[149.0]),
            vec![Direction::Backward]
        );
    }

    #[test]
    fn exactly_threshold_does_not_fire() {
        let mut interpreter = GestureInterpreter::default();
        assert!(swipe(&mut interpreter, 100.0, &[150.0, 50.0]).is_empty());
    }

    #[test]
    fn rightward_swipe_is_forward() {
        let mut interpreter = GestureInterpreter::default();
        assert_eq!(
            swipe(&mut interpreter, 10.0, &[40.0, 61.0]),
            vec![Direction::Forward]
        );
    }

    #[test]
    fn continued_movement_after_firing_is_ignored_until_next_touch_start() {
        let mut interpreter = GestureInterpreter::default();
        let fired = swipe(&mut interpreter, 300.0, &[240.0, 100.0, 0.0, 400.0, 500.0]);
        assert_eq!(fired, vec![Direction::Backward]);
        assert!(!interpreter.is_armed());

        let fired = swipe(&mut interpreter, 0.0, &[80.0]);
        assert_eq!(fired, vec![Direction::Forward]);
    }

    #[test]
    fn moves_without_touch_start_or_after_touch_end_do_nothing() {
        let mut interpreter = GestureInterpreter::default();
        assert_eq!(interpreter.interpret(InputEvent::TouchMove { x: 500.0 }), None);

        interpreter.interpret(InputEvent::TouchStart { x: 0.0 });
        interpreter.interpret(InputEvent::TouchEnd);
        assert_eq!(interpreter.interpret(InputEvent::TouchMove { x: 500.0 }), None);
    }

    #[test]
    fn custom_threshold_is_honoured() {
        let mut interpreter = GestureInterpreter::new(10.0);
        assert_eq!(swipe(&mut interpreter, 0.0, &[11.0]), vec![Direction::Forward]);
    }
}

//! Toolkit-free card model: what the card shows, what its buttons do, and the
//! input scope of a mounted card screen.

use shared::domain::Recipe;

use crate::{
    deck::{DeckError, Direction, SwipeDeck},
    gesture::{GestureInterpreter, InputEvent},
    listeners::{ListenerGuard, ListenerKind, ListenerRegistry},
    route::{Route, Router},
};

pub const TRANSITION_OFFSET_PX: f32 = 300.0;

/// Horizontal offsets for the card slide. Cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub enter_from_x: f32,
    pub exit_to_x: f32,
}

impl Transition {
    pub fn from_direction(signum: i8) -> Self {
        Self {
            enter_from_x: if signum > 0 {
                TRANSITION_OFFSET_PX
            } else {
                -TRANSITION_OFFSET_PX
            },
            exit_to_x: if signum < 0 {
                TRANSITION_OFFSET_PX
            } else {
                -TRANSITION_OFFSET_PX
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardModel<'a> {
    pub recipe: &'a Recipe,
    pub position: usize,
    pub total: usize,
    pub transition: Transition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardView<'a> {
    Loading,
    Card(CardModel<'a>),
}

impl<'a> CardView<'a> {
    pub fn from_deck(deck: &'a SwipeDeck) -> Self {
        match (deck.current(), deck.position()) {
            (Some(recipe), Some(position)) => CardView::Card(CardModel {
                recipe,
                position,
                total: deck.len(),
                transition: Transition::from_direction(deck.last_direction_signum()),
            }),
            _ => CardView::Loading,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, CardView::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Save,
    MakeNow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardOutcome {
    Advanced { position: usize },
    Navigate(Route),
}

pub fn apply_card_action(
    deck: &mut SwipeDeck,
    router: &mut Router,
    action: CardAction,
) -> Result<CardOutcome, DeckError> {
    match action {
        // Save shares the skip path and persists nothing.
        CardAction::Save => {
            let position = deck.advance(Direction::Backward)?;
            Ok(CardOutcome::Advanced { position })
        }
        CardAction::MakeNow => {
            let recipe = deck.current().ok_or(DeckError::Empty)?;
            let route = Route::RecipeDetail(recipe.id.clone());
            router.push(route.clone());
            Ok(CardOutcome::Navigate(route))
        }
    }
}

/// A mounted card screen. Keyboard and touch listeners stay registered for as
/// long as the screen lives.
#[derive(Debug)]
pub struct CardScreen {
    interpreter: GestureInterpreter,
    registry: ListenerRegistry,
    listeners: ListenerGuard,
}

impl CardScreen {
    pub fn mount(registry: &ListenerRegistry, threshold_px: f32) -> Self {
        Self {
            interpreter: GestureInterpreter::new(threshold_px),
            registry: registry.clone(),
            listeners: registry.register(&[ListenerKind::Keyboard, ListenerKind::Touch]),
        }
    }

    pub fn listening_to(&self) -> &[ListenerKind] {
        self.listeners.kinds()
    }

    /// Feeds one input event; returns the new position when the deck moved.
    pub fn handle_input(&mut self, deck: &mut SwipeDeck, event: InputEvent) -> Option<usize> {
        let kind = match event {
            InputEvent::Key(_) => ListenerKind::Keyboard,
            _ => ListenerKind::Touch,
        };
        if !self.registry.is_listening(kind) {
            return None;
        }
        let direction = self.interpreter.interpret(event)?;
        match deck.advance(direction) {
            Ok(position) => Some(position),
            Err(err) => {
                tracing::debug!(error = %err, "input ignored");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;

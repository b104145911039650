//! Recipe stack and cyclic navigation over it.

use shared::domain::Recipe;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("no recipes loaded yet")]
    Empty,
}

/// Which way the user swiped. Only selects the transition; both values move
/// the deck forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    pub fn signum(self) -> i8 {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}

/// Accumulated recipes plus the navigation position. Mutated only through
/// [`SwipeDeck::append`] and [`SwipeDeck::advance`].
#[derive(Debug, Default, Clone)]
pub struct SwipeDeck {
    recipes: Vec<Recipe>,
    position: usize,
    last_direction: Option<Direction>,
}

impl SwipeDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends in arrival order. Duplicates are kept.
    pub fn append(&mut self, recipe: Recipe) {
        self.recipes.push(recipe);
    }

    pub fn advance(&mut self, direction: Direction) -> Result<usize, DeckError> {
        if self.recipes.is_empty() {
            return Err(DeckError::Empty);
        }
        self.last_direction = Some(direction);
        self.position = (self.position + 1) % self.recipes.len();
        tracing::debug!(
            position = self.position,
            direction = direction.signum(),
            len = self.recipes.len(),
            "deck advanced"
        );
        Ok(self.position)
    }

    pub fn current(&self) -> Option<&Recipe> {
        self.recipes.get(self.position)
    }

    /// `None` until the first recipe arrives.
    pub fn position(&self) -> Option<usize> {
        (!self.recipes.is_empty()).then_some(self.position)
    }

    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    /// -1, 0 or +1; 0 before the first advance.
    pub fn last_direction_signum(&self) -> i8 {
        self.last_direction.map_or(0, Direction::signum)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }
}

#[cfg(test)]
#[path = "tests/deck_tests.rs"]
mod tests;

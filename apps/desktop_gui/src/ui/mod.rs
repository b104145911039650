//! UI layer for the desktop app: the recipe card deck and the detail route.

pub mod app;

pub use app::RecipeSwipeApp;

//! Controller layer: UI events, input translation, and command orchestration.

pub mod events;
pub mod input;
pub mod orchestration;

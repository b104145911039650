//! Backend-to-UI events and error modeling for the desktop controller.

use shared::domain::{Recipe, RecipeId};

use crate::media::PreviewImage;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    RecipeFetched(Recipe),
    ThumbnailLoaded {
        recipe_id: RecipeId,
        image: PreviewImage,
    },
    ThumbnailFailed {
        recipe_id: RecipeId,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Decode,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Thumbnail,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("malformed")
            || message_lower.contains("decode")
            || message_lower.contains("invalid")
            || message_lower.contains("no recipe")
        {
            UiErrorCategory::Decode
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("dns")
            || message_lower.contains("disconnect")
            || message_lower.contains("http 5")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::Decode => "Data",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

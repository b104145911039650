//! Backend commands queued from UI to backend worker.

use shared::domain::RecipeId;

pub enum BackendCommand {
    FetchThumbnail { recipe_id: RecipeId, url: String },
}

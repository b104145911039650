use std::fmt;

use shared::domain::RecipeId;

const RECIPE_PREFIX: &str = "/recipe/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Deck,
    RecipeDetail(RecipeId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Deck => "/".to_string(),
            Route::RecipeDetail(id) => format!("{RECIPE_PREFIX}{id}"),
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        if path == "/" {
            return Some(Route::Deck);
        }
        let id = path.strip_prefix(RECIPE_PREFIX)?;
        if id.is_empty() || id.contains('/') {
            return None;
        }
        Some(Route::RecipeDetail(RecipeId::from(id)))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// History stack rooted at [`Route::Deck`].
#[derive(Debug, Clone)]
pub struct Router {
    history: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            history: vec![Route::Deck],
        }
    }
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, route: Route) {
        tracing::info!(path = %route, "navigating");
        self.history.push(route);
    }

    /// Pops one entry. The root is never popped.
    pub fn back(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.history.pop();
        true
    }

    pub fn current(&self) -> &Route {
        self.history.last().unwrap_or(&Route::Deck)
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_detail_path_is_prefixed_identifier() {
        let route = Route::RecipeDetail(RecipeId::from("52874"));
        assert_eq!(route.path(), "/recipe/52874");
        assert_eq!(Route::parse("/recipe/52874"), Some(route));
        assert_eq!(Route::parse("/"), Some(Route::Deck));
        assert_eq!(Route::parse("/recipe/"), None);
        assert_eq!(Route::parse("/recipes/1"), None);
    }

    #[test]
    fn back_never_pops_the_root() {
        let mut router = Router::new();
        assert!(!router.back());
        router.push(Route::RecipeDetail(RecipeId::from("1")));
        assert_eq!(router.depth(), 2);
        assert!(router.back());
        assert_eq!(router.current(), &Route::Deck);
    }
}

// ============================================================================
// ROUTES - Pantallas de la app y su representación como path
// ============================================================================

use thiserror::Error;
use url::form_urlencoded;

use crate::models::Recipe;

/// Zona de navegación a la que pertenece una ruta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Unauthenticated,
    Authenticated,
}

/// Pantalla desde la que se abrió el detalle de una receta
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecipeOrigin {
    #[default]
    Generate,
    Favorites,
    History,
}

impl RecipeOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeOrigin::Generate => "generate",
            RecipeOrigin::Favorites => "favorites",
            RecipeOrigin::History => "Historique",
        }
    }

    /// Pestaña a la que vuelve el detalle al cerrarse
    pub fn tab(&self) -> Route {
        match self {
            RecipeOrigin::Generate => Route::Generate,
            RecipeOrigin::Favorites => Route::Favorites,
            RecipeOrigin::History => Route::History,
        }
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "favorites" => RecipeOrigin::Favorites,
            "historique" | "history" => RecipeOrigin::History,
            _ => RecipeOrigin::Generate,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Login,
    Register,
    Generate,
    Favorites,
    History,
    RecipeDetail {
        recipe: Box<Recipe>,
        origin: RecipeOrigin,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Ruta desconocida: {0}")]
    UnknownPath(String),

    #[error("Recette non trouvée")]
    RecipeNotFound,
}

impl Route {
    /// Pantalla por defecto al entrar en la zona autenticada
    pub fn authenticated_root() -> Self {
        Route::Generate
    }

    pub fn unauthenticated_root() -> Self {
        Route::Login
    }

    pub fn recipe_detail(recipe: Recipe, origin: RecipeOrigin) -> Self {
        Route::RecipeDetail {
            recipe: Box::new(recipe),
            origin,
        }
    }

    pub fn area(&self) -> Area {
        match self {
            Route::Login | Route::Register => Area::Unauthenticated,
            _ => Area::Authenticated,
        }
    }

    /// Destino del botón de cierre; `None` significa volver atrás en la pila
    pub fn close_target(&self) -> Option<Route> {
        match self {
            Route::RecipeDetail { origin, .. } => Some(origin.tab()),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Generate => "/(tabs)/generate".to_string(),
            Route::Favorites => "/(tabs)/favorites".to_string(),
            Route::History => "/(tabs)/historique".to_string(),
            Route::RecipeDetail { recipe, origin } => {
                let json = serde_json::to_string(recipe.as_ref()).unwrap_or_default();
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("recipe", &json)
                    .append_pair("origin", origin.as_str())
                    .finish();
                format!("/recipe-detail?{}", query)
            }
        }
    }

    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let (base, query) = path.split_once('?').unwrap_or((path, ""));
        let base = base.trim_end_matches('/');

        match base {
            "/login" | "/(auth)/login" => Ok(Route::Login),
            "/register" | "/(auth)/register" => Ok(Route::Register),
            "/generate" | "/(tabs)/generate" => Ok(Route::Generate),
            "/favorites" | "/(tabs)/favorites" => Ok(Route::Favorites),
            "/historique" | "/(tabs)/historique" => Ok(Route::History),
            "/recipe-detail" | "/modal/recipe-detail" | "/(modal)/recipe-detail" => {
                Self::parse_recipe_detail(query)
            }
            _ => Err(RouteError::UnknownPath(path.to_string())),
        }
    }

    fn parse_recipe_detail(query: &str) -> Result<Self, RouteError> {
        let mut recipe = None;
        let mut origin = RecipeOrigin::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "recipe" => recipe = serde_json::from_str::<Recipe>(&value).ok(),
                "origin" => origin = RecipeOrigin::parse(&value),
                _ => {}
            }
        }

        recipe
            .map(|recipe| Route::recipe_detail(recipe, origin))
            .ok_or(RouteError::RecipeNotFound)
    }
}

// ============================================================================
// RECIPES VIEWMODEL - Generación, favoritos e historial
// ============================================================================
// Devuelve mensajes listos para pantalla; los errores de red nunca tocan
// la sesión.
// ============================================================================

use std::rc::Rc;

use crate::error::ApiError;
use crate::models::{Recipe, RecipeSort};
use crate::services::BackendApi;
use crate::state::RecipeCollection;
use crate::utils::validation::validate_ingredients;
use crate::viewmodels::SessionManager;

const NOT_AUTHENTICATED: &str = "Utilisateur non authentifié";

pub struct RecipesViewModel {
    session: Rc<SessionManager>,
    recipes: Rc<RecipeCollection>,
    api: Rc<dyn BackendApi>,
    num_recipes: u32,
}

impl RecipesViewModel {
    pub fn new(
        session: Rc<SessionManager>,
        recipes: Rc<RecipeCollection>,
        api: Rc<dyn BackendApi>,
        num_recipes: u32,
    ) -> Self {
        Self {
            session,
            recipes,
            api,
            num_recipes,
        }
    }

    /// Genera recetas y las añade a la colección; devuelve cuántas llegaron
    pub async fn generate(&self, ingredients: &str) -> Result<usize, String> {
        let ingredients = validate_ingredients(ingredients).map_err(|e| e.message)?;
        let token = self.token("génération des recettes").await?;

        match self
            .api
            .generate_recipes(&token, ingredients, self.num_recipes)
            .await
        {
            Ok(generated) => {
                let count = generated.len();
                // Cada una se antepone: la última de la respuesta queda primera
                for recipe in generated {
                    self.recipes.add(recipe);
                }
                Ok(count)
            }
            Err(ApiError::InvalidResponse) => {
                log::error!("❌ Respuesta de generación inválida");
                Err(ApiError::InvalidResponse.to_string())
            }
            Err(e) => {
                log::error!("❌ Error generando recetas: {}", e);
                Err(format!(
                    "Erreur lors de la génération des recettes: {}",
                    e.user_message()
                ))
            }
        }
    }

    pub async fn load_favorites(&self, sort: RecipeSort) -> Result<Vec<Recipe>, String> {
        let user_id = self
            .session
            .session()
            .user_id
            .ok_or_else(|| NOT_AUTHENTICATED.to_string())?;
        let token = self.token("récupération des recettes").await?;

        let result = self.api.fetch_favorites(&token, &user_id).await;
        Self::sorted_or_message(result, sort)
    }

    pub async fn load_history(&self, sort: RecipeSort) -> Result<Vec<Recipe>, String> {
        let token = self.token("récupération des recettes").await?;

        let result = self.api.fetch_history(&token).await;
        Self::sorted_or_message(result, sort)
    }

    async fn token(&self, action: &str) -> Result<String, String> {
        match self.session.bearer_token().await {
            Ok(Some(token)) => Ok(token),
            Ok(None) => Err(NOT_AUTHENTICATED.to_string()),
            Err(e) => {
                log::error!("❌ No se pudo leer el token: {}", e);
                Err(format!("Erreur lors de la {}: {}", action, e))
            }
        }
    }

    fn sorted_or_message(
        result: Result<Vec<Recipe>, ApiError>,
        sort: RecipeSort,
    ) -> Result<Vec<Recipe>, String> {
        match result {
            Ok(mut recipes) => {
                sort.sort(&mut recipes);
                Ok(recipes)
            }
            Err(ApiError::InvalidResponse) => {
                Err("Erreur lors de la récupération des recettes.".to_string())
            }
            Err(e) => {
                log::error!("❌ Error obteniendo recetas: {}", e);
                Err(format!(
                    "Erreur lors de la récupération des recettes: {}",
                    e.user_message()
                ))
            }
        }
    }
}

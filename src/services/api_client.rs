// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio: construye requests, valida la forma de la
// respuesta y traduce fallos a `ApiError`. Sin reintentos ni timeouts propios.
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
use std::cell::OnceCell;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{FavoriteRecord, GenerateRequest, Recipe, RegisterRequest, TokenResponse};
use crate::utils::constants::{API_FAVORITES, API_GENERATE_RECIPES, API_HISTORY, API_REGISTER};

/// Operaciones del backend que consumen los view models
#[async_trait(?Send)]
pub trait BackendApi {
    async fn register(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError>;

    async fn generate_recipes(
        &self,
        token: &str,
        ingredients: &str,
        num_recipes: u32,
    ) -> Result<Vec<Recipe>, ApiError>;

    async fn fetch_favorites(&self, token: &str, user_id: &str) -> Result<Vec<Recipe>, ApiError>;

    async fn fetch_history(&self, token: &str) -> Result<Vec<Recipe>, ApiError>;
}

/// Petición ya resuelta, independiente del transporte
#[derive(Debug)]
enum Call<'a> {
    Get {
        path: &'static str,
        query: Vec<(&'static str, &'a str)>,
    },
    Post {
        path: &'static str,
        body: Value,
    },
}

/// Cliente API - SOLO comunicación HTTP (stateless)
///
/// En wasm32 usa `gloo-net` (fetch del navegador); en nativo `reqwest`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    #[cfg(not(target_arch = "wasm32"))]
    http: OnceCell<reqwest::Client>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_base_url(config.backend_url())
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            #[cfg(not(target_arch = "wasm32"))]
            http: OnceCell::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn to_body<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Parse(format!("Serialization error: {}", e)))
}

#[async_trait(?Send)]
impl BackendApi for ApiClient {
    async fn register(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        log::info!("📝 Registrando usuario: {}", email);

        let call = Call::Post {
            path: API_REGISTER,
            body: to_body(&request)?,
        };
        let body = self.execute(call, None).await?;
        serde_json::from_value::<TokenResponse>(body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn generate_recipes(
        &self,
        token: &str,
        ingredients: &str,
        num_recipes: u32,
    ) -> Result<Vec<Recipe>, ApiError> {
        let request = GenerateRequest {
            ingredients: ingredients.to_string(),
            num_recipes,
        };

        log::info!("👩‍🍳 Generando {} recetas", num_recipes);

        let call = Call::Post {
            path: API_GENERATE_RECIPES,
            body: to_body(&request)?,
        };
        let recipes = parse_recipe_list(self.execute(call, Some(token)).await?)?;
        log::info!("✅ {} recetas recibidas", recipes.len());
        Ok(recipes)
    }

    async fn fetch_favorites(&self, token: &str, user_id: &str) -> Result<Vec<Recipe>, ApiError> {
        log::info!("❤️ Obteniendo favoritos del usuario {}", user_id);

        let call = Call::Get {
            path: API_FAVORITES,
            query: vec![("id_user", user_id)],
        };
        parse_favorites(self.execute(call, Some(token)).await?)
    }

    async fn fetch_history(&self, token: &str) -> Result<Vec<Recipe>, ApiError> {
        log::info!("📜 Obteniendo historial de recetas");

        let call = Call::Post {
            path: API_HISTORY,
            body: serde_json::json!({}),
        };
        parse_recipe_list(self.execute(call, Some(token)).await?)
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

fn http_error(status: u16, url: &str, error_text: String) -> ApiError {
    log::error!("❌ HTTP {} desde {}: {}", status, url, error_text);
    ApiError::Http {
        status,
        message: error_text,
    }
}

// ============================================================================
// WEB - fetch del navegador (gloo-net)
// ============================================================================

#[cfg(target_arch = "wasm32")]
impl ApiClient {
    async fn execute(&self, call: Call<'_>, token: Option<&str>) -> Result<Value, ApiError> {
        use gloo_net::http::{Request, RequestBuilder};

        let with_auth = |builder: RequestBuilder| match token {
            Some(token) => builder.header("Authorization", &bearer(token)),
            None => builder,
        };

        let request = match call {
            Call::Get { path, query } => with_auth(Request::get(&self.url(path)).query(query))
                .build()
                .map_err(|e| ApiError::Network(e.to_string()))?,
            Call::Post { path, body } => with_auth(Request::post(&self.url(path)))
                .json(&body)
                .map_err(|e| ApiError::Parse(format!("Serialization error: {}", e)))?,
        };

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(http_error(response.status(), &response.url(), error_text));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

// ============================================================================
// NATIVO - reqwest (requiere un runtime tokio en el host)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl ApiClient {
    fn http(&self) -> Result<&reqwest::Client, ApiError> {
        if let Some(client) = self.http.get() {
            return Ok(client);
        }
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(self.http.get_or_init(|| client))
    }

    async fn execute(&self, call: Call<'_>, token: Option<&str>) -> Result<Value, ApiError> {
        let http = self.http()?;

        let builder = match call {
            Call::Get { path, query } => http.get(self.url(path)).query(&query),
            Call::Post { path, body } => http.post(self.url(path)).json(&body),
        };
        let builder = match token {
            Some(token) => builder.header(reqwest::header::AUTHORIZATION, bearer(token)),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            log::error!("❌ Backend inalcanzable: {}", e);
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let url = response.url().to_string();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(http_error(status.as_u16(), &url, error_text));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// Cualquier cuerpo que no sea un array es una respuesta inválida
pub fn parse_recipe_list(body: Value) -> Result<Vec<Recipe>, ApiError> {
    match body {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value::<Recipe>(item).map_err(|e| ApiError::Parse(e.to_string())))
            .collect(),
        _ => Err(ApiError::InvalidResponse),
    }
}

/// Registros de favoritos convertidos a la forma `Recipe`
pub fn parse_favorites(body: Value) -> Result<Vec<Recipe>, ApiError> {
    match body {
        Value::Array(items) => items
            .into_iter()
            .map(|item| {
                serde_json::from_value::<FavoriteRecord>(item)
                    .map(FavoriteRecord::into_recipe)
                    .map_err(|e| ApiError::Parse(e.to_string()))
            })
            .collect(),
        _ => Err(ApiError::InvalidResponse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base_url_is_normalised() {
        let client = ApiClient::with_base_url("http://localhost:8080/");
        assert_eq!(client.url(API_REGISTER), "http://localhost:8080/api/register");
    }

    #[test]
    fn non_array_bodies_are_invalid() {
        for body in [json!({"error": "quota"}), json!(null), json!("texto")] {
            assert_eq!(parse_recipe_list(body.clone()), Err(ApiError::InvalidResponse));
            assert_eq!(parse_favorites(body), Err(ApiError::InvalidResponse));
        }
    }

    #[test]
    fn recipe_list_keeps_response_order() {
        let body = json!([
            {"id": 1, "title": "Soupe"},
            {"id": 2, "title": "Gratin"}
        ]);
        let recipes = parse_recipe_list(body).unwrap();
        let ids: Vec<_> = recipes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn malformed_item_is_a_parse_error() {
        let body = json!([{"id": 1}]);
        assert!(matches!(parse_recipe_list(body), Err(ApiError::Parse(_))));
    }

    #[test]
    fn favorites_are_mapped_into_recipes() {
        let body = json!([
            {"id_user": 42, "recette": {"id": 7, "recipeName": "Omelette", "totalTime": "10 min"}},
            {"id": "8", "title": "Gratin", "total_time": "1 h"}
        ]);
        let recipes = parse_favorites(body).unwrap();
        assert_eq!(recipes[0].title, "Omelette");
        assert_eq!(recipes[0].total_time.minutes(), Some(10));
        assert_eq!(recipes[1].id, "8");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        // Puerto 9 (discard): conexión rechazada en el host de pruebas
        let client = ApiClient::with_base_url("http://127.0.0.1:9");

        let register = client.register("chef@cuisine.fr", "motdepasse").await;
        assert!(matches!(register, Err(ApiError::Network(_))), "{register:?}");

        let favorites = client.fetch_favorites("a.b.c", "42").await;
        assert!(matches!(favorites, Err(ApiError::Network(_))), "{favorites:?}");
    }

    #[test]
    fn generate_request_wire_shape() {
        let request = GenerateRequest {
            ingredients: "tomate, oignon".to_string(),
            num_recipes: 2,
        };
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({"ingredients": "tomate, oignon", "num_recipes": 2})
        );
    }
}

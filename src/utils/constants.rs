/// Secreto único donde se guarda el token de sesión
pub const STORAGE_KEY_AUTH_TOKEN: &str = "auth_token";

/// Servicio del llavero del sistema (plataformas nativas)
pub const DEFAULT_KEYRING_SERVICE: &str = "recettes-app";

/// Recetas pedidas por generación si no se configura otra cosa
pub const DEFAULT_NUM_RECIPES: u32 = 2;

/// Claim del payload que lleva el identificador de usuario
pub const USER_ID_CLAIM: &str = "id_user";

// Endpoints del backend
pub const API_REGISTER: &str = "/api/register";
pub const API_GENERATE_RECIPES: &str = "/api/chatgpt/recette";
pub const API_FAVORITES: &str = "/api/favoris";
pub const API_HISTORY: &str = "/api/user/chatgpt/recettes";

/// Longitud mínima de contraseña en los formularios
pub const MIN_PASSWORD_LEN: usize = 8;

pub mod auth;
pub mod recipe;
pub mod session;

pub use auth::{RegisterRequest, TokenResponse};
pub use recipe::{CookTime, FavoriteRecord, GenerateRequest, Ingredient, Recipe, RecipeSort, Step};
pub use session::{Session, SessionStatus};

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// RECETA - Forma única para generación, historial y favoritos
// ============================================================================
// El backend usa dos ortografías (snake_case en generación, camelCase en
// favoritos); se aceptan ambas y se serializa siempre en snake_case.
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Si el backend no manda id se genera uno (UUID v4)
    #[serde(default = "new_recipe_id", deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(alias = "recipeName")]
    pub title: String,

    #[serde(default, alias = "totalTime")]
    pub total_time: CookTime,

    #[serde(default, alias = "cookingTime")]
    pub cooking_time: CookTime,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(alias = "ingredient")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(alias = "stepNumber")]
    pub number: u32,
    #[serde(default)]
    pub time: CookTime,
    pub description: String,
}

impl Recipe {
    /// Nombres de ingredientes separados por comas (tarjetas de lista)
    pub fn ingredient_summary(&self) -> String {
        self.ingredients
            .iter()
            .map(|i| i.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn new_recipe_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ============================================================================
// DURACIÓN - Texto libre del backend ("30 min", "1 h 30")
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CookTime(String);

impl CookTime {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Minutos totales; `None` si el texto no contiene ningún número
    pub fn minutes(&self) -> Option<u32> {
        let text = self.0.to_lowercase();
        let mut chars = text.chars().peekable();
        let mut total: u32 = 0;
        let mut found = false;

        while let Some(&c) = chars.peek() {
            if !c.is_ascii_digit() {
                chars.next();
                continue;
            }

            let mut value: u32 = 0;
            while let Some(digit) = chars.peek().and_then(|d| d.to_digit(10)) {
                value = value.saturating_mul(10).saturating_add(digit);
                chars.next();
            }
            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }
            let mut unit = String::new();
            while let Some(&l) = chars.peek().filter(|l| l.is_alphabetic()) {
                unit.push(l);
                chars.next();
            }

            let minutes = match unit.chars().next() {
                Some('h') => value.saturating_mul(60),
                _ => value,
            };
            total = total.saturating_add(minutes);
            found = true;
        }

        found.then_some(total)
    }
}

impl fmt::Display for CookTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CookTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        string_or_number(deserializer).map(CookTime)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}

// ============================================================================
// ORDEN - Criterios de las pantallas de favoritos / historial
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecipeSort {
    #[default]
    Name,
    TotalTime,
    CookingTime,
}

impl RecipeSort {
    /// Ordena de forma estable; las duraciones desconocidas van al final
    pub fn sort(self, recipes: &mut [Recipe]) {
        match self {
            RecipeSort::Name => {
                recipes.sort_by_cached_key(|r| r.title.to_lowercase());
            }
            RecipeSort::TotalTime => {
                recipes.sort_by(|a, b| compare_minutes(&a.total_time, &b.total_time));
            }
            RecipeSort::CookingTime => {
                recipes.sort_by(|a, b| compare_minutes(&a.cooking_time, &b.cooking_time));
            }
        }
    }
}

fn compare_minutes(a: &CookTime, b: &CookTime) -> Ordering {
    match (a.minutes(), b.minutes()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ============================================================================
// WIRE - Peticiones / registros del backend
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub ingredients: String,
    pub num_recipes: u32,
}

/// Registro de favorito: la receta puede venir anidada o plana
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FavoriteRecord {
    Nested {
        #[serde(alias = "recipe")]
        recette: Recipe,
    },
    Flat(Recipe),
}

impl FavoriteRecord {
    pub fn into_recipe(self) -> Recipe {
        match self {
            FavoriteRecord::Nested { recette } => recette,
            FavoriteRecord::Flat(recipe) => recipe,
        }
    }
}

// ============================================================================
// BINDINGS - Puente WASM hacia la capa de pantallas (JavaScript)
// ============================================================================
// Solo se compila para wasm32. Las pantallas consultan y mutan el estado a
// través de estas funciones; todo viaja como JSON.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Promise};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

use crate::config::CONFIG;
use crate::models::{Recipe, RecipeSort};
use crate::navigation::{PathNavigator, Route};
use crate::state::AppState;
use crate::utils::Platform;

thread_local! {
    static APP: RefCell<Option<AppState>> = RefCell::new(None);
}

fn app() -> Result<AppState, JsValue> {
    APP.with(|cell| cell.borrow().clone())
        .ok_or_else(|| JsValue::from_str("App no inicializada"))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_json::to_string(value)
        .map(|json| JsValue::from_str(&json))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_sort(sort: Option<String>) -> RecipeSort {
    match sort.as_deref() {
        Some("totalTime") => RecipeSort::TotalTime,
        Some("cookingTime") => RecipeSort::CookingTime,
        _ => RecipeSort::Name,
    }
}

/// Llama a `callback` con el snapshot en JSON; los fallos de JS solo se registran
fn deliver<T: serde::Serialize>(callback: &Function, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&e.to_string()))
        .and_then(|json| callback.call1(&JsValue::NULL, &JsValue::from_str(&json)));
    if let Err(e) = result {
        log::error!("❌ Error notificando a la pantalla: {:?}", e);
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if CONFIG.is_logging_enabled() {
        wasm_logger::init(wasm_logger::Config::default());
    }
    log::info!("🚀 Recettes App - plataforma {}", Platform::detect());

    let state = AppState::for_platform(Platform::detect(), &CONFIG)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    APP.with(|cell| *cell.borrow_mut() = Some(state.clone()));

    spawn_local(async move {
        let session = state.start().await;
        log::info!("✅ Sesión inicial: {:?}", session.status());
    });

    Ok(())
}

/// Snapshot actual de la sesión en JSON
#[wasm_bindgen]
pub fn session() -> Result<JsValue, JsValue> {
    to_json(&app()?.current_session())
}

#[wasm_bindgen]
pub fn login(token: String) -> Promise {
    future_to_promise(async move {
        let session = app()?
            .auth
            .login_with_token(&token)
            .await
            .map_err(|e| JsValue::from_str(&e))?;
        to_json(&session)
    })
}

#[wasm_bindgen]
pub fn logout() -> Promise {
    future_to_promise(async move {
        let session = app()?.auth.logout().await;
        to_json(&session)
    })
}

/// Recetas generadas, la más reciente primero
#[wasm_bindgen]
pub fn recipes(sort: Option<String>) -> Result<JsValue, JsValue> {
    let app = app()?;
    match sort {
        Some(_) => to_json(&app.recipes.sorted(parse_sort(sort))),
        None => to_json(&app.recipes.list()),
    }
}

#[wasm_bindgen]
pub fn clear_recipes() -> Result<(), JsValue> {
    app()?.recipes.clear();
    Ok(())
}

#[wasm_bindgen]
pub fn generate_recipes(ingredients: String) -> Promise {
    future_to_promise(async move {
        let count = app()?
            .recipe_actions
            .generate(&ingredients)
            .await
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(JsValue::from_f64(count as f64))
    })
}

#[wasm_bindgen]
pub fn favorites(sort: Option<String>) -> Promise {
    future_to_promise(async move {
        let list = app()?
            .recipe_actions
            .load_favorites(parse_sort(sort))
            .await
            .map_err(|e| JsValue::from_str(&e))?;
        to_json(&list)
    })
}

#[wasm_bindgen]
pub fn history(sort: Option<String>) -> Promise {
    future_to_promise(async move {
        let list = app()?
            .recipe_actions
            .load_history(parse_sort(sort))
            .await
            .map_err(|e| JsValue::from_str(&e))?;
        to_json(&list)
    })
}

/// Conecta el router de las pantallas: `current() -> string | null`,
/// `replace(path)` y `showLoading()`
#[wasm_bindgen]
pub fn attach_navigator(
    current: Function,
    replace: Function,
    show_loading: Function,
) -> Result<(), JsValue> {
    let navigator = PathNavigator::new(
        move || current.call0(&JsValue::NULL).ok().and_then(|v| v.as_string()),
        move |path| {
            if let Err(e) = replace.call1(&JsValue::NULL, &JsValue::from_str(path)) {
                log::error!("❌ Error navegando a {}: {:?}", path, e);
            }
        },
        move || {
            if let Err(e) = show_loading.call0(&JsValue::NULL) {
                log::error!("❌ Error mostrando la carga: {:?}", e);
            }
        },
    );
    app()?.attach_navigator(Rc::new(navigator));
    Ok(())
}

/// Suscribe `callback(sessionJson)`; devuelve la función que cancela la suscripción
#[wasm_bindgen]
pub fn subscribe_session(callback: Function) -> Result<JsValue, JsValue> {
    let state = app()?.session_state();
    let id = state.subscribe(move |session| deliver(&callback, session));
    Ok(Closure::once_into_js(move || {
        state.unsubscribe(id);
    }))
}

/// Suscribe `callback(recipesJson)`; devuelve la función que cancela la suscripción
#[wasm_bindgen]
pub fn subscribe_recipes(callback: Function) -> Result<JsValue, JsValue> {
    let recipes = app()?.recipes;
    let id = recipes.subscribe(move |list| deliver(&callback, list));
    Ok(Closure::once_into_js(move || {
        recipes.unsubscribe(id);
    }))
}

#[wasm_bindgen]
pub fn add_recipe(recipe_json: String) -> Result<(), JsValue> {
    let recipe: Recipe = serde_json::from_str(&recipe_json)
        .map_err(|e| JsValue::from_str(&format!("Recette invalide: {}", e)))?;
    app()?.recipes.add(recipe);
    Ok(())
}

/// Path al que vuelve el detalle al cerrarse; `undefined` = volver atrás
#[wasm_bindgen]
pub fn recipe_close_path(path: String) -> Result<Option<String>, JsValue> {
    let route = Route::parse(&path).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(route.close_target().map(|target| target.path()))
}

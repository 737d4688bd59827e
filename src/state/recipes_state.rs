// ============================================================================
// RECIPES STATE - Colección en memoria de recetas generadas / favoritas
// ============================================================================
// La más reciente primero. Sin deduplicar por id y sin persistencia:
// se pierde al reiniciar el proceso.
// ============================================================================

use crate::models::{Recipe, RecipeSort};
use crate::state::reactivity::{ReactiveState, SubscriptionId};

pub struct RecipeCollection {
    recipes: ReactiveState<Vec<Recipe>>,
}

impl RecipeCollection {
    pub fn new() -> Self {
        Self {
            recipes: ReactiveState::new(Vec::new()),
        }
    }

    /// Inserta al principio de la colección
    pub fn add(&self, recipe: Recipe) {
        log::info!("🍽️ Receta añadida: {} ({})", recipe.title, recipe.id);
        self.recipes.update(|recipes| recipes.insert(0, recipe));
    }

    pub fn clear(&self) {
        log::info!("🗑️ Colección de recetas vaciada");
        self.recipes.set(Vec::new());
    }

    /// Copia ordenada tal como está guardada (más reciente primero)
    pub fn list(&self) -> Vec<Recipe> {
        self.recipes.get()
    }

    /// Copia ordenada por el criterio dado; no altera el orden guardado
    pub fn sorted(&self, sort: RecipeSort) -> Vec<Recipe> {
        let mut recipes = self.list();
        sort.sort(&mut recipes);
        recipes
    }

    pub fn find(&self, id: &str) -> Option<Recipe> {
        self.recipes
            .with(|recipes| recipes.iter().find(|r| r.id == id).cloned())
    }

    pub fn len(&self) -> usize {
        self.recipes.with(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Vec<Recipe>) + 'static,
    {
        self.recipes.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.recipes.unsubscribe(id)
    }
}

impl Default for RecipeCollection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recipe::fixtures::recipe;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn add_prepends() {
        let store = RecipeCollection::new();
        store.add(recipe("1", "Soupe", "30 min", "20 min"));
        store.add(recipe("2", "Omelette", "10 min", "5 min"));

        let list = store.list();
        assert_eq!(list[0].id, "2");
        assert_eq!(list[1].id, "1");
    }

    #[test]
    fn clear_empties() {
        let store = RecipeCollection::new();
        store.add(recipe("1", "Soupe", "30 min", "20 min"));
        store.clear();
        assert!(store.list().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn duplicate_ids_coexist() {
        let store = RecipeCollection::new();
        store.add(recipe("1", "Soupe", "30 min", "20 min"));
        store.add(recipe("1", "Soupe bis", "30 min", "20 min"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.find("1").unwrap().title, "Soupe bis");
    }

    #[test]
    fn sorted_view_leaves_storage_order() {
        let store = RecipeCollection::new();
        store.add(recipe("a", "Zucchini", "30 min", "20 min"));
        store.add(recipe("b", "Artichaut", "10 min", "5 min"));
        store.add(recipe("c", "Moules", "45 min", "25 min"));

        let by_name: Vec<_> = store.sorted(RecipeSort::Name).into_iter().map(|r| r.id).collect();
        assert_eq!(by_name, ["b", "c", "a"]);
        let stored: Vec<_> = store.list().into_iter().map(|r| r.id).collect();
        assert_eq!(stored, ["c", "b", "a"]);
    }

    #[test]
    fn subscribers_see_every_mutation() {
        let store = RecipeCollection::new();
        let notified = Rc::new(Cell::new(0));
        let counter = notified.clone();
        store.subscribe(move |_| counter.set(counter.get() + 1));

        store.add(recipe("1", "Soupe", "30 min", "20 min"));
        store.clear();

        assert_eq!(notified.get(), 3);
    }
}

// ============================================================================
// PATH NAVIGATOR - Navegador basado en paths de texto
// ============================================================================
// Adapta un router externo que solo entiende strings ("/login",
// "/(tabs)/generate") al trait `Navigator`.
// ============================================================================

use crate::navigation::guard::Navigator;
use crate::navigation::routes::Route;

type CurrentPath = Box<dyn Fn() -> Option<String>>;
type ReplacePath = Box<dyn Fn(&str)>;
type ShowLoading = Box<dyn Fn()>;

pub struct PathNavigator {
    current: CurrentPath,
    replace: ReplacePath,
    show_loading: ShowLoading,
}

impl PathNavigator {
    pub fn new(
        current: impl Fn() -> Option<String> + 'static,
        replace: impl Fn(&str) + 'static,
        show_loading: impl Fn() + 'static,
    ) -> Self {
        Self {
            current: Box::new(current),
            replace: Box::new(replace),
            show_loading: Box::new(show_loading),
        }
    }
}

impl Navigator for PathNavigator {
    fn current_route(&self) -> Option<Route> {
        let path = (self.current)()?;
        match Route::parse(&path) {
            Ok(route) => Some(route),
            Err(e) => {
                log::debug!("🧭 Path fuera de las pantallas conocidas: {}", e);
                None
            }
        }
    }

    fn replace(&self, route: Route) {
        (self.replace)(&route.path());
    }

    fn show_loading(&self) {
        (self.show_loading)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn unknown_paths_have_no_route() {
        let nav = PathNavigator::new(|| Some("/".to_string()), |_| {}, || {});
        assert_eq!(nav.current_route(), None);

        let nav = PathNavigator::new(|| Some("/(tabs)/favorites".to_string()), |_| {}, || {});
        assert_eq!(nav.current_route(), Some(Route::Favorites));

        let nav = PathNavigator::new(|| None, |_| {}, || {});
        assert_eq!(nav.current_route(), None);
    }

    #[test]
    fn replace_and_loading_reach_the_router() {
        let replaced = Rc::new(RefCell::new(Vec::new()));
        let loading = Rc::new(Cell::new(0));
        let (sink, counter) = (replaced.clone(), loading.clone());
        let nav = PathNavigator::new(
            || None,
            move |path| sink.borrow_mut().push(path.to_string()),
            move || counter.set(counter.get() + 1),
        );

        nav.show_loading();
        nav.replace(Route::Login);
        nav.replace(Route::History);

        assert_eq!(loading.get(), 1);
        assert_eq!(*replaced.borrow(), ["/login", "/(tabs)/historique"]);
    }
}

// ============================================================================
// ROUTE GUARD - Redirección entre zona pública y zona autenticada
// ============================================================================
// Reacción pura al estado de sesión; solo recuerda el último snapshot.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::models::{Session, SessionStatus};
use crate::navigation::routes::{Area, Route};
use crate::state::{SessionState, SubscriptionId};

/// Navegador de la capa de pantallas (colaborador externo)
pub trait Navigator {
    /// `None` si la ruta actual no es ninguna pantalla conocida (p. ej. `/`)
    fn current_route(&self) -> Option<Route>;

    /// Sustituye la pantalla actual sin apilarla
    fn replace(&self, route: Route);

    /// Indicador neutro mientras la sesión carga
    fn show_loading(&self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuardAction {
    ShowLoading,
    Redirect(Route),
    Stay,
}

/// Decide qué hacer ante un nuevo snapshot de sesión
pub fn decide(last: Option<&Session>, next: &Session, current: Option<&Route>) -> GuardAction {
    if last == Some(next) {
        return GuardAction::Stay;
    }

    let required = match next.status() {
        SessionStatus::Loading => return GuardAction::ShowLoading,
        SessionStatus::Unauthenticated => Area::Unauthenticated,
        SessionStatus::Authenticated => Area::Authenticated,
    };

    match current {
        Some(route) if route.area() == required => GuardAction::Stay,
        _ => match required {
            Area::Unauthenticated => GuardAction::Redirect(Route::unauthenticated_root()),
            Area::Authenticated => GuardAction::Redirect(Route::authenticated_root()),
        },
    }
}

pub struct RouteGuard {
    navigator: Rc<dyn Navigator>,
    last: RefCell<Option<Session>>,
    state: RefCell<Weak<SessionState>>,
    subscription: Cell<Option<SubscriptionId>>,
}

impl RouteGuard {
    pub fn new(navigator: Rc<dyn Navigator>) -> Rc<Self> {
        Rc::new(Self {
            navigator,
            last: RefCell::new(None),
            state: RefCell::new(Weak::new()),
            subscription: Cell::new(None),
        })
    }

    /// Se suscribe a la sesión; reacciona de inmediato al snapshot actual
    pub fn attach(self: &Rc<Self>, state: &Rc<SessionState>) {
        self.detach();
        *self.state.borrow_mut() = Rc::downgrade(state);

        let guard: Weak<Self> = Rc::downgrade(self);
        let id = state.subscribe(move |session| {
            if let Some(guard) = guard.upgrade() {
                guard.on_session(session);
            }
        });
        self.subscription.set(Some(id));
    }

    /// Quita la suscripción actual, si la hay
    pub fn detach(&self) {
        let state = std::mem::take(&mut *self.state.borrow_mut());
        if let (Some(id), Some(state)) = (self.subscription.take(), state.upgrade()) {
            state.unsubscribe(id);
        }
    }

    pub fn last_session(&self) -> Option<Session> {
        self.last.borrow().clone()
    }

    pub fn on_session(&self, session: &Session) -> GuardAction {
        let current = self.navigator.current_route();
        let action = decide(self.last.borrow().as_ref(), session, current.as_ref());
        *self.last.borrow_mut() = Some(session.clone());

        match &action {
            GuardAction::ShowLoading => self.navigator.show_loading(),
            GuardAction::Redirect(route) => {
                log::info!("🧭 Redirigiendo a {}", route.path());
                self.navigator.replace(route.clone());
            }
            GuardAction::Stay => {}
        }
        action
    }
}

impl Drop for RouteGuard {
    fn drop(&mut self) {
        self.detach();
    }
}

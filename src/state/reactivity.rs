// ============================================================================
// REACTIVITY - Publicación de snapshots a suscriptores
// ============================================================================
// Un solo hilo de UI: la notificación es síncrona, dentro del mismo turno
// que produjo el cambio.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

/// Identificador devuelto por `subscribe`, usado para desuscribirse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Estado reactivo con sistema de notificaciones
pub struct ReactiveState<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<(SubscriptionId, Callback<T>)>>,
    next_id: Cell<u64>,
}

impl<T: Clone> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Snapshot del valor actual
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Acceso de solo lectura sin clonar
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.value.borrow())
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar valor usando closure y notificar
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut self.value.borrow_mut());
        self.notify();
    }

    /// Suscribirse a cambios. El callback recibe el snapshot actual de inmediato
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let callback: Callback<T> = Rc::new(callback);
        self.subscribers.borrow_mut().push((id, callback.clone()));

        let snapshot = self.get();
        callback(&snapshot);
        id
    }

    /// Devuelve `false` si el id ya no estaba suscrito
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn notify(&self) {
        // Copia de la lista: un callback puede suscribir o desuscribir
        let callbacks: Vec<Callback<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        let snapshot = self.get();
        for callback in callbacks {
            callback(&snapshot);
        }
    }
}

impl<T: Clone + Default> Default for ReactiveState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

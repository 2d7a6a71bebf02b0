// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback<E> = Rc<dyn Fn(&E)>;

/// Identificador devuelto por `subscribe`, sirve para desuscribirse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Lista de subscribers que reciben cada evento emitido
pub struct Subscribers<E> {
    next_id: Cell<u64>,
    callbacks: RefCell<Vec<(SubscriptionId, Callback<E>)>>,
}

impl<E> Subscribers<E> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            callbacks: RefCell::new(Vec::new()),
        }
    }

    /// Suscribirse a eventos
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&E) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.callbacks.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// Devuelve false si el id no estaba suscrito
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut callbacks = self.callbacks.borrow_mut();
        let before = callbacks.len();
        callbacks.retain(|(sub_id, _)| *sub_id != id);
        callbacks.len() != before
    }

    pub fn len(&self) -> usize {
        self.callbacks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.borrow().is_empty()
    }

    /// Notificar a todos los subscribers.
    ///
    /// La lista se copia antes de despachar, así un callback puede
    /// suscribirse o desuscribirse sin un borrow re-entrante.
    pub fn notify(&self, event: &E) {
        let callbacks: Vec<Callback<E>> = self
            .callbacks
            .borrow()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in callbacks {
            callback(event);
        }
    }
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_reaches_every_subscriber_in_order() {
        let subscribers = Subscribers::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in ["a", "b"] {
            let seen = seen.clone();
            subscribers.subscribe(move |value: &u32| seen.borrow_mut().push(format!("{tag}{value}")));
        }
        subscribers.notify(&7);

        assert_eq!(*seen.borrow(), vec!["a7".to_string(), "b7".to_string()]);
    }

    #[test]
    fn unsubscribed_callback_is_not_called() {
        let subscribers = Subscribers::<()>::new();
        let calls = Rc::new(Cell::new(0));

        let id = {
            let calls = calls.clone();
            subscribers.subscribe(move |_| calls.set(calls.get() + 1))
        };
        assert!(subscribers.unsubscribe(id));
        assert!(!subscribers.unsubscribe(id));

        subscribers.notify(&());
        assert_eq!(calls.get(), 0);
        assert!(subscribers.is_empty());
    }

    #[test]
    fn callback_may_unsubscribe_itself_during_notify() {
        let subscribers = Rc::new(Subscribers::<()>::new());
        let own_id = Rc::new(Cell::new(None));

        let id = {
            let handle = subscribers.clone();
            let own_id = own_id.clone();
            subscribers.subscribe(move |_| {
                if let Some(id) = own_id.get() {
                    handle.unsubscribe(id);
                }
            })
        };
        own_id.set(Some(id));

        subscribers.notify(&());
        assert_eq!(subscribers.len(), 0);
    }
}

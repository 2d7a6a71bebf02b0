// ============================================================================
// SESSION CONTEXT - Compartir el SessionStore entre componentes
// ============================================================================

use std::rc::Rc;

use crate::error::SessionError;
use crate::state::SessionStore;

/// Handle al store de sesión, inyectado explícitamente.
///
/// Un contexto vacío significa "no hay provider por encima"; pedirle el
/// store es un error de cableado y devuelve `MissingProvider`.
#[derive(Clone, Default)]
pub struct SessionContext {
    store: Option<Rc<SessionStore>>,
}

impl SessionContext {
    pub fn provide(store: Rc<SessionStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_provided(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Result<Rc<SessionStore>, SessionError> {
        self.store.clone().ok_or_else(|| {
            log::error!("❌ Session accessor used outside of a SessionProvider");
            SessionError::MissingProvider
        })
    }
}

impl From<SessionStore> for SessionContext {
    fn from(store: SessionStore) -> Self {
        Self::provide(Rc::new(store))
    }
}

// Same store instance means same context.
impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        match (&self.store, &other.store) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::utils::storage::MemoryStorage;

    fn store() -> SessionStore {
        SessionStore::with_config(MemoryStorage::new(), SessionConfig::default())
    }

    #[test]
    fn empty_context_fails_fast() {
        let context = SessionContext::empty();
        assert!(!context.is_provided());
        assert!(matches!(context.store(), Err(SessionError::MissingProvider)));
    }

    #[test]
    fn provided_context_hands_out_the_same_store() {
        let context = SessionContext::from(store());
        let a = context.store().unwrap();
        let b = context.clone().store().unwrap();
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn contexts_compare_by_store_identity() {
        let shared = Rc::new(store());
        assert!(SessionContext::provide(shared.clone()) == SessionContext::provide(shared));
        assert!(SessionContext::from(store()) != SessionContext::from(store()));
        assert!(SessionContext::empty() == SessionContext::empty());
    }
}

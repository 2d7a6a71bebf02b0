// ============================================================================
// USE SESSION HOOK - Provider + hook de Yew sobre SessionStore
// ============================================================================
// El provider recibe un SessionStore ya construido (inyectado por la app);
// el hook lo recupera del contexto y re-renderiza en cada evento.
// ============================================================================

use std::rc::Rc;

use yew::prelude::*;

use crate::context::SessionContext;
use crate::state::SessionStore;

#[derive(Properties)]
pub struct SessionProviderProps {
    pub store: Rc<SessionStore>,
    pub children: Children,
}

impl PartialEq for SessionProviderProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store) && self.children == other.children
    }
}

/// Provider component que envuelve la app y proporciona el SessionStore
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let context = SessionContext::provide(props.store.clone());

    html! {
        <ContextProvider<SessionContext> context={context}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}

/// Devuelve el store del `SessionProvider` más cercano y re-renderiza el
/// componente en cada evento de sesión.
///
/// # Panics
///
/// Hace panic si no hay ningún `SessionProvider` por encima del componente.
#[hook]
pub fn use_session() -> Rc<SessionStore> {
    let context = use_context::<SessionContext>().unwrap_or_default();
    let store = match context.store() {
        Ok(store) => store,
        Err(e) => panic!("use_session must be used within SessionProvider: {}", e),
    };

    let force_update = use_force_update();
    {
        let store = store.clone();
        use_effect_with(context, move |_| {
            let id = store.subscribe(move |_| force_update.force_update());
            move || {
                store.unsubscribe(id);
            }
        });
    }

    store
}

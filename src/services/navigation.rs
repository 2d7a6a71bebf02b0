// ============================================================================
// NAVIGATION - Redirección al login cuando termina la sesión
// ============================================================================

use crate::models::session::SessionEvent;
use crate::state::{SessionStore, SubscriptionId};

/// Capacidad de llevar la UI a otra ruta
pub trait Navigator {
    fn navigate(&self, route: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate(&self, route: &str) {
        self(route)
    }
}

/// Listener que convierte `SessionEvent::SessionEnded` en una navegación
/// a la ruta de login configurada.
pub struct LoginRedirect;

impl LoginRedirect {
    pub fn attach(store: &SessionStore, navigator: impl Navigator + 'static) -> SubscriptionId {
        let route = store.config().login_route.clone();
        store.subscribe(move |event| {
            if *event == SessionEvent::SessionEnded {
                log::info!("🔄 Session ended, redirecting to {}", route);
                navigator.navigate(&route);
            }
        })
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::web::WindowNavigator;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::Navigator;
    use wasm_bindgen::JsValue;
    use web_sys::{window, CustomEvent};

    /// Añade la ruta al historial del navegador y lanza el evento `loggedOut`
    /// sobre `window` para que la app se re-renderice.
    #[derive(Clone, Copy, Default, Debug)]
    pub struct WindowNavigator;

    impl Navigator for WindowNavigator {
        fn navigate(&self, route: &str) {
            let Some(win) = window() else {
                log::warn!("⚠️ No window available for navigation");
                return;
            };

            let pushed = win
                .history()
                .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(route)));
            if let Err(e) = pushed {
                log::error!("❌ Error navigating to {}: {:?}", route, e);
                if let Err(e) = win.location().set_href(route) {
                    log::error!("❌ Error setting location to {}: {:?}", route, e);
                }
                return;
            }

            match CustomEvent::new("loggedOut") {
                Ok(event) => {
                    if let Err(e) = win.dispatch_event(&event) {
                        log::error!("❌ Error dispatching loggedOut event: {:?}", e);
                    }
                }
                Err(e) => log::error!("❌ Error creating loggedOut event: {:?}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::utils::storage::MemoryStorage;
    use serde_json::Map;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn redirects_only_when_session_ends() {
        let store = SessionStore::with_config(MemoryStorage::new(), SessionConfig::default());
        let routes = Rc::new(RefCell::new(Vec::<String>::new()));
        {
            let routes = routes.clone();
            LoginRedirect::attach(&store, move |route: &str| routes.borrow_mut().push(route.to_string()));
        }

        store.login(Map::new(), "t").unwrap();
        store.set_profile_complete(true).unwrap();
        assert!(routes.borrow().is_empty());

        store.logout().unwrap();
        assert_eq!(*routes.borrow(), vec!["/login".to_string()]);
    }

    #[test]
    fn detached_redirect_stops_navigating() {
        let store = SessionStore::with_config(MemoryStorage::new(), SessionConfig::default());
        let calls = Rc::new(RefCell::new(0));
        let id = {
            let calls = calls.clone();
            LoginRedirect::attach(&store, move |_: &str| *calls.borrow_mut() += 1)
        };

        assert!(store.unsubscribe(id));
        store.logout().unwrap();
        assert_eq!(*calls.borrow(), 0);
    }
}

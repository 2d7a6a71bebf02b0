pub mod navigation;

pub use navigation::{LoginRedirect, Navigator};
#[cfg(target_arch = "wasm32")]
pub use navigation::WindowNavigator;

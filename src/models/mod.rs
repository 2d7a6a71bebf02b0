pub mod session;

pub use session::{SessionEvent, SessionState, UserRecord};

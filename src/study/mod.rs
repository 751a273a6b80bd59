//! Overlay orchestration for a study session.

mod overlay;
mod session;

pub use overlay::{Overlay, INACTIVITY_REMINDER};
pub use session::StudySession;

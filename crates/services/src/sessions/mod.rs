mod controller;
mod progress;
mod store;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::{CommandOutcome, QuizCommand, QuizController};
pub use progress::{DisplayState, SessionProgress};
pub use store::{InitOutcome, LoadPhase, SessionStore};

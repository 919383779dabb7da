mod quiz;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use quiz::{QuizInput, QuizView};
pub use state::{view_state_from_resource, ViewError, ViewState};

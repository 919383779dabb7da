use std::sync::Arc;

use services::{MediaPlayer, QuizController};
use tokio::sync::Mutex;

/// The quiz controller as shared between the composition root and the views.
pub type SharedQuiz = Arc<Mutex<QuizController<Box<dyn MediaPlayer>>>>;

pub trait UiApp: Send + Sync {
    fn quiz(&self) -> SharedQuiz;

    /// Human-readable catalog origin, shown in the footer.
    fn catalog_label(&self) -> String;
}

#[derive(Clone)]
pub struct AppContext {
    quiz: SharedQuiz,
    catalog_label: String,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz: app.quiz(),
            catalog_label: app.catalog_label(),
        }
    }

    #[must_use]
    pub fn quiz(&self) -> SharedQuiz {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn catalog_label(&self) -> &str {
        &self.catalog_label
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

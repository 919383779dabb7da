pub mod app;
pub mod context;
pub mod player;
pub mod vm;
pub mod views;

pub use app::App;
pub use context::{AppContext, SharedQuiz, UiApp, build_app_context};
pub use player::DomMediaPlayer;

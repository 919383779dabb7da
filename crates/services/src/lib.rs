#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod media;
pub mod sessions;

pub use catalog::{CatalogLoader, CatalogSource, CsvCatalogLoader, StaticCatalogLoader};
pub use error::{CatalogError, SessionError};
pub use media::{MediaControls, MediaEvent, MediaPlayer, NullMediaPlayer};

pub use sessions::{
    CommandOutcome, DisplayState, InitOutcome, LoadPhase, QuizCommand, QuizController,
    SessionProgress, SessionStore,
};

use quiz_core::model::Track;

use super::progress::{DisplayState, SessionProgress};
use super::store::{InitOutcome, SessionStore};
use crate::media::{MediaControls, MediaEvent, MediaPlayer};

/// Commands the presentation shell may issue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuizCommand {
    StartNewSession,
    Reveal,
    Advance,
    SetPlaying(bool),
    SetVolume(f32),
    RetryLoad,
}

/// Whether a command changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Ignored,
}

impl CommandOutcome {
    fn from_applied(applied: bool) -> Self {
        if applied { Self::Applied } else { Self::Ignored }
    }
}

/// Command surface over the session store and the media player.
///
/// Enforces the shell-level preconditions: reveal needs a current card,
/// advance needs the current card to be revealed, a new session needs a
/// loaded catalog.
pub struct QuizController<P> {
    store: SessionStore,
    media: MediaControls<P>,
}

impl<P: MediaPlayer> QuizController<P> {
    #[must_use]
    pub fn new(store: SessionStore, player: P) -> Self {
        Self {
            store,
            media: MediaControls::new(player),
        }
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    #[must_use]
    pub fn media(&self) -> &MediaControls<P> {
        &self.media
    }

    #[must_use]
    pub fn current_track(&self) -> Option<&Track> {
        self.store.current_track()
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.store.is_revealed()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        self.store.progress()
    }

    #[must_use]
    pub fn display_state(&self) -> DisplayState {
        self.store.display_state()
    }

    /// Run the store's one-shot startup and cue the first card.
    pub async fn initialize(&mut self) -> InitOutcome {
        let first_run = !self.store.is_initialized();
        let outcome = self.store.initialize().await;
        if first_run {
            self.media.load(self.store.current_track());
        }
        outcome
    }

    pub async fn dispatch(&mut self, command: QuizCommand) -> CommandOutcome {
        log::debug!("dispatch {command:?}");
        match command {
            QuizCommand::StartNewSession => {
                let applied = self.store.start_new_session().await;
                if applied {
                    self.media.load(self.store.current_track());
                }
                CommandOutcome::from_applied(applied)
            }
            QuizCommand::Reveal => CommandOutcome::from_applied(self.store.reveal()),
            QuizCommand::Advance => {
                if !self.store.is_revealed() || self.store.current_track().is_none() {
                    return CommandOutcome::Ignored;
                }
                let before = self.store.state().index();
                let applied = self.store.advance().await;
                if applied && self.store.state().index() != before {
                    self.media.load(self.store.current_track());
                }
                CommandOutcome::from_applied(applied)
            }
            QuizCommand::SetPlaying(playing) => {
                self.media.set_playing(playing);
                CommandOutcome::Applied
            }
            QuizCommand::SetVolume(volume) => {
                CommandOutcome::from_applied(self.media.set_volume(volume))
            }
            QuizCommand::RetryLoad => {
                let applied = self.store.retry_load().await.unwrap_or(false);
                if applied {
                    self.media.load(self.store.current_track());
                }
                CommandOutcome::from_applied(applied)
            }
        }
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        self.media.handle_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::catalog::StaticCatalogLoader;
    use crate::media::NullMediaPlayer;
    use quiz_core::model::RawRow;
    use storage::repository::Storage;

    fn controller(n: usize) -> QuizController<NullMediaPlayer> {
        let rows = (1..=n)
            .map(|i| RawRow::new().with("URL", format!("https://example.com/{i}.mp4")))
            .collect();
        let store = SessionStore::new(
            Storage::in_memory().sessions,
            Arc::new(StaticCatalogLoader::new(rows)),
        )
        .with_rng(StdRng::seed_from_u64(2));
        QuizController::new(store, NullMediaPlayer)
    }

    #[tokio::test]
    async fn advance_requires_reveal() {
        let mut quiz = controller(3);
        quiz.initialize().await;

        assert_eq!(quiz.dispatch(QuizCommand::Advance).await, CommandOutcome::Ignored);
        assert_eq!(quiz.progress().position, 1);

        assert_eq!(quiz.dispatch(QuizCommand::Reveal).await, CommandOutcome::Applied);
        assert_eq!(quiz.dispatch(QuizCommand::Advance).await, CommandOutcome::Applied);
        assert_eq!(quiz.progress().position, 2);
        assert!(!quiz.is_revealed());
    }

    #[tokio::test]
    async fn new_session_needs_catalog() {
        let mut quiz = controller(0);
        quiz.initialize().await;
        assert_eq!(
            quiz.dispatch(QuizCommand::StartNewSession).await,
            CommandOutcome::Ignored
        );
        assert_eq!(quiz.dispatch(QuizCommand::Reveal).await, CommandOutcome::Ignored);
        assert_eq!(quiz.display_state(), DisplayState::NoMoreCards);
    }

    #[tokio::test]
    async fn media_commands_are_forwarded() {
        let mut quiz = controller(1);
        quiz.initialize().await;
        assert!(quiz.media().loading());

        quiz.dispatch(QuizCommand::SetPlaying(true)).await;
        assert!(quiz.media().playing());
        assert_eq!(
            quiz.dispatch(QuizCommand::SetVolume(0.25)).await,
            CommandOutcome::Applied
        );
        assert!((quiz.media().volume() - 0.25).abs() < f32::EPSILON);
        assert_eq!(
            quiz.dispatch(QuizCommand::SetVolume(f32::NAN)).await,
            CommandOutcome::Ignored
        );

        quiz.handle_media_event(MediaEvent::Error("boom".to_string()));
        assert!(!quiz.media().loading());
    }

    #[tokio::test]
    async fn advancing_past_the_end_stays_on_last_card() {
        let mut quiz = controller(2);
        quiz.initialize().await;
        for _ in 0..4 {
            quiz.dispatch(QuizCommand::Reveal).await;
            quiz.dispatch(QuizCommand::Advance).await;
        }
        assert_eq!(quiz.progress().position, 2);
        assert!(quiz.progress().is_last);
        assert_eq!(quiz.display_state(), DisplayState::PlayingCard);
    }

    #[tokio::test]
    async fn reshuffling_a_single_track_does_not_leave_media_loading() {
        let mut quiz = controller(1);
        quiz.initialize().await;
        quiz.handle_media_event(MediaEvent::Ready);
        quiz.dispatch(QuizCommand::SetPlaying(true)).await;

        assert_eq!(
            quiz.dispatch(QuizCommand::StartNewSession).await,
            CommandOutcome::Applied
        );
        assert!(!quiz.media().loading());
        assert!(!quiz.media().playing());
    }

    #[tokio::test]
    async fn advancing_to_a_new_track_pauses_and_waits_for_player() {
        let mut quiz = controller(2);
        quiz.initialize().await;
        quiz.handle_media_event(MediaEvent::Ready);
        quiz.dispatch(QuizCommand::SetPlaying(true)).await;

        quiz.dispatch(QuizCommand::Reveal).await;
        quiz.dispatch(QuizCommand::Advance).await;
        assert!(quiz.media().loading());
        assert!(!quiz.media().playing());
    }
}

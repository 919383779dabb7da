use quiz_core::model::Track;
use services::{DisplayState, MediaPlayer, QuizController};

/// What the player element should load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerVm {
    pub src: String,
    /// `true` for iframe embeds, `false` for a plain `<video>`.
    pub embedded: bool,
}

/// Metadata shown once the card is revealed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealedVm {
    pub artist: String,
    pub title: String,
    pub year: String,
}

/// UI-ready snapshot of the quiz.
///
/// Metadata is only present once revealed, so a view cannot leak it early.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizVm {
    pub display: DisplayState,
    pub progress_label: String,
    pub player: Option<PlayerVm>,
    pub revealed: Option<RevealedVm>,
    pub is_last: bool,
    pub can_start_new: bool,
    pub playing: bool,
    pub volume: f32,
    pub loading: bool,
}

impl QuizVm {
    #[must_use]
    pub fn can_reveal(&self) -> bool {
        self.display == DisplayState::PlayingCard && self.revealed.is_none()
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.revealed.is_some() && !self.is_last
    }
}

#[must_use]
pub fn map_quiz_vm<P: MediaPlayer>(quiz: &QuizController<P>) -> QuizVm {
    let progress = quiz.progress();
    let track = quiz.current_track();
    let media = quiz.media();

    QuizVm {
        display: quiz.display_state(),
        progress_label: if progress.total == 0 {
            String::new()
        } else {
            format!("Card {} of {}", progress.position, progress.total)
        },
        player: track.and_then(player_vm),
        revealed: track
            .filter(|_| quiz.is_revealed())
            .map(revealed_vm),
        is_last: progress.is_last,
        can_start_new: !quiz.store().state().catalog().is_empty(),
        playing: media.playing(),
        volume: media.volume(),
        loading: media.loading(),
    }
}

fn player_vm(track: &Track) -> Option<PlayerVm> {
    let source = track.media_source();
    source.embed_url().map(|src| PlayerVm {
        src,
        embedded: source.is_embedded(),
    })
}

fn revealed_vm(track: &Track) -> RevealedVm {
    RevealedVm {
        artist: non_empty_or(track.artist(), "Unknown artist"),
        title: non_empty_or(track.title(), "Untitled"),
        year: track.year().to_string(),
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

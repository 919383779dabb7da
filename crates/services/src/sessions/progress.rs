use quiz_core::model::SessionState;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based position of the current card, 0 when there is none.
    pub position: usize,
    pub total: usize,
    pub remaining: usize,
    pub is_last: bool,
}

impl SessionProgress {
    #[must_use]
    pub fn of(state: &SessionState) -> Self {
        let total = state.order().len();
        let position = if total == 0 { 0 } else { state.index() + 1 };
        Self {
            position,
            total,
            remaining: total.saturating_sub(position),
            is_last: state.is_last(),
        }
    }
}

/// What the presentation shell should be showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    CatalogUnavailable(String),
    NoMoreCards,
    PlayingCard,
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{PlayOrder, SessionSnapshot, Track, TrackId};

    #[test]
    fn progress_counts_from_one() {
        let rows = (1..=4)
            .map(|i| Track::new(TrackId::from_sequence(i), "", "", "https://x", ""))
            .collect();
        let state = SessionState::from_snapshot(SessionSnapshot {
            order: PlayOrder::from_indices(vec![3, 2, 1, 0]),
            index: 1,
            rows,
        });
        let progress = SessionProgress::of(&state);
        assert_eq!(progress.position, 2);
        assert_eq!(progress.total, 4);
        assert_eq!(progress.remaining, 2);
        assert!(!progress.is_last);
    }

    #[test]
    fn empty_progress() {
        let progress = SessionProgress::of(&SessionState::empty());
        assert_eq!(progress.position, 0);
        assert_eq!(progress.total, 0);
        assert_eq!(progress.remaining, 0);
        assert!(!progress.is_last);
    }
}

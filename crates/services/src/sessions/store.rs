use std::fmt;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use quiz_core::model::{SessionState, Track, build_catalog};
use storage::repository::SessionRepository;

use super::progress::{DisplayState, SessionProgress};
use crate::catalog::CatalogLoader;
use crate::error::SessionError;

//
// ─── LIFECYCLE ─────────────────────────────────────────────────────────────────
//

/// Where the store is in its startup lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Uninitialized,
    Loading,
    Ready,
    Unavailable(String),
}

/// How startup obtained the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Restored,
    Loaded { tracks: usize },
    Unavailable,
}

//
// ─── SESSION STORE ─────────────────────────────────────────────────────────────
//

/// Owns the session state, persists it after every mutation and restores it
/// at startup.
///
/// `revealed` is presentation state and is never written to storage.
pub struct SessionStore {
    sessions: Arc<dyn SessionRepository>,
    loader: Arc<dyn CatalogLoader>,
    rng: StdRng,
    state: SessionState,
    revealed: bool,
    phase: LoadPhase,
    initialized: Option<InitOutcome>,
}

impl SessionStore {
    #[must_use]
    pub fn new(sessions: Arc<dyn SessionRepository>, loader: Arc<dyn CatalogLoader>) -> Self {
        Self {
            sessions,
            loader,
            rng: StdRng::from_os_rng(),
            state: SessionState::empty(),
            revealed: false,
            phase: LoadPhase::Uninitialized,
            initialized: None,
        }
    }

    /// Use a specific RNG for shuffles (e.g. a seeded one in tests).
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized.is_some()
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn current_track(&self) -> Option<&Track> {
        self.state.current_track()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress::of(&self.state)
    }

    #[must_use]
    pub fn display_state(&self) -> DisplayState {
        match &self.phase {
            LoadPhase::Uninitialized | LoadPhase::Loading => DisplayState::Loading,
            LoadPhase::Unavailable(reason) => DisplayState::CatalogUnavailable(reason.clone()),
            LoadPhase::Ready if self.current_track().is_some() => DisplayState::PlayingCard,
            LoadPhase::Ready => DisplayState::NoMoreCards,
        }
    }

    /// Startup routine: restore a stored session, or load the catalog fresh.
    ///
    /// Runs once. Later calls return the first outcome without touching
    /// storage or the loader.
    pub async fn initialize(&mut self) -> InitOutcome {
        if let Some(outcome) = self.initialized {
            log::debug!("session store already initialized ({outcome:?})");
            return outcome;
        }

        let outcome = if self.restore().await {
            InitOutcome::Restored
        } else {
            match self.load_fresh_catalog().await {
                Ok(tracks) => InitOutcome::Loaded { tracks },
                Err(_) => InitOutcome::Unavailable,
            }
        };
        self.initialized = Some(outcome);
        outcome
    }

    /// Adopt the stored snapshot if it is valid. Returns whether it was adopted.
    ///
    /// Unreadable or invalid snapshots are logged and treated as absent.
    pub async fn restore(&mut self) -> bool {
        let stored = match self.sessions.load().await {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                log::debug!("no stored session");
                return false;
            }
            Err(err) => {
                log::warn!("ignoring unreadable stored session: {err}");
                return false;
            }
        };

        let snapshot = match stored.validate() {
            Ok(snapshot) => snapshot,
            Err(reason) => {
                log::warn!("ignoring stored session: {reason}");
                return false;
            }
        };

        self.state = SessionState::from_snapshot(snapshot);
        self.revealed = false;
        self.phase = LoadPhase::Ready;
        log::info!(
            "restored session at {}/{} ({} tracks)",
            self.state.index() + 1,
            self.state.order().len(),
            self.state.catalog().len()
        );
        self.persist().await;
        true
    }

    /// Fetch the catalog, map it to tracks and start a fresh shuffled session.
    ///
    /// An empty catalog is a successful load. A failed fetch leaves the store
    /// empty in `LoadPhase::Unavailable` and nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Catalog` if the loader fails.
    pub async fn load_fresh_catalog(&mut self) -> Result<usize, SessionError> {
        self.phase = LoadPhase::Loading;
        let rows = match self.loader.load().await {
            Ok(rows) => rows,
            Err(err) => {
                log::warn!("catalog unavailable: {err}");
                self.state = SessionState::empty();
                self.revealed = false;
                self.phase = LoadPhase::Unavailable(err.to_string());
                return Err(err.into());
            }
        };

        let catalog = build_catalog(&rows);
        if catalog.len() < rows.len() {
            log::debug!(
                "dropped {} catalog rows without a media url",
                rows.len() - catalog.len()
            );
        }
        let tracks = catalog.len();
        self.state = SessionState::fresh(catalog, &mut self.rng);
        self.revealed = false;
        self.phase = LoadPhase::Ready;
        log::info!("started session with {tracks} tracks");
        self.persist().await;
        Ok(tracks)
    }

    /// Retry the catalog load after a failure. No-op in any other phase.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Catalog` if the loader fails again.
    pub async fn retry_load(&mut self) -> Result<bool, SessionError> {
        if !matches!(self.phase, LoadPhase::Unavailable(_)) {
            return Ok(false);
        }
        self.load_fresh_catalog().await?;
        Ok(true)
    }

    /// Reshuffle the catalog and rewind. No-op when the catalog is empty.
    pub async fn start_new_session(&mut self) -> bool {
        if !self.state.reshuffle(&mut self.rng) {
            return false;
        }
        self.revealed = false;
        log::info!("new session over {} tracks", self.state.catalog().len());
        self.persist().await;
        true
    }

    /// Step to the next card, clamped at the last one. No-op when the order is empty.
    pub async fn advance(&mut self) -> bool {
        if !self.state.advance() {
            return false;
        }
        self.revealed = false;
        log::debug!(
            "advanced to {}/{}",
            self.state.index() + 1,
            self.state.order().len()
        );
        self.persist().await;
        true
    }

    /// Show the current card's metadata. No-op without a current card.
    pub fn reveal(&mut self) -> bool {
        if self.current_track().is_none() {
            return false;
        }
        self.revealed = true;
        true
    }

    /// Remove the stored snapshot. In-memory state is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the snapshot cannot be removed.
    pub async fn clear_stored(&self) -> Result<(), SessionError> {
        self.sessions.clear().await?;
        Ok(())
    }

    async fn persist(&self) {
        if let Err(err) = self.sessions.save(&self.state.snapshot()).await {
            log::warn!("failed to persist session: {err}");
        }
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("catalog_len", &self.state.catalog().len())
            .field("index", &self.state.index())
            .field("revealed", &self.revealed)
            .field("phase", &self.phase)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalogLoader;
    use quiz_core::model::RawRow;
    use storage::repository::Storage;

    fn rows(n: usize) -> Vec<RawRow> {
        (1..=n)
            .map(|i| {
                RawRow::new()
                    .with("Artist", format!("Artist {i}"))
                    .with("Title", format!("Title {i}"))
                    .with("URL", format!("https://example.com/{i}"))
                    .with("Year", "2001")
            })
            .collect()
    }

    fn build_store(storage: &Storage, n: usize) -> SessionStore {
        SessionStore::new(
            Arc::clone(&storage.sessions),
            Arc::new(StaticCatalogLoader::new(rows(n))),
        )
        .with_rng(StdRng::seed_from_u64(5))
    }

    #[tokio::test]
    async fn reveal_and_advance_reset() {
        let storage = Storage::in_memory();
        let mut store = build_store(&storage, 3);
        store.initialize().await;

        assert!(!store.is_revealed());
        assert!(store.reveal());
        assert!(store.is_revealed());

        store.advance().await;
        assert!(!store.is_revealed());

        store.reveal();
        store.start_new_session().await;
        assert!(!store.is_revealed());
        assert_eq!(store.state().index(), 0);
    }

    #[tokio::test]
    async fn display_state_follows_lifecycle() {
        let storage = Storage::in_memory();
        let mut store = build_store(&storage, 2);
        assert_eq!(store.display_state(), DisplayState::Loading);

        store.initialize().await;
        assert_eq!(store.display_state(), DisplayState::PlayingCard);

        let mut empty = build_store(&Storage::in_memory(), 0);
        empty.initialize().await;
        assert_eq!(empty.display_state(), DisplayState::NoMoreCards);
        assert!(!empty.reveal());
        assert!(!empty.start_new_session().await);
        assert!(!empty.advance().await);
    }

    #[tokio::test]
    async fn retry_is_noop_when_ready() {
        let storage = Storage::in_memory();
        let mut store = build_store(&storage, 2);
        store.initialize().await;
        assert!(!store.retry_load().await.unwrap());
    }
}

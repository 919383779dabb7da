use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Track;
use crate::shuffle::shuffled_indices;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("snapshot has no rows")]
    MissingRows,

    #[error("snapshot has an empty play order")]
    EmptyOrder,

    #[error("snapshot has no index")]
    MissingIndex,

    #[error("snapshot index is not a number")]
    InvalidIndex,
}

//
// ─── PLAY ORDER ────────────────────────────────────────────────────────────────
//

/// A permutation of catalog indices defining presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayOrder(Vec<usize>);

impl PlayOrder {
    /// Uniformly random permutation of `0..len`.
    #[must_use]
    pub fn shuffled<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        Self(shuffled_indices(len, rng))
    }

    #[must_use]
    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<usize> {
        self.0.get(position).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

//
// ─── SNAPSHOTS ─────────────────────────────────────────────────────────────────
//

/// Durable form of a session: `{ order, index, rows }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub order: PlayOrder,
    pub index: usize,
    pub rows: Vec<Track>,
}

/// A snapshot as read back from storage, before validation.
///
/// Every field is optional and `index` may be any JSON value, so a partially
/// written or hand-edited entry still parses and can be rejected with a reason.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StoredSnapshot {
    #[serde(default)]
    pub order: Option<Vec<usize>>,
    #[serde(default)]
    pub index: Option<serde_json::Value>,
    #[serde(default)]
    pub rows: Option<Vec<Track>>,
}

impl StoredSnapshot {
    /// Accept the snapshot iff rows and order are non-empty and index is a number.
    ///
    /// The index is floored, floored at zero and clamped to the last order
    /// position so the restored cursor always points at a real slot.
    ///
    /// # Errors
    ///
    /// Returns the first `SnapshotError` that disqualifies the snapshot.
    pub fn validate(self) -> Result<SessionSnapshot, SnapshotError> {
        let rows = self
            .rows
            .filter(|rows| !rows.is_empty())
            .ok_or(SnapshotError::MissingRows)?;
        let order = self
            .order
            .filter(|order| !order.is_empty())
            .ok_or(SnapshotError::EmptyOrder)?;
        let index = match self.index {
            None | Some(serde_json::Value::Null) => return Err(SnapshotError::MissingIndex),
            Some(serde_json::Value::Number(n)) => index_from_number(&n),
            Some(_) => return Err(SnapshotError::InvalidIndex),
        };

        let last = order.len() - 1;
        Ok(SessionSnapshot {
            order: PlayOrder(order),
            index: index.min(last),
            rows,
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn index_from_number(n: &serde_json::Number) -> usize {
    if let Some(value) = n.as_u64() {
        return usize::try_from(value).unwrap_or(usize::MAX);
    }
    match n.as_f64() {
        Some(value) if value > 0.0 => value.floor() as usize,
        _ => 0,
    }
}

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

/// The authoritative (catalog, order, cursor) triple.
///
/// Invariant: when the order is non-empty the cursor is a valid position in
/// it; when the catalog is empty the order is empty too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    catalog: Vec<Track>,
    order: PlayOrder,
    index: usize,
}

impl SessionState {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fresh session over `catalog` with a new random order and cursor at 0.
    #[must_use]
    pub fn fresh<R: Rng + ?Sized>(catalog: Vec<Track>, rng: &mut R) -> Self {
        let order = PlayOrder::shuffled(catalog.len(), rng);
        Self {
            catalog,
            order,
            index: 0,
        }
    }

    #[must_use]
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        let last = snapshot.order.len().saturating_sub(1);
        Self {
            catalog: snapshot.rows,
            index: snapshot.index.min(last),
            order: snapshot.order,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            order: self.order.clone(),
            index: self.index,
            rows: self.catalog.clone(),
        }
    }

    /// Replace the order with a new permutation and rewind the cursor.
    ///
    /// Returns `false` (and leaves the state alone) when the catalog is empty.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.catalog.is_empty() {
            return false;
        }
        self.order = PlayOrder::shuffled(self.catalog.len(), rng);
        self.index = 0;
        true
    }

    /// Move the cursor forward by one, clamped at the last position.
    ///
    /// Returns `false` when the order is empty.
    pub fn advance(&mut self) -> bool {
        if self.order.is_empty() {
            return false;
        }
        self.index = (self.index + 1).min(self.order.len() - 1);
        true
    }

    /// `catalog[order[index]]`, or `None` when the cursor or order slot is out of range.
    #[must_use]
    pub fn current_track(&self) -> Option<&Track> {
        self.order
            .get(self.index)
            .and_then(|slot| self.catalog.get(slot))
    }

    #[must_use]
    pub fn catalog(&self) -> &[Track] {
        &self.catalog
    }

    #[must_use]
    pub fn order(&self) -> &PlayOrder {
        &self.order
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        !self.order.is_empty() && self.index + 1 == self.order.len()
    }
}

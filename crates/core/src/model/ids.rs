use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a Track.
///
/// Assigned from the 1-based position of the source row and persisted as a
/// string, so `"3"` and `TrackId::from_sequence(3)` are the same id.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Creates a new `TrackId` from an already formatted value
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates the id for the row at 1-based position `seq`
    #[must_use]
    pub fn from_sequence(seq: usize) -> Self {
        Self(seq.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrackId({})", self.0)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_id_from_sequence() {
        let id = TrackId::from_sequence(7);
        assert_eq!(id.as_str(), "7");
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_track_id_serializes_as_string() {
        let json = serde_json::to_string(&TrackId::from_sequence(3)).unwrap();
        assert_eq!(json, "\"3\"");
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::ids::TrackId;
use crate::model::media::MediaSource;

//
// ─── RAW ROWS ──────────────────────────────────────────────────────────────────
//

const ARTIST_KEYS: &[&str] = &["Artist", "artist"];
const TITLE_KEYS: &[&str] = &["Title", "title"];
const URL_KEYS: &[&str] = &["URL", "Url", "url"];
const YEAR_KEYS: &[&str] = &["Year", "year"];

/// One tabular record as produced by a catalog loader: header name → cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow(BTreeMap<String, String>);

impl RawRow {
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert, handy for fixtures.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// First non-empty value among `columns`, in the given order.
    #[must_use]
    pub fn first_non_empty(&self, columns: &[&str]) -> &str {
        columns
            .iter()
            .filter_map(|column| self.get(column))
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

//
// ─── TRACK ─────────────────────────────────────────────────────────────────────
//

/// A playable catalog entry. Immutable once loaded.
///
/// Serialized with the column casing used by the catalog source so stored
/// snapshots stay readable as `{id, Artist, Title, URL, Year}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    id: TrackId,
    #[serde(rename = "Artist", default)]
    artist: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "URL", default)]
    media_url: String,
    #[serde(rename = "Year", default)]
    year: String,
}

impl Track {
    #[must_use]
    pub fn new(
        id: TrackId,
        artist: impl Into<String>,
        title: impl Into<String>,
        media_url: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            id,
            artist: artist.into(),
            title: title.into(),
            media_url: media_url.into(),
            year: year.into(),
        }
    }

    /// Map a raw row at 1-based position `seq` into a track.
    ///
    /// Returns `None` when the row has no usable media URL.
    #[must_use]
    pub fn from_raw(seq: usize, row: &RawRow) -> Option<Self> {
        let media_url = normalize_media_url(row.first_non_empty(URL_KEYS));
        if media_url.is_empty() {
            return None;
        }

        Some(Self {
            id: TrackId::from_sequence(seq),
            artist: row.first_non_empty(ARTIST_KEYS).to_string(),
            title: row.first_non_empty(TITLE_KEYS).to_string(),
            media_url,
            year: row.first_non_empty(YEAR_KEYS).to_string(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &TrackId {
        &self.id
    }

    #[must_use]
    pub fn artist(&self) -> &str {
        &self.artist
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn media_url(&self) -> &str {
        &self.media_url
    }

    #[must_use]
    pub fn year(&self) -> &str {
        &self.year
    }

    #[must_use]
    pub fn media_source(&self) -> MediaSource {
        MediaSource::classify(&self.media_url)
    }
}

/// Strip every whitespace character from a URL cell.
#[must_use]
pub fn normalize_media_url(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Map raw rows into a catalog.
///
/// Ids follow the row position (1-based) before filtering, so a dropped row
/// leaves a gap rather than renumbering the rest.
#[must_use]
pub fn build_catalog<'a>(rows: impl IntoIterator<Item = &'a RawRow>) -> Vec<Track> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(idx, row)| Track::from_raw(idx + 1, row))
        .collect()
}

mod ids;
pub mod media;
mod session;
mod track;

pub use ids::TrackId;
pub use media::MediaSource;
pub use session::{PlayOrder, SessionSnapshot, SessionState, SnapshotError, StoredSnapshot};
pub use track::{RawRow, Track, build_catalog, normalize_media_url};

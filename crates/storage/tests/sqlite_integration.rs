use quiz_core::model::{PlayOrder, SessionSnapshot, Track, TrackId};
use storage::repository::{
    KeyValueSessionRepository, KeyValueStore, SESSION_KEY, SessionRepository, Storage,
};
use storage::sqlite::SqliteRepository;

fn build_snapshot(index: usize) -> SessionSnapshot {
    SessionSnapshot {
        order: PlayOrder::from_indices(vec![2, 0, 1]),
        index,
        rows: (1..=3)
            .map(|i| {
                Track::new(
                    TrackId::from_sequence(i),
                    format!("Artist {i}"),
                    format!("Title {i}"),
                    format!("https://example.com/{i}"),
                    "1999",
                )
            })
            .collect(),
    }
}

#[tokio::test]
async fn sqlite_kv_round_trip_and_overwrite() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.get("missing").await.unwrap().is_none());

    repo.set("k", "first").await.unwrap();
    repo.set("k", "second").await.unwrap();
    assert_eq!(repo.get("k").await.unwrap().as_deref(), Some("second"));

    repo.remove("k").await.unwrap();
    assert!(repo.get("k").await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_session_snapshot_round_trip() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_session?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    let sessions = KeyValueSessionRepository::new(repo.clone());

    sessions.save(&build_snapshot(1)).await.unwrap();
    sessions.save(&build_snapshot(2)).await.unwrap();

    let stored = sessions.load().await.unwrap().expect("stored snapshot");
    assert_eq!(stored.validate().unwrap(), build_snapshot(2));

    let raw = repo.get(SESSION_KEY).await.unwrap().expect("raw value");
    assert!(raw.contains("\"URL\":\"https://example.com/1\""), "{raw}");
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let url = "sqlite:file:memdb_migrate?mode=memory&cache=shared";
    let repo = SqliteRepository::connect(url).await.expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let storage = Storage::sqlite(url).await.expect("storage");
    assert!(storage.sessions.load().await.unwrap().is_none());
}

#[tokio::test]
async fn file_database_is_created_and_survives_reopen() {
    let dir = std::env::temp_dir().join(format!("song-quiz-storage-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("quiz.sqlite3");
    let _ = std::fs::remove_file(&path);
    let url = format!("sqlite://{}", path.display());

    let storage = Storage::sqlite(&url).await.expect("storage");
    storage.sessions.save(&build_snapshot(2)).await.expect("save");
    drop(storage);
    assert!(path.exists());

    let reopened = Storage::sqlite(&url).await.expect("reopen");
    let stored = reopened
        .sessions
        .load()
        .await
        .expect("load")
        .expect("snapshot")
        .validate()
        .expect("valid");
    assert_eq!(stored, build_snapshot(2));

    let _ = std::fs::remove_dir_all(dir);
}

use services::{CommandOutcome, QuizCommand};

use super::test_harness::{setup_quiz_harness, setup_unavailable_harness, song_rows};

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_renders_first_card_without_metadata() {
    let mut harness = setup_quiz_harness(song_rows(3));

    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Card 1 of 3"), "missing progress in {html}");
    assert!(html.contains("Reveal"), "missing reveal button in {html}");
    assert!(html.contains("quiz-player"), "missing player in {html}");
    assert!(html.contains("youtube.com/embed/"), "missing embed in {html}");
    assert!(!html.contains("quiz-meta-title"), "metadata leaked in {html}");
    assert!(html.contains("Catalog: test-songs.csv"), "missing footer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_shows_metadata_once_revealed() {
    let mut harness = setup_quiz_harness(song_rows(3));
    {
        let mut quiz = harness.quiz.lock().await;
        quiz.initialize().await;
        assert_eq!(quiz.dispatch(QuizCommand::Reveal).await, CommandOutcome::Applied);
    }

    harness.settle().await;
    let html = harness.render();

    let title = {
        let quiz = harness.quiz.lock().await;
        quiz.current_track().expect("current track").title().to_string()
    };
    assert!(html.contains("quiz-meta-title"), "missing metadata in {html}");
    assert!(html.contains(&title), "missing {title} in {html}");
    assert!(html.contains("Next"), "missing next button in {html}");
    assert!(!html.contains("id=\"quiz-reveal\""), "reveal still offered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_renders_empty_catalog_state() {
    let mut harness = setup_quiz_harness(Vec::new());

    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("No more cards."), "missing empty state in {html}");
    assert!(!html.contains("New session"), "new session offered without tracks in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_offers_retry_when_catalog_is_unavailable() {
    let mut harness = setup_unavailable_harness();

    harness.settle().await;
    let html = harness.render();

    assert!(
        html.contains("The song catalog could not be loaded."),
        "missing unavailable state in {html}"
    );
    assert!(html.contains("Retry"), "missing retry button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_restores_stored_session_position() {
    let mut first = setup_quiz_harness(song_rows(3));
    {
        let mut quiz = first.quiz.lock().await;
        quiz.initialize().await;
        quiz.dispatch(QuizCommand::Reveal).await;
        assert_eq!(quiz.dispatch(QuizCommand::Advance).await, CommandOutcome::Applied);
    }

    let storage = first.storage.clone();
    let loader: std::sync::Arc<dyn services::CatalogLoader> =
        std::sync::Arc::new(services::StaticCatalogLoader::new(song_rows(3)));
    let mut harness = super::test_harness::setup_quiz_harness_with_loader(storage, loader);

    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Card 2 of 3"), "missing restored progress in {html}");
    assert!(!html.contains("quiz-meta-title"), "reveal should not persist in {html}");
}

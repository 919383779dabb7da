use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::RawRow;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{
    CatalogLoader, CatalogSource, CsvCatalogLoader, MediaPlayer, NullMediaPlayer, QuizController,
    SessionStore, StaticCatalogLoader,
};
use storage::repository::Storage;
use tokio::sync::Mutex;

use crate::context::{SharedQuiz, UiApp, build_app_context};
use crate::views::QuizView;

#[derive(Clone)]
struct TestApp {
    quiz: SharedQuiz,
}

impl UiApp for TestApp {
    fn quiz(&self) -> SharedQuiz {
        Arc::clone(&self.quiz)
    }

    fn catalog_label(&self) -> String {
        "test-songs.csv".to_string()
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { QuizView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub quiz: SharedQuiz,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let the startup resource settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn song_rows(count: usize) -> Vec<RawRow> {
    (1..=count)
        .map(|n| {
            RawRow::new()
                .with("Artist", format!("Artist {n}"))
                .with("Title", format!("Title {n}"))
                .with("URL", format!("https://youtu.be/video{n}"))
                .with("Year", format!("19{n:02}"))
        })
        .collect()
}

pub fn setup_quiz_harness(rows: Vec<RawRow>) -> ViewHarness {
    let loader: Arc<dyn CatalogLoader> = Arc::new(StaticCatalogLoader::new(rows));
    setup_quiz_harness_with_loader(Storage::in_memory(), loader)
}

pub fn setup_unavailable_harness() -> ViewHarness {
    let loader: Arc<dyn CatalogLoader> = Arc::new(CsvCatalogLoader::new(CatalogSource::parse(
        "/definitely/missing/songs.csv",
    )));
    setup_quiz_harness_with_loader(Storage::in_memory(), loader)
}

pub fn setup_quiz_harness_with_loader(
    storage: Storage,
    loader: Arc<dyn CatalogLoader>,
) -> ViewHarness {
    let store = SessionStore::new(Arc::clone(&storage.sessions), loader)
        .with_rng(StdRng::seed_from_u64(7));
    let player: Box<dyn MediaPlayer> = Box::new(NullMediaPlayer);
    let quiz: SharedQuiz = Arc::new(Mutex::new(QuizController::new(store, player)));

    let app = Arc::new(TestApp {
        quiz: Arc::clone(&quiz),
    });
    let dom = VirtualDom::new_with_props(ViewHarnessRoot, ViewHarnessProps { app });

    ViewHarness { dom, storage, quiz }
}

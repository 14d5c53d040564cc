use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use exam_core::model::{Chapter, ImageCatalog, QuestionBank, QuestionRecord};
use exam_core::time::fixed_now;
use services::{Clock, ExamService};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{ExamScreen, ExamTab, ExamTestHandles};

#[derive(Clone)]
struct TestApp {
    exam_service: Arc<ExamService>,
}

impl UiApp for TestApp {
    fn exam_service(&self) -> Arc<ExamService> {
        Arc::clone(&self.exam_service)
    }

    fn image_catalog(&self) -> ImageCatalog {
        ImageCatalog::new("images")
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    tab: ExamTab,
    handles: Option<ExamTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.tab);
    if let Some(handles) = props.handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let tab = use_context::<ExamTab>();
    rsx! { ExamScreen { initial_tab: tab } }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
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

    /// Rebuild and let the restore task finish.
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

pub fn record(number: u32, text: &str, has_image: bool) -> QuestionRecord {
    QuestionRecord {
        number,
        text: text.to_string(),
        options: vec!["Slow down".into(), "Speed up".into(), "Honk".into()],
        correct_answer: Some("Slow down".into()),
        is_critical: false,
        has_image,
        image_path: None,
    }
}

pub fn sample_bank() -> QuestionBank {
    QuestionBank::new(vec![Chapter {
        title: "Rules".into(),
        questions: vec![
            record(2, "What does a yellow light mean?", false),
            record(1, "What should you do near a school?", false),
            record(153, "What do these signs mean?", true),
        ],
    }])
}

pub fn setup_view_harness(tab: ExamTab) -> ViewHarness {
    setup_view_harness_with_storage(tab, Storage::in_memory())
}

pub fn setup_view_harness_with_storage(tab: ExamTab, storage: Storage) -> ViewHarness {
    build_harness(tab, &storage, sample_bank(), None)
}

/// Harness over `bank` whose screen registers its dispatch callback in `handles`.
pub fn setup_intent_harness(
    tab: ExamTab,
    storage: &Storage,
    bank: QuestionBank,
    handles: ExamTestHandles,
) -> ViewHarness {
    build_harness(tab, storage, bank, Some(handles))
}

fn build_harness(
    tab: ExamTab,
    storage: &Storage,
    bank: QuestionBank,
    handles: Option<ExamTestHandles>,
) -> ViewHarness {
    let exam_service = Arc::new(ExamService::new(
        Clock::fixed(fixed_now()),
        Arc::new(bank),
        Arc::clone(&storage.kv),
    ));
    let app = Arc::new(TestApp { exam_service });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps { app, tab, handles },
    );

    ViewHarness { dom }
}

/// Store raw text under `key` before the harness is built.
pub async fn seed(storage: &Storage, key: &str, value: &str) {
    storage.kv.put(key, value).await.expect("seed storage");
}

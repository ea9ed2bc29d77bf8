use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::QuestionBank;
use quiz_core::time::fixed_clock;
use quiz_core::{QuizSession, SessionConfig};
use services::{ChannelNotifier, HistoryService, QuizRunner};
use storage::repository::InMemoryRepository;
use tokio::sync::Mutex;

use crate::app::App;
use crate::context::{NoticeFeed, UiApp, build_app_context};

#[derive(Clone)]
struct TestApp {
    runner: QuizRunner,
    notices: NoticeFeed,
}

impl UiApp for TestApp {
    fn runner(&self) -> QuizRunner {
        self.runner.clone()
    }

    fn notices(&self) -> Option<NoticeFeed> {
        Some(Arc::clone(&self.notices))
    }
}

#[derive(Props, Clone)]
struct AppHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for AppHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for AppHarnessProps {}

#[component]
fn AppHarness(props: AppHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { App {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub runner: QuizRunner,
    pub notifier: ChannelNotifier,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
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

/// Builds the full app around a reference-bank session that `prepare` has
/// already moved into the state under test.
pub fn setup_app_harness(prepare: impl FnOnce(&mut QuizSession)) -> ViewHarness {
    let mut session = QuizSession::new(
        QuestionBank::reference(),
        SessionConfig::default(),
        fixed_clock(),
    );
    prepare(&mut session);

    let history = Arc::new(HistoryService::new(Arc::new(InMemoryRepository::new())));
    let (notifier, rx) = ChannelNotifier::new();
    let runner = QuizRunner::new(
        session,
        history,
        Arc::new(notifier.clone()),
        Duration::from_secs(1),
    )
    .expect("runner");

    let app = Arc::new(TestApp {
        runner: runner.clone(),
        notices: Arc::new(Mutex::new(rx)),
    });
    let dom = VirtualDom::new_with_props(AppHarness, AppHarnessProps { app });

    ViewHarness {
        dom,
        runner,
        notifier,
    }
}

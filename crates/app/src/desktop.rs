use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Notice, QuizRunner};
use tokio::sync::{Mutex, mpsc};
use ui::{App, NoticeFeed, UiApp, build_app_context};

struct DesktopApp {
    runner: QuizRunner,
    notices: NoticeFeed,
}

impl UiApp for DesktopApp {
    fn runner(&self) -> QuizRunner {
        self.runner.clone()
    }

    fn notices(&self) -> Option<NoticeFeed> {
        Some(Arc::clone(&self.notices))
    }
}

/// Opens the quiz window and blocks until it is closed. The runner keeps
/// ticking on the caller's runtime.
pub async fn launch(services: &AppServices, notices: mpsc::UnboundedReceiver<Notice>) {
    let runner = services.runner();
    runner.start().await;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        runner,
        notices: Arc::new(Mutex::new(notices)),
    });
    let context = build_app_context(&app);

    // A plain window; the quiz should not float above other apps.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz Website")
            .with_always_on_top(false),
    );

    tracing::info!("opening quiz window");
    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
}

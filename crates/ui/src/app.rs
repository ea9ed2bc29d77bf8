use dioxus::prelude::*;
use services::Notice;

use crate::context::AppContext;
use crate::views::{CompletionView, QuizView, Toast};
use crate::vm::{CompletionVm, QuizIntent, QuizVm};

/// Root component. Mirrors the runner's snapshots into a signal and routes
/// user intents back to the runner. Starting the countdown is left to the
/// composition root.
#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let runner = ctx.runner();
    let snapshot = use_signal(|| runner.snapshot());
    let notice = use_signal(|| None::<Notice>);

    {
        let runner = runner.clone();
        use_future(move || {
            let runner = runner.clone();
            let mut snapshot = snapshot;
            async move {
                let mut updates = runner.subscribe();
                loop {
                    let latest = updates.borrow_and_update().clone();
                    snapshot.set(latest);
                    if updates.changed().await.is_err() {
                        break;
                    }
                }
            }
        });
    }

    let feed = ctx.notices();
    use_future(move || {
        let feed = feed.clone();
        let mut notice = notice;
        async move {
            let Some(feed) = feed else {
                return;
            };
            let mut rx = feed.lock().await;
            while let Some(next) = rx.recv().await {
                notice.set(Some(next));
            }
        }
    });

    let dispatch = use_callback(move |intent: QuizIntent| {
        let runner = runner.clone();
        let mut notice = notice;
        spawn(async move {
            match intent {
                QuizIntent::Submit(answer) => {
                    runner.submit_answer(&answer).await;
                }
                QuizIntent::Advance => {
                    let _ = runner.advance().await;
                }
                QuizIntent::Restart => {
                    notice.set(None);
                    runner.restart().await;
                }
            }
        });
    });

    let current = snapshot.read().clone();
    let toast = notice.read().clone();

    rsx! {
        div { class: "app-root",
            h1 { "Quiz Website" }
            Toast { notice: toast }

            if let Some(vm) = QuizVm::from_snapshot(&current) {
                QuizView { key: "{current.ticket.value()}", vm, on_intent: dispatch }
            } else {
                CompletionView { vm: CompletionVm::from_snapshot(&current), on_intent: dispatch }
            }
        }
    }
}

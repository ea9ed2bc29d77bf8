use dioxus::prelude::*;

use crate::vm::{AttemptRowVm, CompletionVm, QuizIntent};

#[component]
pub fn CompletionView(vm: CompletionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        div { class: "completion",
            h2 { "Quiz Completed" }
            p { class: "completion-score",
                "Your score: "
                span { "{vm.score_label}" }
            }

            h3 { "Attempt History" }
            if vm.rows.is_empty() {
                p { "No answers were given." }
            } else {
                table { class: "attempts",
                    thead {
                        tr {
                            th { "Question" }
                            th { "Attempt #" }
                            th { "Selected Answer" }
                            th { "Result" }
                        }
                    }
                    tbody {
                        for (index, row) in vm.rows.iter().cloned().enumerate() {
                            AttemptRow { key: "{index}", row }
                        }
                    }
                }
            }

            button {
                class: "completion-retry",
                onclick: move |_| on_intent.call(QuizIntent::Restart),
                "Retry Quiz"
            }
        }
    }
}

#[component]
fn AttemptRow(row: AttemptRowVm) -> Element {
    rsx! {
        tr { class: if row.timed_out { "timed-out" } else { "" },
            td { "{row.question_text}" }
            td { "{row.attempt_number}" }
            td { "{row.selected_answer}" }
            td { class: if row.is_correct { "correct" } else { "incorrect" }, "{row.result_label}" }
        }
    }
}

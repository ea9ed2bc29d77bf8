use dioxus::prelude::*;

use crate::vm::{AnswerMode, NavButton, QuizIntent, QuizVm, can_submit};

/// Question screen. Keyed by question ticket in the parent so the free-text
/// draft starts empty on every question.
#[component]
pub fn QuizView(vm: QuizVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let mut draft = use_signal(String::new);
    let inputs_enabled = vm.inputs_enabled;
    let nav = vm.nav;

    rsx! {
        div { class: "quiz",
            p { class: "quiz-progress", "{vm.progress_label}" }
            h2 { class: "quiz-question", "{vm.question_text}" }

            match vm.mode.clone() {
                AnswerMode::Choices(options) => rsx! {
                    ul { class: "quiz-options",
                        for (index, option) in options.into_iter().enumerate() {
                            ChoiceButton {
                                key: "{index}",
                                option,
                                enabled: inputs_enabled,
                                on_intent,
                            }
                        }
                    }
                },
                AnswerMode::FreeText => rsx! {
                    div { class: "quiz-free-text",
                        input {
                            r#type: "text",
                            placeholder: "Type your answer here...",
                            value: "{draft}",
                            disabled: !inputs_enabled,
                            oninput: move |evt| draft.set(evt.value()),
                        }
                        button {
                            class: "quiz-submit",
                            disabled: !inputs_enabled || !can_submit(&draft.read()),
                            onclick: move |_| {
                                let answer = draft.read().clone();
                                if can_submit(&answer) {
                                    on_intent.call(QuizIntent::Submit(answer));
                                    draft.set(String::new());
                                }
                            },
                            "Submit Answer"
                        }
                    }
                },
            }

            p { class: "quiz-timer", "{vm.timer_label}" }
            if let Some(feedback) = vm.feedback.clone() {
                p {
                    class: if feedback.is_correct {
                        "quiz-feedback correct"
                    } else {
                        "quiz-feedback incorrect"
                    },
                    "{feedback.text}"
                }
            }
            p { class: "quiz-score", "Score: {vm.score_label}" }

            div { class: "quiz-nav",
                button {
                    class: if nav == NavButton::Next { "quiz-next" } else { "quiz-skip" },
                    onclick: move |_| on_intent.call(QuizIntent::Advance),
                    "{nav.label()}"
                }
            }
        }
    }
}

#[component]
fn ChoiceButton(option: String, enabled: bool, on_intent: EventHandler<QuizIntent>) -> Element {
    let answer = option.clone();
    rsx! {
        li {
            button {
                class: "quiz-option",
                disabled: !enabled,
                onclick: move |_| on_intent.call(QuizIntent::Submit(answer.clone())),
                "{option}"
            }
        }
    }
}

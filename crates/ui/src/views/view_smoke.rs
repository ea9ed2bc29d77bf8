use quiz_core::model::HistoryId;
use services::{Notice, Notifier};

use super::test_harness::setup_app_harness;

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_app_harness(|_| {});
    harness.rebuild();
    let html = harness.render();
    for expected in [
        "Quiz Website",
        "Question 1 of 10",
        "Which planet is closest to the Sun?",
        "Mercury",
        "Time left: 30s",
        "0 / 10",
        "Skip",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(!html.contains("Quiz Completed"), "unexpected completion in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_free_text_input() {
    let mut harness = setup_app_harness(|session| {
        for _ in 0..5 {
            session.advance();
        }
    });
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("What is the value of 12 + 28?"), "missing question in {html}");
    assert!(html.contains("Type your answer here..."), "missing input in {html}");
    assert!(html.contains("Submit Answer"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_follows_runner_updates() {
    let mut harness = setup_app_harness(|_| {});
    harness.rebuild();

    assert!(harness.runner.submit_answer("mercury").await);
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Correct!"), "missing feedback in {html}");
    assert!(html.contains("Next"), "missing next button in {html}");
    assert!(html.contains("1 / 10"), "missing score in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn completion_view_smoke_renders_attempt_table() {
    let mut harness = setup_app_harness(|session| {
        session.submit_answer("Venus");
        session.submit_answer("Mercury");
        for _ in 0..10 {
            session.advance();
        }
    });
    harness.rebuild();
    let html = harness.render();
    for expected in [
        "Quiz Completed",
        "Your score: ",
        "1 / 10",
        "Attempt History",
        "✖ Incorrect",
        "✔ Correct",
        "Retry Quiz",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn toast_smoke_shows_saved_notice() {
    let mut harness = setup_app_harness(|_| {});
    harness.rebuild();

    harness
        .notifier
        .notify(Notice::HistorySaved(HistoryId::new(1)));
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Quiz history saved successfully"),
        "missing toast in {html}"
    );
}

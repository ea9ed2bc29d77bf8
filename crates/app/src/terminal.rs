//! Line-oriented front-end for `app play`.

use std::time::Duration;

use quiz_core::QuizSnapshot;
use services::{Notice, QuizRunner};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use ui::vm::{AnswerMode, CompletionVm, QuizVm};

/// How long `quit` waits for a pending history save to report back.
const SAVE_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Ignore,
    Answer(String),
    Advance,
    Retry,
    Help,
    Quit,
}

/// A number picks the matching option on choice questions; anything else is
/// taken as the typed answer.
fn parse_input(line: &str, options: Option<&[String]>) -> Input {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" => return Input::Ignore,
        "skip" | "next" => return Input::Advance,
        "retry" => return Input::Retry,
        "help" | "?" => return Input::Help,
        "quit" | "exit" => return Input::Quit,
        _ => {}
    }

    let picked = options.and_then(|options| {
        let number = trimmed.parse::<usize>().ok()?;
        options.get(number.checked_sub(1)?)
    });
    Input::Answer(picked.map_or_else(|| trimmed.to_string(), Clone::clone))
}

fn render_question(vm: &QuizVm) -> String {
    let mut out = format!("\n{}\n{}\n", vm.progress_label, vm.question_text);
    match &vm.mode {
        AnswerMode::Choices(options) => {
            for (index, option) in options.iter().enumerate() {
                out.push_str(&format!("  {}. {option}\n", index + 1));
            }
        }
        AnswerMode::FreeText => out.push_str("  (type your answer)\n"),
    }
    out.push_str(&format!("{}  |  Score: {}\n", vm.timer_label, vm.score_label));
    out
}

fn render_completion(vm: &CompletionVm) -> String {
    let mut out = format!("\nQuiz Completed\nYour score: {}\n\nAttempt History\n", vm.score_label);
    if vm.rows.is_empty() {
        out.push_str("  (no answers given)\n");
    }
    for row in &vm.rows {
        out.push_str(&format!(
            "  #{} {} -> {} [{}]{}\n",
            row.attempt_number,
            row.question_text,
            row.selected_answer,
            row.result_label,
            if row.timed_out { " (time ran out)" } else { "" }
        ));
    }
    out.push_str("\nType `retry` to play again or `quit` to exit.\n");
    out
}

fn render_screen(snapshot: &QuizSnapshot) -> String {
    match QuizVm::from_snapshot(snapshot) {
        Some(vm) => render_question(&vm),
        None => render_completion(&CompletionVm::from_snapshot(snapshot)),
    }
}

/// Countdown lines are printed at a few milestones only.
fn should_announce(seconds: u32) -> bool {
    seconds <= 5 || seconds % 10 == 0
}

const HELP: &str = "Commands: <number> picks an option, any other text is an answer, \
`skip`/`next` moves on, `retry` restarts, `quit` exits.";

/// Runs the quiz on stdin/stdout until the user quits or stdin closes.
///
/// # Errors
///
/// Returns an I/O error if stdin cannot be read.
pub async fn play(
    runner: QuizRunner,
    mut notices: mpsc::UnboundedReceiver<Notice>,
) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut updates = runner.subscribe();
    let mut shown = updates.borrow_and_update().clone();

    println!("{HELP}");
    print!("{}", render_screen(&shown));
    runner.start().await;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let options = shown
                    .question
                    .as_ref()
                    .and_then(|q| q.options())
                    .map(<[String]>::to_vec);
                match parse_input(&line, options.as_deref()) {
                    Input::Ignore => {}
                    Input::Help => println!("{HELP}"),
                    Input::Quit => break,
                    Input::Retry => runner.restart().await,
                    Input::Advance => {
                        let _ = runner.advance().await;
                    }
                    Input::Answer(answer) => {
                        if shown.state.finished {
                            println!("The quiz is over. Type `retry` or `quit`.");
                            continue;
                        }
                        runner.submit_answer(&answer).await;
                        if let Some(feedback) = runner.snapshot().state.feedback {
                            println!("{}", feedback.message());
                        }
                    }
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let latest = updates.borrow_and_update().clone();
                if latest.ticket != shown.ticket {
                    print!("{}", render_screen(&latest));
                } else if latest.state.seconds_remaining != shown.state.seconds_remaining
                    && should_announce(latest.state.seconds_remaining)
                {
                    println!("Time left: {}s", latest.state.seconds_remaining);
                }
                shown = latest;
            }
            Some(notice) = notices.recv() => {
                println!("* {}", notice.message());
            }
        }
    }

    if runner.snapshot().state.finished {
        // A finished run may still be writing its history record.
        if let Ok(Some(notice)) = tokio::time::timeout(SAVE_GRACE, notices.recv()).await {
            println!("* {}", notice.message());
        }
    }
    tracing::debug!("terminal front-end closed");
    Ok(())
}

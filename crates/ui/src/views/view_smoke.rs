use std::sync::Arc;
use std::time::Duration;

use dioxus::core::Mutation;
use quiz_core::model::{OptionId, Question};
use storage::repository::{InMemoryRepository, QuestionRepository, Storage, StorageError};

use super::test_harness::{SLOW_TICK, setup_view_harness, setup_view_harness_with_repo};
use crate::vm::QuizIntent;

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.wait_until_ready().await;
    let html = harness.render();
    assert!(html.contains("Question-01: ~ GATE 2024 Set 1 [Numerical]"), "missing title in {html}");
    assert!(html.contains("Question 1 of 5"), "missing progress in {html}");
    assert!(html.contains("Time: 0 sec"), "missing timer in {html}");
    assert!(html.contains("quiz-numeric"), "missing numeric input in {html}");
    assert!(!html.contains("quiz-feedback"), "unexpected feedback in {html}");
    assert!(!html.contains("Explanation</h3>"), "explanation shown early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_grades_correct_numeric_answer() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.wait_until_ready().await;

    harness.dispatch(QuizIntent::SetNumeric("40".into()));
    harness.dispatch(QuizIntent::Submit);
    let html = harness.render();
    assert!(html.contains("✔ Correct"), "missing feedback in {html}");
    assert!(
        html.contains("You took Time: 0 sec to solve this question."),
        "missing time taken in {html}"
    );
    assert!(!html.contains("Correct answer:"), "unexpected reveal in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reveals_answer_once_on_wrong_numeric() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.wait_until_ready().await;

    harness.dispatch(QuizIntent::SetNumeric("39".into()));
    harness.dispatch(QuizIntent::Submit);
    harness.dispatch(QuizIntent::Submit);
    let html = harness.render();
    assert!(html.contains("✘ Wrong"), "missing feedback in {html}");
    assert_eq!(html.matches("Correct answer: 40").count(), 1, "reveal count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_marks_multi_select_options() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.wait_until_ready().await;

    harness.dispatch(QuizIntent::Next);
    harness.dispatch(QuizIntent::Next);
    harness.dispatch(QuizIntent::ToggleOption(OptionId::new("opt2")));
    harness.dispatch(QuizIntent::ToggleOption(OptionId::new("opt3")));
    harness.dispatch(QuizIntent::Submit);
    let html = harness.render();
    assert!(html.contains("Question 3 of 5"), "missing progress in {html}");
    assert!(html.contains("quiz-option--correct"), "missing correct mark in {html}");
    assert!(html.contains("quiz-option--wrong"), "missing wrong mark in {html}");
    assert!(html.contains("✘ Wrong"), "missing feedback in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_shows_notices_for_rejected_actions() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.wait_until_ready().await;

    harness.dispatch(QuizIntent::Previous);
    let html = harness.render();
    assert!(html.contains("at the first question."), "missing boundary notice in {html}");

    harness.dispatch(QuizIntent::Submit);
    let html = harness.render();
    assert!(
        html.contains("Please enter your numeric answer before submitting."),
        "missing blank notice in {html}"
    );
    assert!(!html.contains("quiz-feedback"), "unexpected feedback in {html}");

    harness.dispatch(QuizIntent::Next);
    harness.dispatch(QuizIntent::Next);
    harness.dispatch(QuizIntent::Submit);
    let html = harness.render();
    assert!(
        html.contains("Please select at least one option before submitting."),
        "missing selection notice in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reveals_explanation_on_demand() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.wait_until_ready().await;

    harness.dispatch(QuizIntent::RevealExplanation);
    let html = harness.render();
    assert!(html.contains("Explanation</h3>"), "missing explanation in {html}");
    assert!(html.contains("40 packets"), "missing explanation text in {html}");
    assert!(!html.contains("quiz-feedback"), "unexpected feedback in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_resets_question_after_navigation() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.wait_until_ready().await;

    harness.dispatch(QuizIntent::SetNumeric("39".into()));
    harness.dispatch(QuizIntent::Submit);
    harness.dispatch(QuizIntent::RevealExplanation);
    harness.dispatch(QuizIntent::Next);
    harness.dispatch(QuizIntent::Previous);

    let html = harness.render();
    assert!(html.contains("Question 1 of 5"), "missing progress in {html}");
    assert!(!html.contains("quiz-feedback"), "feedback survived in {html}");
    assert!(!html.contains("Correct answer:"), "reveal survived in {html}");
    assert!(!html.contains("Explanation</h3>"), "explanation survived in {html}");
    assert!(!html.contains("value=\"39\""), "input survived in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_mounts_fresh_card_for_each_instance() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.wait_until_ready().await;
    assert!(harness.render().contains("data-instance=\"0\""));

    // A half-typed number reads back as "", so the draft never changes. Only a
    // freshly mounted card guarantees the next numerical question starts empty.
    harness.dispatch(QuizIntent::SetNumeric(String::new()));
    let edits = harness.dispatch_with_edits(QuizIntent::Next);
    assert!(
        edits.edits.iter().any(|edit| matches!(edit, Mutation::LoadTemplate { .. })),
        "card was patched in place: {:?}",
        edits.edits
    );

    let html = harness.render();
    assert!(html.contains("Question 2 of 5"), "missing progress in {html}");
    assert!(html.contains("data-instance=\"1\""), "stale instance in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_counts_ticks() {
    let storage = Storage::bundled().expect("bundled storage");
    let mut harness =
        setup_view_harness_with_repo(Arc::clone(&storage.questions), Duration::from_millis(10));
    harness.rebuild();
    harness.wait_until_ready().await;

    for _ in 0..10 {
        harness.drive_async().await;
    }
    let elapsed = harness.elapsed_secs().expect("quiz started");
    assert!(elapsed > 0, "timer did not advance");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_empty_bank_state() {
    let mut harness = setup_view_harness_with_repo(Arc::new(InMemoryRepository::new()), SLOW_TICK);
    harness.rebuild();
    for _ in 0..5 {
        harness.drive_async().await;
    }
    let html = harness.render();
    assert!(html.contains("No questions to show."), "missing empty state in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

struct FailingQuestionRepo;

#[async_trait::async_trait]
impl QuestionRepository for FailingQuestionRepo {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness_with_repo(Arc::new(FailingQuestionRepo), SLOW_TICK);
    harness.rebuild();
    for _ in 0..5 {
        harness.drive_async().await;
    }
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

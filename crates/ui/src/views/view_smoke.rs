use std::sync::Arc;

use exam_core::ExamState;
use exam_core::exam::ExamIntent;
use exam_core::model::{OptionIndex, QuestionNumber};
use exam_core::time::fixed_now;
use services::{Clock, EXAM_SNAPSHOT_KEY, ExamService};
use storage::repository::Storage;

use super::test_harness::{
    sample_bank, seed, setup_view_harness, setup_view_harness_with_storage,
};
use crate::views::ExamTab;

async fn seeded_storage(intents: &[ExamIntent]) -> Storage {
    let storage = Storage::in_memory();
    let service = ExamService::new(
        Clock::fixed(fixed_now()),
        Arc::new(sample_bank()),
        Arc::clone(&storage.kv),
    );
    let mut state = ExamState::Empty;
    for &intent in intents {
        state = service
            .dispatch(&state, intent)
            .await
            .expect("dispatch");
    }
    storage
}

fn n(value: u32) -> QuestionNumber {
    QuestionNumber::new(value).unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn empty_storage_renders_start_screen() {
    let mut harness = setup_view_harness(ExamTab::Question);
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Driving License Practice"), "missing title in {html}");
    assert!(
        html.contains("Start full exam (3 questions)"),
        "missing start button in {html}"
    );
    assert!(!html.contains("Question list"), "tabs rendered without exam: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn restored_exam_renders_current_question() {
    let storage = seeded_storage(&[ExamIntent::Start]).await;
    let mut harness = setup_view_harness_with_storage(ExamTab::Question, storage);
    harness.settle().await;
    let html = harness.render();

    assert!(
        html.contains("Question 1: What should you do near a school?"),
        "missing heading in {html}"
    );
    assert!(html.contains("Question list"), "missing tabs in {html}");
    assert!(html.contains("Start over"), "missing reset in {html}");
    assert!(html.contains("Speed up"), "missing option in {html}");
    assert!(!html.contains("Correct answer:"), "reveal shown too early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn answered_question_shows_reveal_line() {
    let storage = seeded_storage(&[
        ExamIntent::Start,
        ExamIntent::Answer {
            number: n(1),
            choice: OptionIndex::new(1),
        },
    ])
    .await;
    let mut harness = setup_view_harness_with_storage(ExamTab::Question, storage);
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Correct answer: Slow down ❌"), "missing reveal in {html}");
    assert!(html.contains("exam-option--wrong"), "missing wrong mark in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn split_image_question_renders_both_images() {
    let storage = seeded_storage(&[ExamIntent::Start, ExamIntent::Jump(3)]).await;
    let mut harness = setup_view_harness_with_storage(ExamTab::Question, storage);
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("153_1.jpg"), "missing first image in {html}");
    assert!(html.contains("153_2.jpg"), "missing second image in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_list_renders_grid_and_progress() {
    let storage = seeded_storage(&[
        ExamIntent::Start,
        ExamIntent::Answer {
            number: n(1),
            choice: OptionIndex::new(0),
        },
        ExamIntent::Advance,
    ])
    .await;
    let mut harness = setup_view_harness_with_storage(ExamTab::QuestionList, storage);
    harness.settle().await;
    let html = harness.render();

    assert!(
        html.contains("Answered 1/3 · 1 correct · 0 wrong"),
        "missing progress in {html}"
    );
    assert!(html.contains("index-cell--correct"), "missing correct cell in {html}");
    assert!(html.contains("index-cell--current"), "missing current cell in {html}");
    assert!(html.contains("Question 153"), "missing cell title in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn corrupt_snapshot_falls_back_to_start_screen() {
    let storage = Storage::in_memory();
    seed(&storage, EXAM_SNAPSHOT_KEY, "{\"exam\": 42}").await;
    let mut harness = setup_view_harness_with_storage(ExamTab::Question, storage);
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Driving License Practice"), "missing start screen in {html}");
}

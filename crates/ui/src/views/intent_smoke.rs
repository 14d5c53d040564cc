use dioxus::prelude::ReadableExt;
use exam_core::ActiveExam;
use exam_core::exam::ExamIntent;
use exam_core::model::{OptionIndex, QuestionBank, QuestionNumber};
use services::EXAM_SNAPSHOT_KEY;
use services::persistence::decode;
use storage::repository::Storage;

use super::test_harness::{ViewHarness, sample_bank, setup_intent_harness};
use crate::views::{ExamTab, ExamTestHandles};

fn n(value: u32) -> QuestionNumber {
    QuestionNumber::new(value).unwrap()
}

fn answer(number: u32, choice: u8) -> ExamIntent {
    ExamIntent::Answer {
        number: n(number),
        choice: OptionIndex::new(choice),
    }
}

async fn drive(harness: &mut ViewHarness) {
    for _ in 0..3 {
        harness.drive_async().await;
    }
}

async fn stored_exam(storage: &Storage) -> ActiveExam {
    let raw = storage
        .kv
        .get(EXAM_SNAPSHOT_KEY)
        .await
        .expect("read snapshot")
        .expect("snapshot stored");
    decode(&raw).expect("valid snapshot")
}

#[tokio::test(flavor = "current_thread")]
async fn exam_intents_smoke_start_answer_jump() {
    let storage = Storage::in_memory();
    let handles = ExamTestHandles::default();
    let mut harness = setup_intent_harness(
        ExamTab::QuestionList,
        &storage,
        sample_bank(),
        handles.clone(),
    );
    harness.settle().await;
    assert!(harness.render().contains("Driving License Practice"));

    let dispatch = handles.dispatch();
    let exam = handles.exam();

    dispatch.call(ExamIntent::Start);
    drive(&mut harness).await;
    let html = harness.render();
    assert!(
        html.contains("Question 1: What should you do near a school?"),
        "start did not open the first question: {html}"
    );
    assert!(
        html.contains(r#"class="exam-tab exam-tab--active" id="tab-question""#),
        "start did not switch to the question tab: {html}"
    );

    dispatch.call(answer(1, 0));
    drive(&mut harness).await;
    let html = harness.render();
    assert!(html.contains("Correct answer: Slow down ✅"), "missing reveal in {html}");

    dispatch.call(ExamIntent::Jump(2));
    drive(&mut harness).await;
    let html = harness.render();
    assert!(
        html.contains("Question 2: What does a yellow light mean?"),
        "jump did not move the cursor: {html}"
    );

    let before = exam.peek().clone();
    dispatch.call(answer(1, 1));
    drive(&mut harness).await;
    assert_eq!(*exam.peek(), before, "second answer changed the exam");

    let stored = stored_exam(&storage).await;
    assert_eq!(stored.cursor().position(), 2);
    assert_eq!(stored.answers().len(), 1);
    assert_eq!(stored.answers().get(n(1)), Some(OptionIndex::new(0)));
    assert_eq!(Some(&stored), before.active());
}

#[tokio::test(flavor = "current_thread")]
async fn intents_sent_back_to_back_are_all_applied_in_order() {
    let storage = Storage::in_memory();
    let handles = ExamTestHandles::default();
    let mut harness =
        setup_intent_harness(ExamTab::Question, &storage, sample_bank(), handles.clone());
    harness.settle().await;

    let dispatch = handles.dispatch();
    dispatch.call(ExamIntent::Start);
    dispatch.call(answer(1, 1));
    dispatch.call(ExamIntent::Advance);
    dispatch.call(answer(2, 0));
    drive(&mut harness).await;

    let html = harness.render();
    assert!(
        html.contains("Question 2: What does a yellow light mean?"),
        "advance was dropped: {html}"
    );
    assert!(html.contains("Correct answer: Slow down ✅"), "answer was dropped: {html}");

    let stored = stored_exam(&storage).await;
    assert_eq!(stored.cursor().position(), 2);
    assert_eq!(stored.answers().get(n(1)), Some(OptionIndex::new(1)));
    assert_eq!(stored.answers().get(n(2)), Some(OptionIndex::new(0)));
}

#[tokio::test(flavor = "current_thread")]
async fn empty_bank_can_be_started() {
    let storage = Storage::in_memory();
    let handles = ExamTestHandles::default();
    let mut harness = setup_intent_harness(
        ExamTab::Question,
        &storage,
        QuestionBank::new(Vec::new()),
        handles.clone(),
    );
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Start full exam (0 questions)"), "missing start in {html}");
    assert!(!html.contains("disabled"), "start button disabled: {html}");

    handles.dispatch().call(ExamIntent::Start);
    drive(&mut harness).await;
    let html = harness.render();
    assert!(
        html.contains("This exam has no questions."),
        "empty exam not shown: {html}"
    );
    assert!(stored_exam(&storage).await.is_empty());
}

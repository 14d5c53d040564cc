use dioxus::prelude::*;
use exam_core::exam::ExamIntent;
use exam_core::model::OptionIndex;
use tracing::warn;

use crate::vm::{ImageVm, OptionVm, QuestionVm};

#[component]
pub fn QuestionPanel(question: QuestionVm, on_intent: Callback<ExamIntent>) -> Element {
    let number = question.number;

    rsx! {
        div { class: "exam-reset-row",
            button {
                class: "btn btn-danger",
                id: "exam-reset",
                r#type: "button",
                onclick: move |_| on_intent.call(ExamIntent::Reset),
                "Start over"
            }
        }

        article { class: "exam-question",
            h2 { class: "exam-question__heading", "{question.heading}" }
            if question.critical {
                p { class: "exam-question__critical", "Critical question" }
            }

            for image in question.images.iter().cloned() {
                QuestionImage { key: "{image.src}", image }
            }

            div { class: "exam-options", role: "radiogroup",
                for option in question.options.iter().cloned() {
                    OptionRow {
                        key: "{option.label}",
                        option,
                        group: format!("question-{number}"),
                        on_choose: move |choice| on_intent.call(ExamIntent::Answer { number, choice }),
                    }
                }
            }

            if let Some(reveal) = question.reveal.as_ref() {
                p { class: "exam-reveal", "{reveal}" }
            }
        }

        nav { class: "exam-nav",
            button {
                class: "btn btn-secondary",
                id: "exam-prev",
                r#type: "button",
                disabled: !question.can_retreat,
                onclick: move |_| on_intent.call(ExamIntent::Retreat),
                "Previous"
            }
            button {
                class: "btn btn-primary",
                id: "exam-next",
                r#type: "button",
                disabled: !question.can_advance,
                onclick: move |_| on_intent.call(ExamIntent::Advance),
                "Next"
            }
        }
    }
}

#[component]
fn OptionRow(
    option: OptionVm,
    group: String,
    on_choose: Callback<OptionIndex>,
) -> Element {
    let index = option.index;

    rsx! {
        label { class: option.class(),
            input {
                r#type: "radio",
                name: "{group}",
                value: "{option.label}",
                checked: option.checked,
                disabled: option.disabled(),
                onchange: move |_| on_choose.call(index),
            }
            span { class: "exam-option__label", "{option.label}." }
            span { class: "exam-option__text", "{option.text}" }
        }
    }
}

#[component]
fn QuestionImage(image: ImageVm) -> Element {
    let mut failed = use_signal(|| false);
    if failed() {
        return rsx! {};
    }

    let src = image.src.clone();
    rsx! {
        img {
            class: "exam-question__image",
            src: "{image.src}",
            alt: "{image.alt}",
            onerror: move |_| {
                warn!(src = %src, "question image failed to load");
                failed.set(true);
            },
        }
    }
}

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

use dioxus::prelude::*;
use exam_core::ExamState;
use exam_core::exam::ExamIntent;
use futures::StreamExt;
use tracing::debug;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{map_current_question, map_index_cells, progress_label};

use super::components::{QuestionIndexPanel, QuestionPanel, StartPanel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExamTab {
    Question,
    QuestionList,
}

impl ExamTab {
    fn class(self, active: Self) -> &'static str {
        if self == active {
            "exam-tab exam-tab--active"
        } else {
            "exam-tab"
        }
    }
}

/// Tab to show once `intent` has been applied, if it changes.
fn tab_after(intent: ExamIntent) -> Option<ExamTab> {
    match intent {
        ExamIntent::Start | ExamIntent::Reset | ExamIntent::Jump(_) => Some(ExamTab::Question),
        ExamIntent::Answer { .. } | ExamIntent::Advance | ExamIntent::Retreat => None,
    }
}

#[component]
pub fn ExamView() -> Element {
    rsx! {
        ExamScreen { initial_tab: ExamTab::Question }
    }
}

#[component]
pub fn ExamScreen(initial_tab: ExamTab) -> Element {
    let ctx = use_context::<AppContext>();
    let exam_service = ctx.exam_service();
    let images = ctx.images();
    let eligible = exam_service.eligible_questions();

    let exam = use_signal(|| ExamState::Empty);
    let mut tab = use_signal(|| initial_tab);

    let restore_service = exam_service.clone();
    let resource = use_resource(move || {
        let exam_service = restore_service.clone();
        let mut exam = exam;
        async move {
            let restored = exam_service.restore().await;
            exam.set(restored);
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    // Intents are queued and applied in arrival order, each one starting from
    // the state the previous one produced.
    let intents = {
        let exam_service = exam_service.clone();
        use_coroutine(move |mut queue: UnboundedReceiver<ExamIntent>| {
            let exam_service = exam_service.clone();
            let mut exam = exam;
            let mut tab = tab;
            async move {
                while let Some(intent) = queue.next().await {
                    let current = exam.peek().clone();
                    match exam_service.dispatch(&current, intent).await {
                        Ok(next) => {
                            exam.set(next);
                            if let Some(next_tab) = tab_after(intent) {
                                tab.set(next_tab);
                            }
                        }
                        Err(err) => debug!(error = %err, "exam unchanged"),
                    }
                }
            }
        })
    };
    let dispatch_intent = use_callback(move |intent: ExamIntent| intents.send(intent));

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<ExamTestHandles>() {
                handles.register(dispatch_intent, exam);
            }
        }
    }

    let current_tab = tab();
    let exam_state = exam.read().clone();

    let body = match (state, exam_state.active()) {
        (ViewState::Idle | ViewState::Loading, _) => rsx! {
            p { "Loading..." }
        },
        (ViewState::Error(err), _) => rsx! {
            p { "{err.message()}" }
        },
        (ViewState::Ready(()), None) => rsx! {
            StartPanel {
                eligible,
                on_start: move |()| dispatch_intent.call(ExamIntent::Start),
            }
        },
        (ViewState::Ready(()), Some(active)) => {
            let pane = match current_tab {
                ExamTab::Question => match map_current_question(active, &images) {
                    Some(question) => rsx! {
                        QuestionPanel { question, on_intent: dispatch_intent }
                    },
                    None => rsx! {
                        p { class: "exam-empty", "This exam has no questions." }
                    },
                },
                ExamTab::QuestionList => rsx! {
                    QuestionIndexPanel {
                        cells: map_index_cells(active),
                        progress: progress_label(active.progress()),
                        on_jump: move |position| dispatch_intent.call(ExamIntent::Jump(position)),
                    }
                },
            };

            rsx! {
                div { class: "exam-tabs", role: "tablist",
                    button {
                        class: ExamTab::Question.class(current_tab),
                        id: "tab-question",
                        r#type: "button",
                        role: "tab",
                        onclick: move |_| tab.set(ExamTab::Question),
                        "Question"
                    }
                    button {
                        class: ExamTab::QuestionList.class(current_tab),
                        id: "tab-question-list",
                        r#type: "button",
                        role: "tab",
                        onclick: move |_| tab.set(ExamTab::QuestionList),
                        "Question list"
                    }
                }
                {pane}
            }
        }
    };

    rsx! {
        div { class: "page exam-page", {body} }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct ExamTestHandles {
    dispatch: Rc<RefCell<Option<Callback<ExamIntent>>>>,
    exam: Rc<RefCell<Option<Signal<ExamState>>>>,
}

#[cfg(test)]
impl ExamTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<ExamIntent>, exam: Signal<ExamState>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.exam.borrow_mut() = Some(exam);
    }

    pub(crate) fn dispatch(&self) -> Callback<ExamIntent> {
        (*self.dispatch.borrow()).expect("exam dispatch registered")
    }

    pub(crate) fn exam(&self) -> Signal<ExamState> {
        (*self.exam.borrow()).expect("exam signal registered")
    }
}

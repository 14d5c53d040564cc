use dioxus::prelude::*;

use crate::vm::start_label;

#[component]
pub fn StartPanel(eligible: usize, on_start: Callback<()>) -> Element {
    let label = start_label(eligible);

    rsx! {
        section { class: "exam-start",
            h1 { class: "exam-start__title", "Driving License Practice" }
            button {
                class: "btn btn-primary exam-start__button",
                id: "exam-start",
                r#type: "button",
                onclick: move |_| on_start.call(()),
                "{label}"
            }
        }
    }
}

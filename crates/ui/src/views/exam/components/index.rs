use dioxus::prelude::*;

use crate::vm::IndexCellVm;

#[component]
pub fn QuestionIndexPanel(
    cells: Vec<IndexCellVm>,
    progress: String,
    on_jump: Callback<usize>,
) -> Element {
    rsx! {
        section { class: "exam-index",
            p { class: "exam-index__progress", "{progress}" }
            div { class: "exam-index__grid",
                for cell in cells {
                    button {
                        key: "{cell.position}",
                        class: cell.class(),
                        r#type: "button",
                        title: cell.title(),
                        onclick: move |_| on_jump.call(cell.position),
                        "{cell.number}"
                    }
                }
            }
        }
    }
}

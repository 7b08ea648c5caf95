use dioxus::prelude::*;

use super::reducer::{RemovePostsAction, ViewStore};
use crate::loc;
use crate::widgets::*;

#[inline_props]
pub fn RemovePostsView<'a>(cx: Scope<'a>, store: ViewStore<'a>) -> Element<'a> {
    let result = store.result_text();
    render! {
        div { class: "wrapper--fixed remove-posts",
            h3 { class: "admin-header", loc!("Remove Posts") }
            VStack { class: "admin-console__content gap-2",
                div { class: "date-selector hstack gap-2",
                    label { r#for: "startTime", loc!("From:") }
                    input {
                        name: "startTime",
                        r#type: "datetime-local",
                        value: "{store.start_time}",
                        onchange: move |evt| store.send(RemovePostsAction::StartChanged(evt.value.clone())),
                    }
                    label { r#for: "endTime", loc!("To:") }
                    input {
                        name: "endTime",
                        r#type: "datetime-local",
                        value: "{store.end_time}",
                        onchange: move |evt| store.send(RemovePostsAction::EndChanged(evt.value.clone())),
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: store.is_removing,
                        onclick: move |_| store.send(RemovePostsAction::Remove),
                        loc!("Remove")
                    }
                    store.is_removing.then(|| rsx!(Spinner {}))
                }
                store.error.as_ref().map(|error| rsx!(ErrorBox {
                    content: error.clone(),
                    onclick: move |_| store.send(RemovePostsAction::ClearError),
                })),
                result.map(|text| rsx!(Paragraph { "{text}" }))
            }
        }
    }
}

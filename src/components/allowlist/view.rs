use dioxus::prelude::*;

use super::reducer::{AllowlistAction, ViewStore};
use crate::helper::ClassList;
use crate::loc;
use crate::widgets::*;

#[inline_props]
pub fn AllowlistModal<'a>(cx: Scope<'a>, store: ViewStore<'a>) -> Element<'a> {
    let group_class = ClassList::new("input-group input-group--limit")
        .with("has-error", store.error.is_some());
    render! {
        div { class: "modal-backdrop",
            onclick: move |_| store.send(AllowlistAction::Close),
        }
        div { class: "modal a11y__modal", role: "dialog",
            HStack { class: "modal-header align-items-center",
                h1 { class: "grow", loc!("IP Allowlist") }
                Label { style: TextStyle::Tertiary, "{store.user.username}" }
            }
            form {
                class: "form-horizontal modal-body",
                prevent_default: "onsubmit",
                onsubmit: move |_| store.send(AllowlistAction::Add),
                div { class: "{group_class}",
                    Label { class: "input-group-addon", title: loc!("New IP"), loc!("New IP") }
                    input {
                        class: "form-control",
                        r#type: "text",
                        maxlength: "128",
                        autofocus: "true",
                        value: "{store.input}",
                        oninput: move |evt| store.send(AllowlistAction::InputChanged(evt.value.clone())),
                    }
                    button { class: "btn btn-primary", r#type: "submit", loc!("Add") }
                }
                store.error.as_ref().map(|error| rsx!(
                    div { class: "has-error",
                        p { class: "input__help error", "{error}" }
                    }
                ))
            }
            div { class: "allowlist-wrapper",
                store.is_loading.then(|| rsx!(Spinner {})),
                store.ips.iter().map(|ip| rsx!(
                    div { key: "{ip}", class: "allowlist-item hstack",
                        span { class: "grow", "{ip}" }
                        span {
                            class: "allowlist-del",
                            title: loc!("Remove"),
                            onclick: move |_| store.send(AllowlistAction::Delete(ip.clone())),
                            "X"
                        }
                    }
                ))
            }
            div { class: "modal-footer",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| store.send(AllowlistAction::Close),
                    loc!("Close")
                }
            }
        }
    }
}

use super::{HStack, Paragraph, VStack};
use dioxus::prelude::*;

/// An error with a button to dismiss it
#[inline_props]
pub fn ErrorBox<'a>(cx: Scope<'a>, content: String, onclick: EventHandler<'a, ()>) -> Element<'a> {
    cx.render(rsx!(
        div { class: "error-box",
            HStack { class: "align-items-center",
                div { class: "grow",
                    Paragraph { "{content}" }
                }
                button {
                    class: "error-box__dismiss",
                    r#type: "button",
                    title: "Clear",
                    onclick: move |_| onclick.call(()),
                    "×"
                }
            }
        }
    ))
}

/// Shown instead of the app when it can't start
#[inline_props]
pub fn ErrorPage<'a>(cx: Scope<'a>, content: &'a str) -> Element<'a> {
    cx.render(rsx!(
        div { class: "p-3",
            VStack { class: "grow label-primary",
                h4 { "An error occurred" }
                Paragraph { "{content}" }
            }
        }
    ))
}

use super::{Label, PointerStyle};
use dioxus::prelude::*;

#[derive(Props)]
pub struct TextButtonProps<'a, S: AsRef<str>, ST: AsRef<str>> {
    pub text: S,
    pub title: ST,
    #[props(optional)]
    pub class: Option<&'a str>,
    #[props(optional)]
    pub disabled: Option<bool>,
    pub onclick: EventHandler<'a, MouseEvent>,
}

pub fn TextButton<'a, S: AsRef<str>, ST: AsRef<str>>(
    cx: Scope<'a, TextButtonProps<'a, S, ST>>,
) -> Element {
    let is_disabled = cx.props.disabled.unwrap_or_default();
    let disabled = if is_disabled { "disabled" } else { "" };
    let pointer_style = if is_disabled {
        PointerStyle::Default
    } else {
        PointerStyle::Pointer
    };
    let rule = pointer_style.rule();
    let class = cx.props.class.unwrap_or("");
    cx.render(rsx!(
        div {
            style: "{rule}",
            class: "text-button {disabled} {class}",
            title: "{cx.props.title.as_ref()}",
            onclick: move |e| {
                if !is_disabled {
                    cx.props.onclick.call(e)
                }
            },
            Label { pointer_style: pointer_style, "{cx.props.text.as_ref()}" }
        }
    ))
}

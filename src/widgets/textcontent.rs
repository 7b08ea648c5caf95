use dioxus::prelude::*;

use crate::styling::MessageSegment;

/// A message with its mentions and hashtags highlighted
#[inline_props]
pub fn TextContent<'a>(cx: Scope<'a>, content: &'a [MessageSegment], class: &'a str) -> Element<'a> {
    use crate::styling::MessageSegment::*;
    cx.render(rsx!(
        div { class: "attributed-text {class}",
            p {
                content.iter().map(|item| match item {
                Text(content) => rsx!(span {
                    "{content}"
                }),
                Mention(name) => rsx!(span {
                    class: "mention-highlight",
                    "@{name}"
                }),
                Hashtag(name) => rsx!(span {
                    class: "hashtag-highlight",
                    "#{name}"
                }),
            })
            }
        }
    ))
}

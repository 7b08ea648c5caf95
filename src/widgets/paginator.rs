use dioxus::prelude::*;

use crate::helper::ClassList;
use crate::pagination::Page;

/// `< 2 / 5 >`, hidden for a single page
#[inline_props]
pub fn Paginator<'a>(
    cx: Scope<'a>,
    page: Page,
    class: Option<&'a str>,
    onprevious: EventHandler<'a, ()>,
    onnext: EventHandler<'a, ()>,
) -> Element<'a> {
    if !page.needs_paginator() {
        return render!({});
    }
    let class = ClassList::new("paginator").with_optional(*class);
    let previous = if page.is_first() { "inactive" } else { "active" };
    let next = if page.is_last() { "inactive" } else { "active" };
    let label = page.label();
    render! {
        div { class: "{class}",
            span {
                class: "{previous}",
                onclick: move |_| {
                    if page.has_previous() {
                        onprevious.call(())
                    }
                },
                "<"
            }
            span { "{label}" }
            span {
                class: "{next}",
                onclick: move |_| {
                    if page.has_next() {
                        onnext.call(())
                    }
                },
                ">"
            }
        }
    }
}

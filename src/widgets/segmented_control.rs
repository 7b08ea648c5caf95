use dioxus::prelude::*;

pub trait Segment: Eq + PartialEq + Clone {
    fn id(&self) -> u64;
    fn label(&self) -> String;
    fn selected(&self) -> bool;
}

/// A row of tabs, one of them selected
#[inline_props]
pub fn SegmentedControl<'a, Item: Segment>(
    cx: Scope<'a>,
    items: Vec<Item>,
    onclick: EventHandler<'a, Item>,
) -> Element<'a> {
    cx.render(rsx!(
        div { class: "tabbar",
            items.iter().map(|item| {
                let class = if item.selected() { "button selected" } else { "button" };
                rsx!(button {
                    key: "{item.id()}",
                    class: "{class}",
                    r#type: "button",
                    onclick: move |_| onclick.call(item.clone()),
                    "{item.label()}"
                })
            })
        }
    ))
}

use dioxus::prelude::*;

const DEFAULT_SIDEBAR_WIDTH: f64 = 260.;
const MIN_SIDEBAR_WIDTH: f64 = 160.;
const MAX_SIDEBAR_WIDTH: f64 = 480.;

/// Sidebar width for a drag ending at `page_x`
pub fn sidebar_width(page_x: f64) -> f64 {
    (page_x - 8.).clamp(MIN_SIDEBAR_WIDTH, MAX_SIDEBAR_WIDTH)
}

/// A resizable sidebar next to the content
#[inline_props]
pub fn SplitViewComponent<'a>(cx: Scope<'a>, sidebar: Element<'a>, content: Element<'a>) -> Element<'a> {
    let width = use_state(cx, || DEFAULT_SIDEBAR_WIDTH);
    let is_resizing = use_state(cx, || false);
    let class = is_resizing.then(|| "sb-is-resizing").unwrap_or_default();
    render! {
        div {
            class: "sb-main {class}",
            onmouseup: move |_| {
                if *is_resizing.current() {
                    is_resizing.set(false);
                }
            },
            onmousemove: move |event| {
                if *is_resizing.current() {
                    width.set(sidebar_width(event.data.page_coordinates().x));
                }
            },
            div { class: "sb-sidebar", style: "width: {width}px;", sidebar }
            div {
                class: "sb-resize",
                onmousedown: move |_| is_resizing.set(true),
            }
            div { class: "sb-content", content }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_stays_in_bounds() {
        assert_eq!(sidebar_width(0.), MIN_SIDEBAR_WIDTH);
        assert_eq!(sidebar_width(308.), 300.);
        assert_eq!(sidebar_width(2000.), MAX_SIDEBAR_WIDTH);
    }
}

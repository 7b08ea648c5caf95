use copypasta::{ClipboardContext, ClipboardProvider};
use dioxus_desktop::{LogicalSize, WindowBuilder};

pub fn copy_to_clipboard(content: impl AsRef<str>) -> Result<(), String> {
    let mut ctx = ClipboardContext::new().map_err(|e| {
        log::error!("Could not access clipboard: {e:?}");
        format!("could not access clipboard: {e:?}")
    })?;
    ctx.set_contents(content.as_ref().to_string()).map_err(|e| {
        log::error!("Could not write to clipboard: {e:?}");
        format!("could not copy: {e:?}")
    })
}

pub fn default_window() -> WindowBuilder {
    WindowBuilder::new()
        .with_title("Mattermost Desk")
        .with_inner_size(LogicalSize::new(1200., 800.))
}

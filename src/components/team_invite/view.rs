use dioxus::prelude::*;

use super::reducer::{TeamInviteAction, ViewStore};
use crate::loc;
use crate::widgets::*;

#[inline_props]
pub fn TeamInviteView<'a>(cx: Scope<'a>, store: ViewStore<'a>) -> Element<'a> {
    let link = store.invite_link();
    let copy_title = if store.copied {
        loc!("Link copied!")
    } else {
        loc!("Copy Link")
    };
    let generate_title = if store.is_loading {
        loc!("Generating...")
    } else {
        loc!("Regenerate Link")
    };
    render! {
        VStack { class: "team-invite-section gap-2",
            h4 { loc!("Team Invite Link") }
            Label { style: TextStyle::Secondary, loc!("Share this link with others to invite them to your team.") }
            HStack { class: "team-invite-link-container gap-2",
                input {
                    class: "form-control grow",
                    r#type: "text",
                    readonly: "true",
                    placeholder: loc!("Team Invite Link"),
                    value: "{link}",
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: "{!store.can_copy()}",
                    onclick: move |_| store.send(TeamInviteAction::Copy),
                    "{copy_title}"
                }
            }
            div {
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: "{store.is_loading}",
                    onclick: move |_| store.send(TeamInviteAction::Generate),
                    "{generate_title}"
                }
            }
            store.error.as_ref().map(|error| rsx!(
                p { class: "input__help error", "{error}" }
            ))
        }
    }
}

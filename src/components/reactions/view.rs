use super::grouping::{group_for_bar, BarGroup};
use super::reducer::{ReactionListAction, ViewStore};
use crate::helper::ClassList;
use crate::loc;
use crate::widgets::*;
use dioxus::prelude::*;

/// The inline reaction bar below a post
#[inline_props]
pub fn ReactionList<'a>(cx: Scope<'a>, store: ViewStore<'a>) -> Element<'a> {
    if store.is_hidden() {
        return render!({});
    }
    let groups = group_for_bar(
        &store.reactions,
        &store.order,
        store.current_user_id.as_deref(),
        |id| store.name_of(id),
    );
    let details_label = loc!("Reactions");
    render! {
        div { class: "post-reaction-list",
            groups.into_iter().map(|group| {
                let emoji_url = store.emoji_url(&group.emoji_name);
                rsx!(ReactionChip {
                key: "{group.emoji_name}",
                emoji_url: emoji_url,
                group: group.clone(),
                disabled: store.is_loading || !store.can_add_reactions,
                onclick: move |emoji: String| store.send(ReactionListAction::ToggleReaction(emoji)),
            })}),
            (!store.reactions.is_empty()).then(|| rsx!(
                TextButton {
                    class: "post-reaction-details-toggle",
                    text: details_label,
                    title: details_label,
                    onclick: move |_| store.send(ReactionListAction::ShowDetails(!store.show_details)),
                }
            )),
            store.error.as_ref().map(|error| rsx!(ErrorBox {
                content: error.clone(),
                onclick: move |_| store.send(ReactionListAction::ClearError),
            })),
            store.show_details.then(|| rsx!(ReactionDetails { store: store }))
        }
    }
}

#[inline_props]
fn ReactionChip<'a>(
    cx: Scope<'a>,
    group: BarGroup,
    emoji_url: String,
    disabled: bool,
    onclick: EventHandler<'a, String>,
) -> Element<'a> {
    let class = ClassList::new("post-reaction")
        .with("post-reaction--current-user", group.reacted_by_current_user())
        .with("disabled", *disabled);
    let title = group
        .entries
        .iter()
        .map(|e| e.label.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let count = group.count();
    let name = group.emoji_name.clone();
    render! {
        button {
            class: "{class}",
            r#type: "button",
            title: "{title} :{group.emoji_name}:",
            disabled: *disabled,
            onclick: move |_| onclick.call(name.clone()),
            img { class: "emoji-entry", src: "{emoji_url}", alt: "{group.emoji_name}" }
            span { class: "post-reaction__count", "{count}" }
        }
    }
}

/// Every reaction of a post grouped by emoji, with who reacted when
#[inline_props]
pub fn ReactionDetails<'a>(cx: Scope<'a>, store: &'a ViewStore<'a>) -> Element<'a> {
    render! {
        VStack { class: "reaction-details p-2",
            store.details.iter().map(|detail| rsx!(
                div { key: "{detail.emoji_name}", class: "reaction-details__group",
                    HStack { class: "align-items-center gap-2",
                        img { class: "emoji-entry", src: "{store.emoji_url(&detail.emoji_name)}", alt: "{detail.emoji_name}" }
                        Label { style: TextStyle::Secondary, title: detail.summary.as_str(), ":{detail.emoji_name}: " }
                        Label { style: TextStyle::Tertiary, "{detail.users.len()}" }
                    }
                    detail.users.iter().zip(&detail.nicknames).map(|(user, nickname)| rsx!(
                        HStack { class: "reaction-details__user gap-2",
                            Label { class: "grow", title: nickname.as_str(), "{user.username}" }
                            Label { style: TextStyle::Tertiary, force_singleline: true, "{user.date}" }
                        }
                    ))
                }
            ))
        }
    }
}

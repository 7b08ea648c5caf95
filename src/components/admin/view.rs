use dioxus::prelude::*;
use navicula::reducer::ChildReducer;

use super::reducer::{AdminAction, TabItem, ViewStore};
use super::{AdminReducer, AdminTab};
use crate::components::allowlist::{
    AllowlistDelegate, AllowlistModal, AllowlistReducer, AllowlistState,
};
use crate::components::posts::{PostsReducer, PostsState, PostsView};
use crate::components::remove_posts::{RemovePostsReducer, RemovePostsState, RemovePostsView};
use crate::components::team_invite::{TeamInviteReducer, TeamInviteState, TeamInviteView};
use crate::environment::model::UserProfile;
use crate::environment::storage::ChannelActivity;
use crate::loc;
use crate::styling::{sidebar_channel_classes, ChannelListEntry};
use crate::widgets::*;

#[inline_props]
pub fn AdminApp<'a>(cx: Scope<'a>, store: ViewStore<'a>) -> Element<'a> {
    log::trace!("rerender admin app");
    render! {
        SplitViewComponent {
            sidebar: cx.render(rsx!(ChannelSidebar { store: store })),
            content: cx.render(rsx!(
                VStack { class: "admin-console grow",
                    ConsoleHeader { store: store }
                    store.error.as_ref().map(|error| rsx!(ErrorBox {
                        content: error.clone(),
                        onclick: move |_| store.send(AdminAction::ClearError),
                    })),
                    SegmentedControl {
                        items: store.tabs(),
                        onclick: move |item: TabItem| store.send(AdminAction::SelectTab(item.tab)),
                    }
                    match store.tab {
                        AdminTab::Posts => rsx!(PostsTab { store: store }),
                        AdminTab::RemovePosts => rsx!(RemovePostsTab { store: store }),
                        AdminTab::Allowlist => rsx!(AllowlistTab { store: store }),
                        AdminTab::TeamInvite => rsx!(TeamInviteTab { store: store }),
                    }
                }
            )),
        }
    }
}

#[inline_props]
fn ConsoleHeader<'a>(cx: Scope<'a>, store: &'a ViewStore<'a>) -> Element<'a> {
    let license = if store.is_licensed() {
        loc!("Licensed")
    } else {
        loc!("Unlicensed")
    };
    let missing = store.missing_features().join(", ");
    render! {
        HStack { class: "admin-console__header gap-2 align-items-center",
            h2 { class: "grow", loc!("System Console") }
            store.fetches_custom_profile_attributes().then(|| rsx!(
                Label { style: TextStyle::Tertiary, loc!("Custom profile attributes") }
            )),
            Label { style: TextStyle::Secondary, title: missing.as_str(), "{license}" }
        }
    }
}

#[inline_props]
fn ChannelSidebar<'a>(cx: Scope<'a>, store: &'a ViewStore<'a>) -> Element<'a> {
    render! {
        VStack { class: "sidebar--left p-2",
            store.channels.iter().map(|entry| match entry {
                ChannelListEntry::Channel(channel) => {
                    let activity = store.activity.get(&channel.id);
                    let mentions = activity.map(ChannelActivity::mention_count).unwrap_or_default();
                    let posts = activity.map(ChannelActivity::post_count).unwrap_or_default();
                    let mut class = sidebar_channel_classes(posts > 0, mentions);
                    if store.selected_channel.as_ref() == Some(&channel.id) {
                        class.push_str(" active");
                    }
                    let id = channel.id.clone();
                    rsx!(div {
                        key: "{channel.id}",
                        class: "{class}",
                        onclick: move |_| store.send(AdminAction::SelectChannel(id.clone())),
                        span { class: "grow", "{channel.display_name}" }
                        ChannelMentionBadge {
                            unread_mentions: mentions,
                            unread_msgs: posts,
                            has_urgent: mentions > 0,
                        }
                    })
                }
                header => {
                    let title = header.title().to_string();
                    rsx!(h5 { key: "{title}", class: "sidebar-section__header", "{title}" })
                }
            }),
            store.channel_path.as_ref().map(|path| rsx!(
                Label { class: "sidebar__channel-path", style: TextStyle::Tertiary, selectable: true, "{path}" }
            ))
        }
    }
}

#[inline_props]
fn PostsTab<'a>(cx: Scope<'a>, store: &'a ViewStore<'a>) -> Element<'a> {
    render! {
        PostsView {
            store: store.host_with(cx, &store.users_per_page, PostsState::new)
        }
    }
}

#[inline_props]
fn RemovePostsTab<'a>(cx: Scope<'a>, store: &'a ViewStore<'a>) -> Element<'a> {
    render! {
        RemovePostsView {
            store: store.host_with(cx, &store.today, RemovePostsState::new)
        }
    }
}

#[inline_props]
fn AllowlistTab<'a>(cx: Scope<'a>, store: &'a ViewStore<'a>) -> Element<'a> {
    render! {
        VStack { class: "allowlist-users gap-2",
            h3 { class: "admin-header", loc!("IP Allowlist") }
            store.users.iter().map(|user| rsx!(
                HStack { key: "{user.id}", class: "allowlist-user gap-2 align-items-center",
                    Label { class: "grow", "{user.username}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| store.send(AdminAction::OpenAllowlist(user.clone())),
                        loc!("Edit")
                    }
                }
            )),
            store.allowlist_user.as_ref().map(|user| rsx!(AllowlistForUser {
                key: "{user.id}",
                store: store,
                user: user,
            }))
        }
    }
}

#[inline_props]
fn AllowlistForUser<'a>(
    cx: Scope<'a>,
    store: &'a ViewStore<'a>,
    user: &'a UserProfile,
) -> Element<'a> {
    render! {
        AllowlistModal {
            store: store.host_with(cx, *user, AllowlistState::new)
        }
    }
}

#[inline_props]
fn TeamInviteTab<'a>(cx: Scope<'a>, store: &'a ViewStore<'a>) -> Element<'a> {
    render! {
        VStack { class: "team-invite gap-2",
            h3 { class: "admin-header", loc!("Team Invite") }
            form {
                class: "hstack gap-2",
                prevent_default: "onsubmit",
                onsubmit: move |_| store.send(AdminAction::ShowTeamInvite),
                Label { class: "input-group-addon", loc!("Team ID") }
                input {
                    class: "form-control",
                    r#type: "text",
                    value: "{store.team_input}",
                    oninput: move |evt| store.send(AdminAction::TeamInputChanged(evt.value.clone())),
                }
                button { class: "btn btn-primary", r#type: "submit", loc!("Open") }
            }
            store.invite_team.as_ref().map(|team| rsx!(TeamInviteForTeam {
                key: "{team}",
                store: store,
                team: team,
            }))
        }
    }
}

#[inline_props]
fn TeamInviteForTeam<'a>(cx: Scope<'a>, store: &'a ViewStore<'a>, team: &'a String) -> Element<'a> {
    render! {
        TeamInviteView {
            store: store.host_with(cx, *team, |team| TeamInviteState::new(team, &store.server_url))
        }
    }
}

impl ChildReducer<AdminReducer> for PostsReducer {
    fn to_child(
        _message: <AdminReducer as navicula::Reducer>::Message,
    ) -> Option<<Self as navicula::Reducer>::Action> {
        None
    }

    fn from_child(
        _message: <Self as navicula::Reducer>::DelegateMessage,
    ) -> Option<<AdminReducer as navicula::Reducer>::Action> {
        None
    }
}

impl ChildReducer<AdminReducer> for RemovePostsReducer {
    fn to_child(
        _message: <AdminReducer as navicula::Reducer>::Message,
    ) -> Option<<Self as navicula::Reducer>::Action> {
        None
    }

    fn from_child(
        _message: <Self as navicula::Reducer>::DelegateMessage,
    ) -> Option<<AdminReducer as navicula::Reducer>::Action> {
        None
    }
}

impl ChildReducer<AdminReducer> for AllowlistReducer {
    fn to_child(
        _message: <AdminReducer as navicula::Reducer>::Message,
    ) -> Option<<Self as navicula::Reducer>::Action> {
        None
    }

    fn from_child(
        message: <Self as navicula::Reducer>::DelegateMessage,
    ) -> Option<<AdminReducer as navicula::Reducer>::Action> {
        match message {
            AllowlistDelegate::Closed => Some(AdminAction::Allowlist(message)),
        }
    }
}

impl ChildReducer<AdminReducer> for TeamInviteReducer {
    fn to_child(
        _message: <AdminReducer as navicula::Reducer>::Message,
    ) -> Option<<Self as navicula::Reducer>::Action> {
        None
    }

    fn from_child(
        _message: <Self as navicula::Reducer>::DelegateMessage,
    ) -> Option<<AdminReducer as navicula::Reducer>::Action> {
        None
    }
}

use dioxus::prelude::*;
use navicula::reducer::ChildReducer;

use super::reducer::{PickerAction, PostsAction, PostsMessage, ViewStore};
use super::user_picker::PickerEntry;
use super::PostsReducer;
use crate::components::reactions::{
    ReactionList, ReactionListAction, ReactionListDelegate, ReactionListReducer,
    ReactionListState,
};
use crate::loc;
use crate::styling::responsive_message_width;
use crate::view_model::{AttachmentViewModel, PostViewModel};
use crate::widgets::*;

/// The admin post browser: search form, user filter, paged results
#[inline_props]
pub fn PostsView<'a>(cx: Scope<'a>, store: ViewStore<'a>) -> Element<'a> {
    let window = dioxus_desktop::use_window(cx);
    let width = window
        .inner_size()
        .to_logical::<f64>(window.scale_factor())
        .width;
    let message_width = responsive_message_width(width);
    render! {
        div { class: "wrapper--fixed posts-browser",
            h3 { class: "admin-header", loc!("Post Search") }
            VStack { class: "admin-console__content gap-2",
                SearchForm { store: store }
                DateSelector { store: store }
                store.error.as_ref().map(|error| rsx!(ErrorBox {
                    content: error.clone(),
                    onclick: move |_| store.send(PostsAction::ClearError),
                })),
                Paginator {
                    page: store.page,
                    onprevious: move |_| store.send(PostsAction::PreviousPage),
                    onnext: move |_| store.send(PostsAction::NextPage),
                }
                store.is_loading.then(|| rsx!(Spinner { class: "posts-spinner" })),
                div { class: "posts-list",
                    store.rows.iter().map(|post| rsx!(PostRow {
                        key: "{post.id}",
                        store: store,
                        post: post,
                        message_width: message_width,
                    }))
                }
            }
        }
    }
}

#[inline_props]
fn SearchForm<'a>(cx: Scope<'a>, store: &'a ViewStore<'a>) -> Element<'a> {
    let keyword = &store.filters.keyword;
    render! {
        form {
            class: "hstack gap-2 keyword-form",
            prevent_default: "onsubmit",
            onsubmit: move |_| store.send(PostsAction::Search),
            Label { class: "input-group-addon", title: loc!("Search by keyword"), loc!("Keyword") }
            input {
                class: "form-control",
                r#type: "text",
                maxlength: "128",
                autofocus: "true",
                value: "{keyword}",
                oninput: move |evt| store.send(PostsAction::KeywordChanged(evt.value.clone(), false)),
            }
            button { class: "btn btn-primary", r#type: "submit", loc!("Search") }
            UserSelect { store: store }
        }
    }
}

#[inline_props]
fn DateSelector<'a>(cx: Scope<'a>, store: &'a ViewStore<'a>) -> Element<'a> {
    let filters = &store.filters;
    render! {
        div { class: "date-selector hstack gap-2",
            label { r#for: "startDate", loc!("Start date:") }
            input {
                name: "startDate",
                r#type: "date",
                value: "{filters.start_date}",
                onchange: move |evt| store.send(PostsAction::StartDateChanged(evt.value.clone())),
            }
            label { r#for: "endDate", loc!("End date:") }
            input {
                name: "endDate",
                r#type: "date",
                value: "{filters.end_date}",
                onchange: move |evt| store.send(PostsAction::EndDateChanged(evt.value.clone())),
            }
        }
    }
}

#[inline_props]
fn UserSelect<'a>(cx: Scope<'a>, store: &'a ViewStore<'a>) -> Element<'a> {
    let picker = &store.picker;
    let title = store
        .filters
        .user
        .as_ref()
        .map(|u| u.username.clone())
        .unwrap_or_else(|| loc!("All users").to_string());
    render! {
        div { class: "user-select",
            p {
                class: "user-name",
                onclick: move |_| store.send(PostsAction::Picker(PickerAction::Toggle)),
                "{title}"
            }
            picker.is_open.then(|| rsx!(
                div {
                    div {
                        class: "shade",
                        onclick: move |_| store.send(PostsAction::Picker(PickerAction::Close)),
                    }
                    div { class: "users-dropdown-wrapper",
                        div { class: "users-dropdown",
                            div { class: "user-search-container",
                                input {
                                    class: "user-search-input",
                                    r#type: "text",
                                    placeholder: loc!("Search users..."),
                                    value: "{picker.query()}",
                                    oninput: move |evt| store.send(PostsAction::Picker(PickerAction::Query(evt.value.clone()))),
                                }
                            }
                            div { class: "users-list-container",
                                store.is_loading_users.then(|| rsx!(Spinner {})),
                                picker.entries().into_iter().map(|entry| match entry {
                                    PickerEntry::AllUsers => rsx!(div {
                                        key: "all",
                                        class: "user-in-dropdown",
                                        onclick: move |_| store.send(PostsAction::SelectUser(None)),
                                        loc!("All users")
                                    }),
                                    PickerEntry::User(user) => {
                                        let username = user.username.clone();
                                        rsx!(div {
                                            key: "{user.id}",
                                            class: "user-in-dropdown",
                                            onclick: move |_| store.send(PostsAction::SelectUser(Some(user.clone()))),
                                            "{username}"
                                        })
                                    }
                                })
                            }
                            Paginator {
                                class: "user-pagination",
                                page: picker.page(),
                                onprevious: move |_| store.send(PostsAction::Picker(PickerAction::PreviousPage)),
                                onnext: move |_| store.send(PostsAction::Picker(PickerAction::NextPage)),
                            }
                        }
                    }
                }
            ))
        }
    }
}

#[inline_props]
fn PostRow<'a>(
    cx: Scope<'a>,
    store: &'a ViewStore<'a>,
    post: &'a PostViewModel,
    message_width: &'static str,
) -> Element<'a> {
    let location = post.location();
    render! {
        div { class: "{post.classes}",
            HStack { class: "post__header gap-2 align-items-center",
                Label { class: "post__author", style: TextStyle::Primary, "{post.author}" }
                Label { class: "post__location", style: TextStyle::Secondary, "{location}" }
                div { class: "grow" }
                Label { class: "time", style: TextStyle::Tertiary, force_singleline: true, "{post.created}" }
                post.edited.then(|| rsx!(Label { style: TextStyle::Tertiary, loc!("(edited)") }))
            }
            div { style: "max-width: {message_width};",
                TextContent { content: &post.message_segments, class: "post-message" }
            }
            post.attachments.iter().map(|attachment| rsx!(Attachment {
                key: "{attachment.id}",
                store: store,
                post_id: &post.id,
                attachment: attachment,
            })),
            ReactionList {
                store: store.host_with(
                    cx,
                    *post,
                    |post| ReactionListState::new(post.id, post.reactions, true),
                ),
            }
        }
    }
}

#[inline_props]
fn Attachment<'a>(
    cx: Scope<'a>,
    store: &'a ViewStore<'a>,
    post_id: &'a str,
    attachment: &'a AttachmentViewModel,
) -> Element<'a> {
    let toggle = move |_| {
        store.send(PostsAction::ToggleAttachment {
            post_id: post_id.to_string(),
            file_id: attachment.id.clone(),
        })
    };
    render! {
        div { class: "post-attachment",
            HStack { class: "gap-2 align-items-center",
                Label { "{attachment.name}" }
                Label { style: TextStyle::Tertiary, "{attachment.size}" }
                attachment.is_image.then(|| rsx!(TextButton {
                    text: if attachment.is_visible { loc!("Hide") } else { loc!("Show") },
                    title: loc!("Toggle preview"),
                    onclick: toggle,
                }))
            }
            (attachment.is_image && attachment.is_visible).then(|| rsx!(img {
                class: "post-attachment__preview",
                src: "{store.server_url}{attachment.thumbnail_path()}",
                alt: "{attachment.name}",
            }))
        }
    }
}

impl ChildReducer<PostsReducer> for ReactionListReducer {
    fn to_child(
        message: <PostsReducer as navicula::Reducer>::Message,
    ) -> Option<<Self as navicula::Reducer>::Action> {
        match message {
            PostsMessage::ReactionsChanged { post_id, reactions } => {
                Some(ReactionListAction::ReactionsChanged { post_id, reactions })
            }
        }
    }

    fn from_child(
        message: <Self as navicula::Reducer>::DelegateMessage,
    ) -> Option<<PostsReducer as navicula::Reducer>::Action> {
        match message {
            ReactionListDelegate::Changed(change) => {
                Some(PostsAction::Reaction(ReactionListDelegate::Changed(change)))
            }
        }
    }
}

use std::collections::HashMap;

use chrono::{Local, Utc};
use navicula::Effect;

use super::filters::Filters;
use super::loader::{
    channel_activity, load_files, load_posts, load_users, posts_with_files,
    synthesize_channels_and_teams, LoadedPage,
};
use super::user_picker::UserPicker;
use crate::components::reactions::{ReactionChange, ReactionListDelegate};
use crate::environment::model::{AllPostsRequest, FileInfo, Post, PostInfo, UserProfile};
use crate::environment::storage::{Data, StoreAction};
use crate::environment::types::TeammateNameDisplay;
use crate::environment::Environment;
use crate::pagination::Page;
use crate::styling::post_highlights;
use crate::view_model::PostViewModel;

pub type ViewStore<'a> = navicula::ViewStore<'a, super::PostsReducer>;

/// Sent down to the reaction bars of the listed posts
#[derive(Clone, Debug)]
pub enum PostsMessage {
    ReactionsChanged {
        post_id: String,
        reactions: Vec<crate::environment::model::Reaction>,
    },
}

#[derive(Clone, Debug)]
pub enum PickerAction {
    Toggle,
    Close,
    Query(String),
    NextPage,
    PreviousPage,
}

#[derive(Clone, Debug)]
pub enum PostsAction {
    Initial,
    DataChanged,
    LoadUsers,
    LoadedUsers(Result<Vec<UserProfile>, String>),
    LoadPosts,
    LoadedPosts(u64, Result<LoadedPage, String>),
    /// The keyword input changed, `true` if it was submitted
    KeywordChanged(String, bool),
    Search,
    PreviousPage,
    NextPage,
    StartDateChanged(String),
    EndDateChanged(String),
    SelectUser(Option<UserProfile>),
    Picker(PickerAction),
    LoadedFiles(Vec<(String, Result<Vec<FileInfo>, String>)>),
    ToggleAttachment { post_id: String, file_id: String },
    Reaction(ReactionListDelegate),
    ClearError,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PostsState {
    pub filters: Filters,
    pub page: Page,
    pub posts: Vec<Post>,
    pub post_info: HashMap<String, PostInfo>,
    pub rows: Vec<PostViewModel>,
    /// Bumped for every request, only the newest response is applied
    pub generation: u64,
    pub is_loading: bool,
    pub is_loading_users: bool,
    pub error: Option<String>,
    pub picker: UserPicker,
    pub server_url: String,
}

impl PostsState {
    pub fn new(users_per_page: usize) -> Self {
        Self {
            filters: Filters::new(Local::now().date_naive()),
            // the server decides how many posts make a page
            page: Page::new(1),
            posts: Vec::new(),
            post_info: HashMap::new(),
            rows: Vec::new(),
            generation: 0,
            is_loading: false,
            is_loading_users: false,
            error: None,
            picker: UserPicker::new(users_per_page),
            server_url: String::new(),
        }
    }

    /// Start a new request, superseding any in flight
    pub fn begin_request(&mut self, now_millis: i64) -> (u64, AllPostsRequest) {
        self.generation += 1;
        self.is_loading = true;
        self.error = None;
        (self.generation, self.filters.request(self.page.index(), now_millis))
    }

    /// Apply a response. Returns the page if it belongs to the newest request
    /// and succeeded.
    pub fn accept(
        &mut self,
        generation: u64,
        result: Result<LoadedPage, String>,
    ) -> Option<LoadedPage> {
        if generation != self.generation {
            log::debug!(
                "dropping stale posts response {generation}, current {}",
                self.generation
            );
            return None;
        }
        self.is_loading = false;
        match result {
            Ok(page) => {
                self.posts = page.posts.clone();
                self.post_info = page.post_info.clone();
                self.page = self.page.with_total(page.total_pages);
                Some(page)
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }

    /// Go back to the first page of results
    pub fn search(&mut self) {
        self.page = self.page.first();
    }

    pub fn next_page(&mut self) -> bool {
        let next = self.page.next();
        let changed = next != self.page;
        self.page = next;
        changed
    }

    pub fn previous_page(&mut self) -> bool {
        let previous = self.page.previous();
        let changed = previous != self.page;
        self.page = previous;
        changed
    }

    pub fn select_user(&mut self, user: Option<UserProfile>) {
        self.filters.user = user;
        self.picker.close();
    }

    /// Apply a confirmed reaction change. Returns the post's new reactions.
    pub fn apply_reaction_change(
        &mut self,
        change: &ReactionChange,
    ) -> Option<Vec<crate::environment::model::Reaction>> {
        let post = self.posts.iter_mut().find(|p| p.id == change.post_id())?;
        post.metadata.reactions = change.apply(&post.metadata.reactions);
        Some(post.metadata.reactions.clone())
    }

    pub fn rebuild_rows(&mut self, data: &Data, display: TeammateNameDisplay) {
        let username = data.current_user().map(|u| u.username.as_str());
        self.rows = self
            .posts
            .iter()
            .map(|post| {
                let highlights = post_highlights(post, &self.filters.keyword, username);
                PostViewModel::new(post, self.post_info.get(&post.id), data, display, &Local)
                    .highlighted(post, data.current_user_id.as_deref(), highlights)
            })
            .collect();
    }
}

fn display_setting(environment: &Environment) -> TeammateNameDisplay {
    environment
        .repository
        .config()
        .map(|c| c.teammate_name_display)
        .unwrap_or_default()
}

fn rebuild_rows(state: &mut PostsState, environment: &Environment) {
    let display = display_setting(environment);
    environment
        .storage
        .with(|data| state.rebuild_rows(&data, display));
}

pub fn reduce<'a>(
    context: &'a impl navicula::types::MessageContext<PostsAction, (), PostsMessage>,
    action: PostsAction,
    state: &'a mut PostsState,
    environment: &'a Environment,
) -> Effect<'static, PostsAction> {
    log::trace!("{action:?}");
    match action {
        PostsAction::Initial => {
            state.server_url = environment.model.url().to_string();
            return Effect::merge3(
                environment
                    .storage
                    .subscribe("posts_reducer_data", context, |_| PostsAction::DataChanged),
                Effect::action(PostsAction::LoadUsers),
                Effect::action(PostsAction::LoadPosts),
            );
        }
        PostsAction::DataChanged => rebuild_rows(state, environment),
        PostsAction::LoadUsers => {
            state.is_loading_users = true;
            let model = environment.model.clone();
            return Effect::future(
                async move { load_users(model.as_ref()).await },
                PostsAction::LoadedUsers,
            );
        }
        PostsAction::LoadedUsers(result) => {
            state.is_loading_users = false;
            match result {
                Ok(profiles) => {
                    state.picker.set_users(profiles.clone());
                    environment.dispatch(StoreAction::ReceivedProfilesList(profiles));
                }
                Err(e) => state.error = Some(e),
            }
        }
        PostsAction::LoadPosts => {
            let (generation, request) = state.begin_request(Utc::now().timestamp_millis());
            let model = environment.model.clone();
            return Effect::future(
                async move { load_posts(model.as_ref(), request).await },
                move |result| PostsAction::LoadedPosts(generation, result),
            );
        }
        PostsAction::LoadedPosts(generation, result) => {
            let Some(page) = state.accept(generation, result) else {
                return Effect::NONE;
            };
            let (channels, teams) = synthesize_channels_and_teams(&page.posts, &page.post_info);
            if !channels.is_empty() {
                environment.dispatch(StoreAction::ReceivedChannels(channels));
            }
            if !teams.is_empty() {
                environment.dispatch(StoreAction::ReceivedTeams(teams));
            }
            let username = environment
                .storage
                .with(|data| data.current_user().map(|u| u.username.clone()));
            let activity = channel_activity(&page.posts, username.as_deref());
            if !activity.is_empty() {
                environment.dispatch(StoreAction::ReceivedChannelActivity(activity));
            }
            rebuild_rows(state, environment);
            for post in &page.posts {
                context.send_children(PostsMessage::ReactionsChanged {
                    post_id: post.id.clone(),
                    reactions: post.metadata.reactions.clone(),
                });
            }
            let post_ids = posts_with_files(&page.posts);
            if post_ids.is_empty() {
                return Effect::NONE;
            }
            let model = environment.model.clone();
            return Effect::future(
                async move { load_files(model.as_ref(), post_ids).await },
                PostsAction::LoadedFiles,
            );
        }
        PostsAction::LoadedFiles(results) => {
            for (post_id, result) in results {
                match result {
                    Ok(files) => {
                        environment.dispatch(StoreAction::ReceivedFilesForPost { post_id, files })
                    }
                    Err(e) => log::error!("Could not load files for {post_id}: {e}"),
                }
            }
        }
        PostsAction::KeywordChanged(keyword, submit) => {
            state.filters.keyword = keyword;
            if submit {
                return Effect::action(PostsAction::Search);
            }
        }
        PostsAction::Search => {
            state.search();
            return Effect::action(PostsAction::LoadPosts);
        }
        PostsAction::PreviousPage => {
            if state.previous_page() {
                return Effect::action(PostsAction::LoadPosts);
            }
        }
        PostsAction::NextPage => {
            if state.next_page() {
                return Effect::action(PostsAction::LoadPosts);
            }
        }
        PostsAction::StartDateChanged(value) => {
            if state.filters.set_start_date(value) {
                return Effect::action(PostsAction::LoadPosts);
            }
        }
        PostsAction::EndDateChanged(value) => {
            if state.filters.set_end_date(value) {
                return Effect::action(PostsAction::LoadPosts);
            }
        }
        PostsAction::SelectUser(user) => {
            state.select_user(user);
            return Effect::action(PostsAction::LoadPosts);
        }
        PostsAction::Picker(action) => match action {
            PickerAction::Toggle => state.picker.toggle(),
            PickerAction::Close => state.picker.close(),
            PickerAction::Query(query) => state.picker.set_query(query),
            PickerAction::NextPage => state.picker.next_page(),
            PickerAction::PreviousPage => state.picker.previous_page(),
        },
        PostsAction::ToggleAttachment { post_id, file_id } => {
            environment.dispatch(StoreAction::ToggleInlineImage {
                post_id,
                image_key: file_id,
            });
        }
        PostsAction::Reaction(ReactionListDelegate::Changed(change)) => {
            if let Some(reactions) = state.apply_reaction_change(&change) {
                rebuild_rows(state, environment);
                context.send_children(PostsMessage::ReactionsChanged {
                    post_id: change.post_id().to_string(),
                    reactions,
                });
            }
        }
        PostsAction::ClearError => state.error = None,
    }
    Effect::NONE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::model::Reaction;

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            user_id: "u".to_string(),
            channel_id: "c".to_string(),
            ..Default::default()
        }
    }

    fn page(ids: &[&str], total_pages: usize) -> LoadedPage {
        LoadedPage {
            posts: ids.iter().map(|id| post(id)).collect(),
            total_pages,
            post_info: HashMap::new(),
        }
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut state = PostsState::new(50);
        let (first, _) = state.begin_request(0);
        let (second, _) = state.begin_request(0);
        assert!(state.accept(first, Ok(page(&["old"], 1))).is_none());
        assert!(state.posts.is_empty());
        assert!(state.is_loading);

        assert!(state.accept(second, Ok(page(&["new"], 5))).is_some());
        assert_eq!(state.posts[0].id, "new");
        assert_eq!(state.page.total(), 5);
        assert!(!state.is_loading);
    }

    #[test]
    fn errors_are_kept_until_the_next_request() {
        let mut state = PostsState::new(50);
        let (generation, _) = state.begin_request(0);
        assert!(state.accept(generation, Err("API Error".to_string())).is_none());
        assert_eq!(state.error.as_deref(), Some("API Error"));
        state.begin_request(0);
        assert!(state.error.is_none());
    }

    #[test]
    fn requests_use_the_current_page_and_filters() {
        let mut state = PostsState::new(50);
        let (generation, _) = state.begin_request(0);
        state.accept(generation, Ok(page(&["a"], 3)));
        assert!(state.next_page());
        assert!(state.next_page());
        assert!(!state.next_page());
        let (_, request) = state.begin_request(0);
        assert_eq!(request.page, 2);

        state.filters.keyword = "hello".to_string();
        state.search();
        let (_, request) = state.begin_request(0);
        assert_eq!(request.page, 0);
        assert_eq!(request.keyword, "hello");
        assert!(!state.previous_page());
    }

    #[test]
    fn selecting_a_user_closes_the_dropdown() {
        let mut state = PostsState::new(50);
        state.picker.toggle();
        state.select_user(Some(UserProfile {
            id: "u1".to_string(),
            ..Default::default()
        }));
        assert!(!state.picker.is_open);
        let (_, request) = state.begin_request(0);
        assert_eq!(request.user_id, "u1");
        state.select_user(None);
        let (_, request) = state.begin_request(0);
        assert_eq!(request.user_id, "");
    }

    #[test]
    fn reaction_changes_update_the_post() {
        let mut state = PostsState::new(50);
        let (generation, _) = state.begin_request(0);
        state.accept(generation, Ok(page(&["p"], 1)));
        let reaction = Reaction {
            user_id: "me".to_string(),
            post_id: "p".to_string(),
            emoji_name: "x".to_string(),
            create_at: 1,
        };
        let reactions = state
            .apply_reaction_change(&ReactionChange::Added(reaction.clone()))
            .unwrap();
        assert_eq!(reactions, vec![reaction.clone()]);
        let missing = ReactionChange::Added(Reaction {
            post_id: "elsewhere".to_string(),
            ..reaction
        });
        assert!(state.apply_reaction_change(&missing).is_none());
    }

    #[test]
    fn rows_follow_the_posts() {
        let mut state = PostsState::new(50);
        let (generation, _) = state.begin_request(0);
        state.accept(generation, Ok(page(&["a", "b"], 1)));
        state.rebuild_rows(&Data::default(), TeammateNameDisplay::Username);
        let ids: Vec<_> = state.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn rows_highlight_the_keyword() {
        let mut state = PostsState::new(50);
        let (generation, _) = state.begin_request(0);
        let mut loaded = page(&["a", "b"], 1);
        loaded.posts[0].message = "release notes".to_string();
        state.accept(generation, Ok(loaded));
        state.filters.keyword = "Release".to_string();
        state.rebuild_rows(&Data::default(), TeammateNameDisplay::Username);
        assert_eq!(state.rows[0].classes, "post search-highlight");
        assert_eq!(state.rows[1].classes, "post");
    }
}

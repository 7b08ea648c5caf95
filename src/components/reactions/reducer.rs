use std::collections::HashMap;

use super::grouping::{group_for_details, EmojiOrder};
use crate::environment::model::Reaction;
use crate::environment::selectors::{
    display_username, reaction_display_name, UserWithDate, UNKNOWN_USER,
};
use crate::environment::storage::Data;
use crate::environment::types::TeammateNameDisplay;
use crate::environment::Environment;
use navicula::Effect;

pub type ViewStore<'a> = navicula::ViewStore<'a, super::ReactionListReducer>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReactionListAction {
    Initial,
    /// Add the current user's reaction, or remove it if it already exists
    ToggleReaction(String),
    ToggleResult(Result<ReactionChange, String>),
    /// New reactions for a post arrived from the owner of the posts
    ReactionsChanged {
        post_id: String,
        reactions: Vec<Reaction>,
    },
    ShowDetails(bool),
    ClearError,
}

/// What the server confirmed. The owner of the post applies it and feeds
/// the updated reactions back through `ReactionsChanged`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReactionChange {
    Added(Reaction),
    Removed {
        post_id: String,
        user_id: String,
        emoji_name: String,
    },
}

impl ReactionChange {
    pub fn post_id(&self) -> &str {
        match self {
            ReactionChange::Added(r) => &r.post_id,
            ReactionChange::Removed { post_id, .. } => post_id,
        }
    }

    /// `reactions` after this change
    pub fn apply(&self, reactions: &[Reaction]) -> Vec<Reaction> {
        match self {
            ReactionChange::Added(reaction) => {
                let mut updated: Vec<Reaction> = reactions
                    .iter()
                    .filter(|r| {
                        !(r.user_id == reaction.user_id && r.emoji_name == reaction.emoji_name)
                    })
                    .cloned()
                    .collect();
                updated.push(reaction.clone());
                updated
            }
            ReactionChange::Removed {
                user_id,
                emoji_name,
                ..
            } => reactions
                .iter()
                .filter(|r| !(&r.user_id == user_id && &r.emoji_name == emoji_name))
                .cloned()
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReactionListDelegate {
    Changed(ReactionChange),
}

/// The single call a toggle results in
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleCall {
    Add(Reaction),
    Remove {
        user_id: String,
        post_id: String,
        emoji_name: String,
    },
}

#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct ReactionListState {
    pub post_id: String,
    pub reactions: Vec<Reaction>,
    pub order: EmojiOrder,
    pub can_add_reactions: bool,
    pub current_user_id: Option<String>,
    pub server_url: String,
    /// Display names of the reacting users
    pub names: HashMap<String, String>,
    pub emoji_urls: HashMap<String, String>,
    pub details: Vec<ReactionDetail>,
    pub show_details: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// One emoji of the details view
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReactionDetail {
    pub emoji_name: String,
    /// `You, alice, bob`
    pub summary: String,
    pub users: Vec<UserWithDate>,
    /// Nickname or username of each entry in `users`, shown on hover
    pub nicknames: Vec<String>,
}

impl ReactionListState {
    pub fn new(post_id: String, reactions: Vec<Reaction>, can_add_reactions: bool) -> Self {
        let order = EmojiOrder::default()
            .updated(&reactions)
            .unwrap_or_default();
        Self {
            post_id,
            reactions,
            order,
            can_add_reactions,
            ..Default::default()
        }
    }

    /// Nothing is rendered for posts without reactions that can't get any
    pub fn is_hidden(&self) -> bool {
        self.reactions.is_empty() && !self.can_add_reactions
    }

    pub fn has_reacted(&self, user_id: &str, emoji_name: &str) -> bool {
        self.reactions
            .iter()
            .any(|r| r.user_id == user_id && r.emoji_name == emoji_name)
    }

    pub fn toggle_call(&self, user_id: &str, emoji_name: &str) -> ToggleCall {
        if self.has_reacted(user_id, emoji_name) {
            ToggleCall::Remove {
                user_id: user_id.to_string(),
                post_id: self.post_id.clone(),
                emoji_name: emoji_name.to_string(),
            }
        } else {
            ToggleCall::Add(Reaction {
                user_id: user_id.to_string(),
                post_id: self.post_id.clone(),
                emoji_name: emoji_name.to_string(),
                create_at: 0,
            })
        }
    }

    pub fn name_of(&self, user_id: &str) -> String {
        self.names
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_USER.to_string())
    }

    pub fn emoji_url(&self, emoji_name: &str) -> String {
        let path = self.emoji_urls.get(emoji_name).cloned().unwrap_or_default();
        format!("{}{path}", self.server_url)
    }

    /// Resolve users and emojis of the current reactions from the store
    pub fn refresh(&mut self, data: &Data, display: TeammateNameDisplay) {
        self.current_user_id = data.current_user_id.clone();
        self.names = self
            .reactions
            .iter()
            .filter_map(|r| {
                data.user(&r.user_id)
                    .map(|u| (r.user_id.clone(), display_username(u, display)))
            })
            .collect();
        self.emoji_urls = self
            .reactions
            .iter()
            .map(|r| (r.emoji_name.clone(), data.emoji_url(&r.emoji_name)))
            .collect();
        self.details = group_for_details(&self.reactions)
            .into_iter()
            .map(|group| ReactionDetail {
                summary: data.names_of_users(&group.reactions, display).join(", "),
                users: data.users_with_dates(&group.reactions, display, &chrono::Local),
                nicknames: group
                    .reactions
                    .iter()
                    .map(|r| reaction_display_name(data.user(&r.user_id)))
                    .collect(),
                emoji_name: group.emoji_name,
            })
            .collect();
    }

    /// Replace the reactions, keeping the bar order stable
    pub fn reactions_changed(&mut self, post_id: &str, reactions: Vec<Reaction>) -> bool {
        if post_id != self.post_id {
            return false;
        }
        if let Some(order) = self.order.updated(&reactions) {
            self.order = order;
        }
        self.reactions = reactions;
        true
    }
}

pub fn reduce<'a>(
    context: &'a impl navicula::types::MessageContext<
        ReactionListAction,
        ReactionListDelegate,
        (),
    >,
    action: ReactionListAction,
    state: &'a mut ReactionListState,
    environment: &'a Environment,
) -> Effect<'static, ReactionListAction> {
    log::trace!("{action:?}");
    match action {
        ReactionListAction::Initial => refresh(state, environment),
        ReactionListAction::ToggleReaction(emoji_name) => {
            if state.is_loading {
                return Effect::NONE;
            }
            let Some(user_id) = environment.current_user_id() else {
                state.error = Some(crate::loc!("Not logged in").to_string());
                return Effect::NONE;
            };
            state.is_loading = true;
            let model = environment.model.clone();
            let call = state.toggle_call(&user_id, &emoji_name);
            return Effect::future(
                async move { toggle(model.as_ref(), call).await },
                ReactionListAction::ToggleResult,
            );
        }
        ReactionListAction::ToggleResult(result) => {
            state.is_loading = false;
            match result {
                Ok(change) => context.send_parent(ReactionListDelegate::Changed(change)),
                Err(e) => state.error = Some(e),
            }
        }
        ReactionListAction::ReactionsChanged { post_id, reactions } => {
            if state.reactions_changed(&post_id, reactions) {
                refresh(state, environment);
            }
        }
        ReactionListAction::ShowDetails(show) => state.show_details = show,
        ReactionListAction::ClearError => state.error = None,
    }
    Effect::NONE
}

fn refresh(state: &mut ReactionListState, environment: &Environment) {
    let display = environment
        .repository
        .config()
        .map(|c| c.teammate_name_display)
        .unwrap_or_default();
    state.server_url = environment.model.url().to_string();
    environment.storage.with(|data| state.refresh(&data, display));
}

/// Perform the call and describe what changed
pub async fn toggle(
    model: &dyn crate::environment::Client,
    call: ToggleCall,
) -> Result<ReactionChange, String> {
    match call {
        ToggleCall::Add(reaction) => {
            let reaction = model.add_reaction(reaction).await?;
            Ok(ReactionChange::Added(reaction))
        }
        ToggleCall::Remove {
            user_id,
            post_id,
            emoji_name,
        } => {
            model
                .remove_reaction(user_id.clone(), post_id.clone(), emoji_name.clone())
                .await?;
            Ok(ReactionChange::Removed {
                post_id,
                user_id,
                emoji_name,
            })
        }
    }
}

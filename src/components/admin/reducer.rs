use std::collections::HashMap;

use chrono::NaiveDate;
use itertools::Itertools;
use navicula::Effect;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};

use crate::components::allowlist::AllowlistDelegate;
use crate::environment::model::{ChannelId, ClientConfig, License, UserProfile};
use crate::environment::selectors::last_channel_path;
use crate::environment::storage::{ChannelActivity, Data, StoreAction};
use crate::environment::Environment;
use crate::license::{
    check_enterprise_feature, should_fetch_custom_profile_attributes, EnterpriseFeature,
};
use crate::loc;
use crate::styling::{organize_channels_with_unread_pinned, ChannelListEntry};
use crate::widgets::Segment;

pub type ViewStore<'a> = navicula::ViewStore<'a, super::AdminReducer>;

/// Channel every team has
const DEFAULT_CHANNEL: &str = "town-square";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, AsRefStr, EnumIter)]
pub enum AdminTab {
    #[default]
    Posts,
    RemovePosts,
    Allowlist,
    TeamInvite,
}

impl AdminTab {
    pub fn title(&self) -> &'static str {
        match self {
            AdminTab::Posts => loc!("Posts"),
            AdminTab::RemovePosts => loc!("Remove Posts"),
            AdminTab::Allowlist => loc!("IP Allowlist"),
            AdminTab::TeamInvite => loc!("Team Invite"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TabItem {
    pub tab: AdminTab,
    pub selected: bool,
}

impl Segment for TabItem {
    fn id(&self) -> u64 {
        self.tab as u64
    }

    fn label(&self) -> String {
        self.tab.title().to_string()
    }

    fn selected(&self) -> bool {
        self.selected
    }
}

#[derive(Clone, Debug)]
pub enum AdminAction {
    Initial,
    DataChanged,
    LoadedConfig(Result<ClientConfig, String>),
    LoadedLicense(Result<License, String>),
    SelectTab(AdminTab),
    SelectChannel(ChannelId),
    OpenAllowlist(UserProfile),
    Allowlist(AllowlistDelegate),
    TeamInputChanged(String),
    ShowTeamInvite,
    ClearError,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminState {
    pub tab: AdminTab,
    pub today: NaiveDate,
    pub users_per_page: usize,
    pub server_url: String,
    /// Humans only, by username
    pub users: Vec<UserProfile>,
    pub channels: Vec<ChannelListEntry>,
    pub activity: HashMap<ChannelId, ChannelActivity>,
    pub selected_channel: Option<ChannelId>,
    pub channel_path: Option<String>,
    pub allowlist_user: Option<UserProfile>,
    pub team_input: String,
    pub invite_team: Option<String>,
    pub license: License,
    pub config: ClientConfig,
    pub error: Option<String>,
}

impl AdminState {
    pub fn new(today: NaiveDate, users_per_page: usize, server_url: impl Into<String>) -> Self {
        Self {
            tab: AdminTab::default(),
            today,
            users_per_page,
            server_url: server_url.into(),
            users: Vec::new(),
            channels: Vec::new(),
            activity: HashMap::new(),
            selected_channel: None,
            channel_path: None,
            allowlist_user: None,
            team_input: String::new(),
            invite_team: None,
            license: License::default(),
            config: ClientConfig::default(),
            error: None,
        }
    }

    pub fn tabs(&self) -> Vec<TabItem> {
        AdminTab::iter()
            .map(|tab| TabItem {
                tab,
                selected: tab == self.tab,
            })
            .collect()
    }

    /// Re-read everything the admin view shows from the shared store
    pub fn refresh(&mut self, data: &Data) {
        self.users = data
            .profiles
            .values()
            .filter(|u| !u.is_bot)
            .cloned()
            .sorted_by_key(|u| u.username.to_lowercase())
            .collect();
        let channels: Vec<_> = data
            .channels
            .values()
            .cloned()
            .sorted_by(|a, b| {
                a.display_name
                    .to_lowercase()
                    .cmp(&b.display_name.to_lowercase())
                    .then_with(|| a.id.cmp(&b.id))
            })
            .collect();
        let unread: Vec<_> = channels
            .iter()
            .filter(|c| data.activity(&c.id).map_or(false, |a| a.post_count() > 0))
            .cloned()
            .collect();
        self.channels = organize_channels_with_unread_pinned(&channels, &unread);
        self.activity = data
            .channel_activity
            .iter()
            .map(|(id, a)| (id.clone(), a.clone()))
            .collect();
        self.license = data.license.clone();
        self.config = data.config.clone();
    }

    pub fn is_licensed(&self) -> bool {
        self.license.is_licensed()
    }

    pub fn fetches_custom_profile_attributes(&self) -> bool {
        should_fetch_custom_profile_attributes(&self.config, &self.license)
    }

    /// Enterprise features this server's license is missing
    pub fn missing_features(&self) -> Vec<String> {
        EnterpriseFeature::iter()
            .filter(|f| !check_enterprise_feature(f.as_ref(), &self.license))
            .map(|f| f.as_ref().to_string())
            .collect()
    }

    /// The team id to generate an invite for, `None` for blank input
    pub fn pending_team(&self) -> Option<String> {
        let team = self.team_input.trim();
        (!team.is_empty()).then(|| team.to_string())
    }
}

fn channel_path(
    data: &Data,
    server_url: &str,
    channel_id: &str,
    collapsed_threads: bool,
) -> Option<String> {
    let channel = data.channels.get(channel_id)?;
    let team = data.teams.get(&channel.team_id)?;
    let team_url = format!("{}/{}", server_url.trim_end_matches('/'), team.name);
    Some(last_channel_path(
        &team_url,
        Some(&channel.name),
        DEFAULT_CHANNEL,
        None,
        None,
        collapsed_threads,
    ))
}

pub fn reduce<'a>(
    context: &'a impl navicula::types::MessageContext<AdminAction, (), ()>,
    action: AdminAction,
    state: &'a mut AdminState,
    environment: &'a Environment,
) -> Effect<'static, AdminAction> {
    log::trace!("{action:?}");
    match action {
        AdminAction::Initial => {
            environment.storage.with(|data| state.refresh(&data));
            let config_model = environment.model.clone();
            let license_model = environment.model.clone();
            return Effect::merge3(
                environment
                    .storage
                    .subscribe("admin_reducer_data", context, |_| AdminAction::DataChanged),
                Effect::future(
                    async move { config_model.client_config().await },
                    AdminAction::LoadedConfig,
                ),
                Effect::future(
                    async move { license_model.client_license().await },
                    AdminAction::LoadedLicense,
                ),
            );
        }
        AdminAction::DataChanged => {
            environment.storage.with(|data| state.refresh(&data));
        }
        AdminAction::LoadedConfig(result) => match result {
            Ok(config) => environment.dispatch(StoreAction::ReceivedClientConfig(config)),
            Err(e) => state.error = Some(e),
        },
        AdminAction::LoadedLicense(result) => match result {
            Ok(license) => environment.dispatch(StoreAction::ReceivedLicense(license)),
            Err(e) => state.error = Some(e),
        },
        AdminAction::SelectTab(tab) => state.tab = tab,
        AdminAction::SelectChannel(channel_id) => {
            let collapsed_threads = environment
                .repository
                .config()
                .map(|c| c.collapsed_threads)
                .unwrap_or_default();
            state.channel_path = environment.storage.with(|data| {
                channel_path(&data, &state.server_url, &channel_id, collapsed_threads)
            });
            state.selected_channel = Some(channel_id.clone());
            environment.dispatch(StoreAction::ChannelViewed(channel_id));
        }
        AdminAction::OpenAllowlist(user) => state.allowlist_user = Some(user),
        AdminAction::Allowlist(AllowlistDelegate::Closed) => state.allowlist_user = None,
        AdminAction::TeamInputChanged(value) => state.team_input = value,
        AdminAction::ShowTeamInvite => state.invite_team = state.pending_team(),
        AdminAction::ClearError => state.error = None,
    }
    Effect::NONE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::model::{Channel, Team};

    fn state() -> AdminState {
        AdminState::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            50,
            "https://chat.example.com/",
        )
    }

    fn data() -> Data {
        let mut data = Data::default();
        data.receive(StoreAction::ReceivedProfilesList(vec![
            UserProfile {
                id: "b".to_string(),
                username: "bob".to_string(),
                ..Default::default()
            },
            UserProfile {
                id: "a".to_string(),
                username: "Alice".to_string(),
                ..Default::default()
            },
            UserProfile {
                id: "x".to_string(),
                username: "build-bot".to_string(),
                is_bot: true,
                ..Default::default()
            },
        ]));
        data.receive(StoreAction::ReceivedChannels(vec![
            Channel {
                id: "c1".to_string(),
                team_id: "team_c1".to_string(),
                display_name: "Town Square".to_string(),
                name: "town-square".to_string(),
                ..Default::default()
            },
            Channel {
                id: "c2".to_string(),
                team_id: "team_c2".to_string(),
                display_name: "Off-Topic".to_string(),
                name: "off-topic".to_string(),
                ..Default::default()
            },
        ]));
        data.receive(StoreAction::ReceivedTeams(vec![Team {
            id: "team_c1".to_string(),
            name: "core".to_string(),
            ..Default::default()
        }]));
        let mut activity = ChannelActivity::new("c1");
        activity.posts.insert("p1".to_string());
        activity.posts.insert("p2".to_string());
        activity.mentions.insert("p2".to_string());
        data.receive(StoreAction::ReceivedChannelActivity(vec![activity]));
        data
    }

    #[test]
    fn refresh_lists_humans_and_pins_active_channels() {
        let mut state = state();
        state.refresh(&data());
        let names: Vec<_> = state.users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["Alice", "bob"]);

        let titles: Vec<_> = state.channels.iter().map(|c| c.title()).collect();
        assert_eq!(titles, vec!["Unread", "Town Square", "Other Channels", "Off-Topic"]);
        assert_eq!(
            state.activity.get("c1").map(ChannelActivity::mention_count),
            Some(1)
        );
    }

    #[test]
    fn channel_paths_need_a_known_team() {
        let data = data();
        assert_eq!(
            channel_path(&data, "https://chat.example.com/", "c1", false).as_deref(),
            Some("https://chat.example.com/core/channels/town-square")
        );
        assert_eq!(channel_path(&data, "https://chat.example.com", "c2", false), None);
    }

    #[test]
    fn tabs_mark_the_selection() {
        let mut state = state();
        state.tab = AdminTab::Allowlist;
        let selected: Vec<_> = state
            .tabs()
            .into_iter()
            .filter(|t| t.selected)
            .map(|t| t.tab)
            .collect();
        assert_eq!(selected, vec![AdminTab::Allowlist]);
        assert_eq!(state.tabs().len(), 4);
    }

    #[test]
    fn blank_team_input_shows_no_invite() {
        let mut state = state();
        state.team_input = "  ".to_string();
        assert_eq!(state.pending_team(), None);
        state.team_input = " t1 ".to_string();
        assert_eq!(state.pending_team().as_deref(), Some("t1"));
    }

    #[test]
    fn unlicensed_servers_miss_every_enterprise_feature() {
        let mut state = state();
        assert!(!state.is_licensed());
        assert_eq!(state.missing_features().len(), 7);
        state.license = License {
            is_licensed: "true".to_string(),
            features: [("LDAP".to_string(), "true".to_string())].into_iter().collect(),
        };
        assert!(state.is_licensed());
        assert!(!state.missing_features().contains(&"LDAP".to_string()));
        assert!(!state.fetches_custom_profile_attributes());
    }
}

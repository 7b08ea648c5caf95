use im::{HashMap, Vector};

use crate::environment::model::{
    Channel, ChannelId, ClientConfig, CustomEmoji, FileInfo, License, PostId, Team, TeamId, UserId,
    UserProfile,
};

/// Everything a container can tell the shared store. Containers only ever
/// produce these; `Data::receive` is the single writer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreAction {
    ReceivedProfilesList(Vec<UserProfile>),
    ReceivedChannels(Vec<Channel>),
    ReceivedTeams(Vec<Team>),
    ReceivedFilesForPost {
        post_id: PostId,
        files: Vec<FileInfo>,
    },
    ReceivedAllowlist {
        user_id: UserId,
        ips: Vec<String>,
    },
    ReceivedCurrentUser(UserProfile),
    ReceivedCustomEmojis(Vec<CustomEmoji>),
    ReceivedClientConfig(ClientConfig),
    ReceivedLicense(License),
    ToggleInlineImage {
        post_id: PostId,
        image_key: String,
    },
    ReceivedChannelActivity(Vec<ChannelActivity>),
    ChannelViewed(ChannelId),
}

/// Posts seen in a channel since it was last opened. Posts are tracked by
/// id so that loading the same page again doesn't count them twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelActivity {
    pub channel_id: ChannelId,
    pub posts: im::HashSet<PostId>,
    /// The subset of `posts` mentioning the current user
    pub mentions: im::HashSet<PostId>,
}

impl ChannelActivity {
    pub fn new(channel_id: impl Into<ChannelId>) -> Self {
        Self {
            channel_id: channel_id.into(),
            ..Default::default()
        }
    }

    pub fn post_count(&self) -> u32 {
        u32::try_from(self.posts.len()).unwrap_or(u32::MAX)
    }

    pub fn mention_count(&self) -> u32 {
        u32::try_from(self.mentions.len()).unwrap_or(u32::MAX)
    }

    fn merge(&mut self, other: ChannelActivity) {
        self.posts.extend(other.posts);
        self.mentions.extend(other.mentions);
    }
}

/// The normalized, key indexed store shared by all components
#[derive(Clone, Default)]
pub struct Data {
    pub current_user_id: Option<UserId>,
    pub profiles: HashMap<UserId, UserProfile>,
    pub channels: HashMap<ChannelId, Channel>,
    pub teams: HashMap<TeamId, Team>,
    pub files_for_post: HashMap<PostId, Vector<FileInfo>>,
    pub allowlists: HashMap<UserId, Vector<String>>,
    pub custom_emojis: HashMap<String, CustomEmoji>,
    /// Inline images are visible unless they were collapsed
    pub collapsed_images: im::HashSet<(PostId, String)>,
    pub channel_activity: HashMap<ChannelId, ChannelActivity>,
    pub config: ClientConfig,
    pub license: License,
}

impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data")
            .field("current_user_id", &self.current_user_id)
            .field("profiles", &self.profiles.len())
            .field("channels", &self.channels.len())
            .field("teams", &self.teams.len())
            .field("files_for_post", &self.files_for_post.len())
            .field("allowlists", &self.allowlists.len())
            .field("collapsed_images", &self.collapsed_images.len())
            .field("channel_activity", &self.channel_activity.len())
            .finish()
    }
}

// Data Operations

impl Data {
    pub fn receive(&mut self, action: StoreAction) {
        log::trace!("store receive {action:?}");
        match action {
            StoreAction::ReceivedProfilesList(profiles) => {
                for profile in profiles {
                    self.profiles.insert(profile.id.clone(), profile);
                }
            }
            StoreAction::ReceivedChannels(channels) => {
                for channel in channels {
                    self.channels.insert(channel.id.clone(), channel);
                }
            }
            StoreAction::ReceivedTeams(teams) => {
                for team in teams {
                    self.teams.insert(team.id.clone(), team);
                }
            }
            StoreAction::ReceivedFilesForPost { post_id, files } => {
                self.files_for_post.insert(post_id, files.into());
            }
            StoreAction::ReceivedAllowlist { user_id, ips } => {
                self.allowlists.insert(user_id, ips.into());
            }
            StoreAction::ReceivedCurrentUser(user) => {
                self.current_user_id = Some(user.id.clone());
                self.profiles.insert(user.id.clone(), user);
            }
            StoreAction::ReceivedCustomEmojis(emojis) => {
                for emoji in emojis {
                    self.custom_emojis.insert(emoji.name.clone(), emoji);
                }
            }
            StoreAction::ReceivedClientConfig(config) => self.config = config,
            StoreAction::ReceivedLicense(license) => self.license = license,
            StoreAction::ToggleInlineImage { post_id, image_key } => {
                let key = (post_id, image_key);
                if self.collapsed_images.contains(&key) {
                    self.collapsed_images.remove(&key);
                } else {
                    self.collapsed_images.insert(key);
                }
            }
            StoreAction::ReceivedChannelActivity(activity) => {
                for entry in activity {
                    self.channel_activity
                        .entry(entry.channel_id.clone())
                        .or_insert_with(|| ChannelActivity::new(entry.channel_id.clone()))
                        .merge(entry);
                }
            }
            StoreAction::ChannelViewed(channel_id) => {
                self.channel_activity.remove(&channel_id);
            }
        }
    }

    pub fn user(&self, id: &str) -> Option<&UserProfile> {
        self.profiles.get(id)
    }

    pub fn allowlist(&self, user_id: &str) -> Vec<String> {
        self.allowlists
            .get(user_id)
            .map(|e| e.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.current_user_id.as_deref().and_then(|id| self.user(id))
    }

    pub fn activity(&self, channel_id: &str) -> Option<&ChannelActivity> {
        self.channel_activity.get(channel_id)
    }

    pub fn files(&self, post_id: &str) -> Vec<FileInfo> {
        self.files_for_post
            .get(post_id)
            .map(|e| e.iter().cloned().collect())
            .unwrap_or_default()
    }
}

//! Read-only views on [`Data`] that components turn into their props.

use chrono::TimeZone;
use itertools::Itertools;

use super::model::{Reaction, UserProfile};
use super::storage::Data;
use super::types::{PreviousViewedType, TeammateNameDisplay};
use crate::helper::format_reaction_timestamp;
use crate::loc;

pub const UNKNOWN_USER: &str = "Unknown User";

/// A reacting user and when the reaction happened
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserWithDate {
    pub username: String,
    pub date: String,
}

pub fn display_username(user: &UserProfile, setting: TeammateNameDisplay) -> String {
    let name = match setting {
        TeammateNameDisplay::Username => String::new(),
        TeammateNameDisplay::NicknameFullName if !user.nickname.is_empty() => {
            user.nickname.clone()
        }
        TeammateNameDisplay::NicknameFullName | TeammateNameDisplay::FullName => user.full_name(),
    };
    if name.is_empty() {
        user.username.clone()
    } else {
        name
    }
}

/// Nickname, then username, then a placeholder
pub fn reaction_display_name(user: Option<&UserProfile>) -> String {
    user.and_then(|u| {
        [&u.nickname, &u.username]
            .into_iter()
            .find(|n| !n.is_empty())
            .cloned()
    })
    .unwrap_or_else(|| UNKNOWN_USER.to_string())
}

/// Where to send someone opening a team: the last viewed channel, the
/// threads view if that was last used, or the team's redirect channel.
pub fn last_channel_path(
    team_url: &str,
    last_viewed_channel: Option<&str>,
    redirect_channel: &str,
    last_viewed_type: Option<PreviousViewedType>,
    previous_team_viewed_type: Option<PreviousViewedType>,
    collapsed_threads: bool,
) -> String {
    let threads = Some(PreviousViewedType::Threads);
    if collapsed_threads && (previous_team_viewed_type == threads || last_viewed_type == threads) {
        return format!("{team_url}/threads");
    }
    let channel = last_viewed_channel
        .filter(|c| !c.is_empty())
        .unwrap_or(redirect_channel);
    format!("{team_url}/channels/{channel}")
}

impl Data {
    fn is_current_user(&self, user_id: &str) -> bool {
        self.current_user_id.as_deref() == Some(user_id)
    }

    /// Names of the reacting users, oldest reaction first. The current user
    /// is listed as "You" in front, users missing from the store are skipped.
    pub fn names_of_users(
        &self,
        reactions: &[Reaction],
        display: TeammateNameDisplay,
    ) -> Vec<String> {
        let mut current_user_reacted = false;
        let mut names: Vec<String> = reactions
            .iter()
            .sorted_by_key(|r| r.create_at)
            .filter_map(|reaction| {
                if self.is_current_user(&reaction.user_id) {
                    current_user_reacted = true;
                    None
                } else {
                    self.user(&reaction.user_id)
                        .map(|u| display_username(u, display))
                }
            })
            .collect();
        if current_user_reacted {
            names.insert(0, loc!("You").to_string());
        }
        names
    }

    pub fn users_with_dates<Tz: TimeZone>(
        &self,
        reactions: &[Reaction],
        display: TeammateNameDisplay,
        tz: &Tz,
    ) -> Vec<UserWithDate>
    where
        Tz::Offset: std::fmt::Display,
    {
        reactions
            .iter()
            .sorted_by_key(|r| r.create_at)
            .map(|reaction| {
                let username = if self.is_current_user(&reaction.user_id) {
                    loc!("You").to_string()
                } else {
                    self.user(&reaction.user_id)
                        .map(|u| display_username(u, display))
                        .unwrap_or_else(|| UNKNOWN_USER.to_string())
                };
                UserWithDate {
                    username,
                    date: format_reaction_timestamp(reaction.create_at, tz),
                }
            })
            .collect()
    }

    pub fn is_inline_image_visible(&self, post_id: &str, image_key: &str) -> bool {
        !self
            .collapsed_images
            .contains(&(post_id.to_string(), image_key.to_string()))
    }

    /// Image path of an emoji relative to the server url. Names that are not
    /// custom emojis are served from the bundled system set.
    pub fn emoji_url(&self, emoji_name: &str) -> String {
        match self.custom_emojis.get(emoji_name) {
            Some(emoji) => format!(
                "/api/v4/emoji/{}/image",
                urlencoding::encode(&emoji.id)
            ),
            None => format!("/static/emoji/{}.png", urlencoding::encode(emoji_name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::model::CustomEmoji;
    use crate::environment::storage::StoreAction;
    use chrono::Utc;

    fn user(id: &str, username: &str, nickname: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            username: username.to_string(),
            nickname: nickname.to_string(),
            first_name: format!("{username}-first"),
            last_name: String::new(),
            ..Default::default()
        }
    }

    fn reaction(user_id: &str, emoji: &str, create_at: i64) -> Reaction {
        Reaction {
            user_id: user_id.to_string(),
            post_id: "p".to_string(),
            emoji_name: emoji.to_string(),
            create_at,
        }
    }

    fn data() -> Data {
        let mut data = Data::default();
        data.receive(StoreAction::ReceivedProfilesList(vec![
            user("a", "alice", ""),
            user("b", "bob", "bobby"),
        ]));
        data.receive(StoreAction::ReceivedCurrentUser(user("me", "admin", "")));
        data
    }

    #[test]
    fn you_comes_first_in_names_of_users() {
        let reactions = vec![
            reaction("a", "x", 5),
            reaction("me", "x", 9),
            reaction("b", "x", 2),
            reaction("ghost", "x", 1),
        ];
        let names = data().names_of_users(&reactions, TeammateNameDisplay::Username);
        assert_eq!(names, vec!["You", "bob", "alice"]);
    }

    #[test]
    fn users_with_dates_keep_timestamp_order() {
        let reactions = vec![reaction("ghost", "x", 120_000), reaction("me", "x", 60_000)];
        let users =
            data().users_with_dates(&reactions, TeammateNameDisplay::Username, &Utc);
        assert_eq!(
            users,
            vec![
                UserWithDate {
                    username: "You".to_string(),
                    date: "1970/01/01 00:01".to_string()
                },
                UserWithDate {
                    username: UNKNOWN_USER.to_string(),
                    date: "1970/01/01 00:02".to_string()
                },
            ]
        );
    }

    #[test]
    fn display_username_follows_the_setting() {
        let bob = user("b", "bob", "bobby");
        assert_eq!(display_username(&bob, TeammateNameDisplay::Username), "bob");
        assert_eq!(
            display_username(&bob, TeammateNameDisplay::NicknameFullName),
            "bobby"
        );
        assert_eq!(
            display_username(&bob, TeammateNameDisplay::FullName),
            "bob-first"
        );
        let bare = UserProfile {
            username: "bare".to_string(),
            ..Default::default()
        };
        assert_eq!(display_username(&bare, TeammateNameDisplay::FullName), "bare");
    }

    #[test]
    fn reaction_display_name_falls_back() {
        assert_eq!(reaction_display_name(Some(&user("b", "bob", "bobby"))), "bobby");
        assert_eq!(reaction_display_name(Some(&user("a", "alice", ""))), "alice");
        assert_eq!(reaction_display_name(None), UNKNOWN_USER);
    }

    #[test]
    fn last_channel_path_prefers_threads_when_enabled() {
        let threads = Some(PreviousViewedType::Threads);
        assert_eq!(
            last_channel_path("/core", Some("dev"), "town-square", threads, None, true),
            "/core/threads"
        );
        assert_eq!(
            last_channel_path("/core", Some("dev"), "town-square", threads, None, false),
            "/core/channels/dev"
        );
        assert_eq!(
            last_channel_path("/core", None, "town-square", None, None, true),
            "/core/channels/town-square"
        );
    }

    #[test]
    fn inline_images_toggle() {
        let mut data = Data::default();
        assert!(data.is_inline_image_visible("p", "img"));
        let toggle = StoreAction::ToggleInlineImage {
            post_id: "p".to_string(),
            image_key: "img".to_string(),
        };
        data.receive(toggle.clone());
        assert!(!data.is_inline_image_visible("p", "img"));
        data.receive(toggle);
        assert!(data.is_inline_image_visible("p", "img"));
    }

    #[test]
    fn emoji_urls() {
        let mut data = Data::default();
        data.receive(StoreAction::ReceivedCustomEmojis(vec![CustomEmoji {
            id: "e1".to_string(),
            name: "party_parrot".to_string(),
            creator_id: String::new(),
        }]));
        assert_eq!(data.emoji_url("party_parrot"), "/api/v4/emoji/e1/image");
        assert_eq!(data.emoji_url("smile"), "/static/emoji/smile.png");
    }
}

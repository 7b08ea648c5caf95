//! Wire types exchanged with the Mattermost server.
//!
//! Every payload is decoded into one of these types at the boundary of
//! [`super::model::Model`]; nothing past the model sees untyped JSON.

use std::collections::HashMap;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

pub type PostId = String;
pub type UserId = String;
pub type ChannelId = String;
pub type TeamId = String;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(default)]
    pub create_at: i64,
    #[serde(default)]
    pub update_at: i64,
    #[serde(default)]
    pub delete_at: i64,
    pub user_id: UserId,
    pub channel_id: ChannelId,
    #[serde(default)]
    pub root_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub file_ids: Vec<String>,
    #[serde(default)]
    pub metadata: PostMetadata,
}

impl Post {
    pub fn has_files(&self) -> bool {
        !self.file_ids.is_empty()
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PostMetadata {
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default)]
    pub files: Vec<FileInfo>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Reaction {
    pub user_id: UserId,
    #[serde(default)]
    pub post_id: PostId,
    pub emoji_name: String,
    #[serde(default)]
    pub create_at: i64,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub last_picture_update: i64,
    #[serde(default)]
    pub delete_at: i64,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => String::new(),
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, Display, EnumString,
)]
pub enum ChannelType {
    #[default]
    #[serde(rename = "O")]
    #[strum(serialize = "O")]
    Open,
    #[serde(rename = "P")]
    #[strum(serialize = "P")]
    Private,
    #[serde(rename = "D")]
    #[strum(serialize = "D")]
    Direct,
    #[serde(rename = "G")]
    #[strum(serialize = "G")]
    Group,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    #[serde(default)]
    pub team_id: TeamId,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ChannelType,
    #[serde(default)]
    pub delete_at: i64,
    #[serde(default)]
    pub create_at: i64,
    #[serde(default)]
    pub update_at: i64,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub name: String,
    /// `O` for open teams, `I` for invite only
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub delete_at: i64,
    #[serde(default)]
    pub create_at: i64,
    #[serde(default)]
    pub update_at: i64,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub id: String,
    #[serde(default)]
    pub post_id: PostId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub create_at: i64,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CustomEmoji {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub creator_id: UserId,
}

/// Side information the admin post search returns for every post
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PostInfo {
    #[serde(default)]
    pub channel_name: String,
    #[serde(default)]
    pub team_name: String,
    /// Non-empty for direct message channels
    #[serde(default)]
    pub members: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PostList {
    #[serde(default)]
    pub order: Vec<PostId>,
    #[serde(default)]
    pub posts: HashMap<PostId, Post>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AllPostsResponse {
    #[serde(rename = "List", default)]
    pub list: PostList,
    #[serde(rename = "TotalPages", default)]
    pub total_pages: usize,
    #[serde(rename = "PostInfoMap", default)]
    pub post_info: HashMap<PostId, PostInfo>,
}

impl AllPostsResponse {
    /// The posts in server order. Ids in `order` without an entry in the
    /// post table are skipped.
    pub fn ordered_posts(&self) -> Vec<Post> {
        self.list
            .order
            .iter()
            .filter_map(|id| {
                let post = self.list.posts.get(id);
                if post.is_none() {
                    log::warn!("post {id} listed in order but missing from the table");
                }
                post.cloned()
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllPostsRequest {
    pub page: usize,
    pub user_id: UserId,
    pub keyword: String,
    /// Epoch milliseconds
    pub start_date: i64,
    /// Epoch milliseconds
    pub end_date: i64,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovePostsRequest {
    pub start_time: i64,
    pub end_time: i64,
}

/// Maximum length of a textual IPv6 address
const MAX_IP_LENGTH: usize = 39;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AllowlistItem {
    pub user_id: UserId,
    pub ip: String,
}

impl AllowlistItem {
    pub fn new(user_id: impl Into<String>, ip: impl AsRef<str>) -> Self {
        Self {
            user_id: user_id.into(),
            ip: ip.as_ref().trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.user_id.is_empty() {
            return Err(crate::loc!("Missing user").to_string());
        }
        if self.ip.is_empty() {
            return Err(crate::loc!("Please enter an IP address").to_string());
        }
        if self.ip.len() > MAX_IP_LENGTH || self.ip.parse::<IpAddr>().is_err() {
            return Err(format!("{} {}", crate::loc!("Invalid IP address:"), self.ip));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct InviteIdResponse {
    pub invite_id: String,
}

/// The server answers `/license/client?format=old` with a flat map of
/// strings (`{"IsLicensed": "true", "LDAP": "true", ...}`). A nested
/// `Features` object is read as well.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, serde_json::Value>")]
pub struct License {
    #[serde(rename = "IsLicensed", default)]
    pub is_licensed: String,
    #[serde(rename = "Features", default)]
    pub features: HashMap<String, String>,
}

impl From<HashMap<String, serde_json::Value>> for License {
    fn from(raw: HashMap<String, serde_json::Value>) -> Self {
        let mut license = License::default();
        for (key, value) in raw {
            match (key.as_str(), value) {
                ("IsLicensed", serde_json::Value::String(v)) => license.is_licensed = v,
                ("Features", serde_json::Value::Object(features)) => {
                    license.features.extend(features.into_iter().filter_map(|(k, v)| match v {
                        serde_json::Value::String(v) => Some((k, v)),
                        _ => None,
                    }));
                }
                (_, serde_json::Value::String(v)) => {
                    license.features.insert(key, v);
                }
                _ => {}
            }
        }
        license
    }
}

/// `/config/client?format=old` is a flat map of strings as well.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, serde_json::Value>")]
pub struct ClientConfig {
    #[serde(rename = "ServiceSettings", default)]
    pub service_settings: ServiceSettings,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ServiceSettings {
    #[serde(rename = "EnableCustomProfileAttributes", default)]
    pub enable_custom_profile_attributes: bool,
}

const ENABLE_CUSTOM_PROFILE_ATTRIBUTES: &str = "EnableCustomProfileAttributes";

fn flag(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::String(s) => s == "true",
        _ => false,
    }
}

impl From<HashMap<String, serde_json::Value>> for ClientConfig {
    fn from(raw: HashMap<String, serde_json::Value>) -> Self {
        let nested = raw
            .get("ServiceSettings")
            .and_then(|s| s.get(ENABLE_CUSTOM_PROFILE_ATTRIBUTES));
        let enabled = raw
            .get(ENABLE_CUSTOM_PROFILE_ATTRIBUTES)
            .or(nested)
            .map_or(false, flag);
        ClientConfig {
            service_settings: ServiceSettings {
                enable_custom_profile_attributes: enabled,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_posts_response_keeps_server_order() {
        let json = r#"{
            "List": {
                "order": ["b", "missing", "a"],
                "posts": {
                    "a": {"id": "a", "user_id": "u1", "channel_id": "c1", "create_at": 1},
                    "b": {"id": "b", "user_id": "u2", "channel_id": "c2", "file_ids": ["f1"]}
                }
            },
            "TotalPages": 3,
            "PostInfoMap": {"a": {"channel_name": "Town Square", "team_name": "Core", "members": ""}}
        }"#;
        let response: AllPostsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total_pages, 3);
        let ids: Vec<_> = response.ordered_posts().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["b".to_string(), "a".to_string()]);
        assert!(response.list.posts["b"].has_files());
        assert_eq!(response.post_info["a"].team_name, "Core");
    }

    #[test]
    fn request_uses_camel_case() {
        let request = AllPostsRequest {
            page: 2,
            user_id: "u".to_string(),
            keyword: "hello".to_string(),
            start_date: 10,
            end_date: 20,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["userId"], "u");
        assert_eq!(value["startDate"], 10);
        assert_eq!(value["endDate"], 20);
    }

    #[test]
    fn allowlist_item_validation() {
        assert!(AllowlistItem::new("user", "  10.0.0.1 ").validate().is_ok());
        assert_eq!(AllowlistItem::new("user", " 10.0.0.1 ").ip, "10.0.0.1");
        assert!(AllowlistItem::new("user", "::1").validate().is_ok());
        assert!(AllowlistItem::new("user", "   ").validate().is_err());
        assert!(AllowlistItem::new("user", "not an ip").validate().is_err());
        assert!(AllowlistItem::new("", "10.0.0.1").validate().is_err());
    }

    #[test]
    fn channel_type_wire_names() {
        let channel: Channel =
            serde_json::from_str(r#"{"id": "c", "type": "D"}"#).unwrap();
        assert_eq!(channel.kind, ChannelType::Direct);
        assert_eq!(ChannelType::Open.to_string(), "O");
    }

    #[test]
    fn full_name_joins_parts() {
        let mut user = UserProfile {
            first_name: "Ada".to_string(),
            ..Default::default()
        };
        assert_eq!(user.full_name(), "Ada");
        user.last_name = "Lovelace".to_string();
        assert_eq!(user.full_name(), "Ada Lovelace");
    }

    #[test]
    fn license_and_config_read_the_flat_server_format() {
        let license: License = serde_json::from_str(
            r#"{"IsLicensed":"true","LDAP":"true","SAML":"false","CustomProfileAttributes":"true","SkuShortName":"enterprise"}"#,
        )
        .unwrap();
        assert_eq!(license.is_licensed, "true");
        assert_eq!(license.features.get("LDAP").map(String::as_str), Some("true"));
        assert_eq!(license.features.get("SAML").map(String::as_str), Some("false"));
        assert!(!license.features.contains_key("IsLicensed"));

        let config: ClientConfig =
            serde_json::from_str(r#"{"EnableCustomProfileAttributes":"true","SiteName":"Chat"}"#)
                .unwrap();
        assert!(config.service_settings.enable_custom_profile_attributes);
        let config: ClientConfig =
            serde_json::from_str(r#"{"EnableCustomProfileAttributes":"false"}"#).unwrap();
        assert!(!config.service_settings.enable_custom_profile_attributes);
    }

    #[test]
    fn nested_config_is_read_too() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"ServiceSettings":{"EnableCustomProfileAttributes":true}}"#,
        )
        .unwrap();
        assert!(config.service_settings.enable_custom_profile_attributes);
    }
}

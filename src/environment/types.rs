use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumString};

// Repository Types

/// A server this client has been connected to
#[derive(Default, Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct Server {
    pub url: String,
    pub user_id: String,
    pub username: String,
    pub token: String,
    pub last_login: DateTime<Utc>,
}

impl Server {
    pub fn new(url: String, user_id: String, username: String, token: String) -> Self {
        Self {
            url,
            user_id,
            username,
            token,
            last_login: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct UiConfig {
    #[serde(default)]
    pub teammate_name_display: TeammateNameDisplay,
    #[serde(default = "default_users_per_page")]
    pub users_per_page: usize,
    #[serde(default)]
    pub collapsed_threads: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            teammate_name_display: TeammateNameDisplay::default(),
            users_per_page: default_users_per_page(),
            collapsed_threads: false,
        }
    }
}

fn default_users_per_page() -> usize {
    crate::components::posts::USERS_PER_PAGE
}

/// How other users are named throughout the ui
#[derive(
    Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Default, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TeammateNameDisplay {
    #[default]
    Username,
    NicknameFullName,
    FullName,
}

#[derive(Clone, Debug)]
pub enum AppEvent {
    FocusChange(bool),
    Reload,
    ClosingWindow,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PreviousViewedType {
    Channels,
    Threads,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn ui_config_defaults_missing_fields() {
        let config: UiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, UiConfig::default());
        assert_eq!(config.users_per_page, 50);
    }

    #[test]
    fn teammate_name_display_parses_server_values() {
        assert_eq!(
            TeammateNameDisplay::from_str("nickname_full_name").unwrap(),
            TeammateNameDisplay::NicknameFullName
        );
        assert_eq!(TeammateNameDisplay::FullName.as_ref(), "full_name");
    }
}

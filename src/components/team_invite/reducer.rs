use std::time::Duration;

use navicula::Effect;

use crate::environment::platform::copy_to_clipboard;
use crate::environment::Environment;

pub type ViewStore<'a> = navicula::ViewStore<'a, super::TeamInviteReducer>;

/// How long the "copied" confirmation stays visible
const COPIED_DURATION: Duration = Duration::from_secs(2);

#[derive(Clone, Debug)]
pub enum TeamInviteAction {
    Generate,
    Generated(Result<String, String>),
    Copy,
    /// Sent a while after the copy with the given tag
    ResetCopied(u64),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TeamInviteState {
    pub team_id: String,
    /// Origin of the server the link points to
    pub origin: String,
    pub invite_id: Option<String>,
    pub is_loading: bool,
    pub copied: bool,
    /// Tags each copy so only the latest one resets the confirmation
    copy_tag: u64,
    pub error: Option<String>,
}

/// `scheme://host[:port]` of a server url
pub fn origin_of(server_url: &str) -> String {
    match url::Url::parse(server_url) {
        Ok(url) => url.origin().ascii_serialization(),
        Err(_) => server_url.trim_end_matches('/').to_string(),
    }
}

impl TeamInviteState {
    pub fn new(team_id: impl Into<String>, server_url: &str) -> Self {
        Self {
            team_id: team_id.into(),
            origin: origin_of(server_url),
            invite_id: None,
            is_loading: false,
            copied: false,
            copy_tag: 0,
            error: None,
        }
    }

    /// The team to request an invite id for. `None` while a request is
    /// already running.
    pub fn begin_generate(&mut self) -> Option<String> {
        if self.is_loading {
            return None;
        }
        self.is_loading = true;
        self.error = None;
        Some(self.team_id.clone())
    }

    pub fn finish_generate(&mut self, result: Result<String, String>) {
        self.is_loading = false;
        match result {
            Ok(id) => self.invite_id = Some(id),
            Err(e) => {
                log::error!("Failed to generate invite link: {e}");
                self.error = Some(e);
            }
        }
    }

    /// Show the confirmation, returning the tag its reset has to carry
    pub fn mark_copied(&mut self) -> u64 {
        self.copy_tag += 1;
        self.copied = true;
        self.copy_tag
    }

    /// Hide the confirmation unless another copy happened since `tag`
    pub fn reset_copied(&mut self, tag: u64) {
        if tag == self.copy_tag {
            self.copied = false;
        }
    }

    /// Empty until an invite id was generated
    pub fn invite_link(&self) -> String {
        match self.invite_id.as_deref() {
            Some(id) if !id.is_empty() => {
                format!("{}/signup_user_complete/?id={id}", self.origin)
            }
            _ => String::new(),
        }
    }

    pub fn can_copy(&self) -> bool {
        !self.invite_link().is_empty()
    }
}

pub fn reduce<'a>(
    _context: &'a impl navicula::types::MessageContext<TeamInviteAction, (), ()>,
    action: TeamInviteAction,
    state: &'a mut TeamInviteState,
    environment: &'a Environment,
) -> Effect<'static, TeamInviteAction> {
    log::trace!("{action:?}");
    match action {
        TeamInviteAction::Generate => {
            let Some(team_id) = state.begin_generate() else {
                return Effect::NONE;
            };
            let model = environment.model.clone();
            return Effect::future(
                async move { model.team_invite_id(team_id).await },
                TeamInviteAction::Generated,
            );
        }
        TeamInviteAction::Generated(result) => state.finish_generate(result),
        TeamInviteAction::Copy => {
            if !state.can_copy() {
                return Effect::NONE;
            }
            match copy_to_clipboard(state.invite_link()) {
                Ok(()) => {
                    let tag = state.mark_copied();
                    return Effect::future(tokio::time::sleep(COPIED_DURATION), move |_| {
                        TeamInviteAction::ResetCopied(tag)
                    });
                }
                Err(e) => state.error = Some(e),
            }
        }
        TeamInviteAction::ResetCopied(tag) => state.reset_copied(tag),
    }
    Effect::NONE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::model::mock::MockClient;
    use crate::environment::Client;

    #[test]
    fn link_is_empty_without_an_invite_id() {
        let mut state = TeamInviteState::new("t1", "https://chat.example.com/");
        assert_eq!(state.invite_link(), "");
        assert!(!state.can_copy());
        state.invite_id = Some(String::new());
        assert!(!state.can_copy());
    }

    #[test]
    fn origin_drops_the_path() {
        assert_eq!(origin_of("https://chat.example.com/"), "https://chat.example.com");
        assert_eq!(origin_of("http://localhost:8065/api"), "http://localhost:8065");
        assert_eq!(origin_of("not a url/"), "not a url");
    }

    #[test]
    fn link_points_at_the_signup_page() {
        let mut state = TeamInviteState::new("t1", "https://chat.example.com/");
        state.invite_id = Some("abc".to_string());
        assert_eq!(
            state.invite_link(),
            "https://chat.example.com/signup_user_complete/?id=abc"
        );
        assert!(state.can_copy());
    }

    #[test]
    fn only_the_latest_copy_resets_the_confirmation() {
        let mut state = TeamInviteState::new("t1", "https://chat.example.com");
        let first = state.mark_copied();
        let second = state.mark_copied();
        state.reset_copied(first);
        assert!(state.copied);
        state.reset_copied(second);
        assert!(!state.copied);
    }

    #[test]
    fn generating_twice_at_once_is_ignored() {
        let mut state = TeamInviteState::new("t1", "https://chat.example.com");
        state.error = Some("old".to_string());
        assert_eq!(state.begin_generate().as_deref(), Some("t1"));
        assert!(state.is_loading);
        assert_eq!(state.error, None);
        assert_eq!(state.begin_generate(), None);
    }

    #[tokio::test]
    async fn generated_invite_fills_the_link() {
        let client = MockClient {
            invite_id: Some("inv".to_string()),
            ..Default::default()
        };
        let mut state = TeamInviteState::new("t1", "https://chat.example.com");
        let team_id = state.begin_generate().unwrap();
        state.finish_generate(client.team_invite_id(team_id).await);
        assert!(!state.is_loading);
        assert_eq!(
            state.invite_link(),
            "https://chat.example.com/signup_user_complete/?id=inv"
        );
        assert_eq!(client.calls(), vec!["team_invite_id t1".to_string()]);
    }

    #[tokio::test]
    async fn failed_generation_keeps_the_error() {
        let client = MockClient::default();
        let mut state = TeamInviteState::new("t1", "https://chat.example.com");
        let team_id = state.begin_generate().unwrap();
        state.finish_generate(client.team_invite_id(team_id).await);
        assert!(!state.is_loading);
        assert!(state.error.is_some());
        assert_eq!(state.invite_id, None);
        assert!(!state.can_copy());
    }
}

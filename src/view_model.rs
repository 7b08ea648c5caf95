use crate::environment::model::*;
use crate::environment::selectors::{display_username, UNKNOWN_USER};
use crate::environment::storage::Data;
use crate::environment::types::TeammateNameDisplay;
use crate::helper::{format_number, format_post_time};
use crate::styling::{post_custom_classes, style_message_text, MessageSegment, PostHighlight};
use chrono::TimeZone;
use enumset::EnumSet;

/// A post of the admin browser with everything resolved for rendering
#[derive(Default, Clone)]
pub struct PostViewModel {
    pub id: PostId,
    pub user_id: UserId,
    pub author: String,
    pub channel_name: String,
    pub team_name: String,
    /// Members of a direct message channel
    pub members: String,
    pub is_direct: bool,
    pub message: String,
    pub message_segments: Vec<MessageSegment>,
    pub created: String,
    pub edited: bool,
    pub classes: String,
    pub reactions: Vec<Reaction>,
    pub file_ids: Vec<String>,
    pub attachments: Vec<AttachmentViewModel>,
}

impl PartialEq for PostViewModel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.author == other.author
            && self.reactions == other.reactions
            && self.attachments == other.attachments
            && self.classes == other.classes
    }
}

impl Eq for PostViewModel {}

impl std::fmt::Debug for PostViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostViewModel")
            .field("id", &self.id)
            .field("author", &self.author)
            .finish()
    }
}

impl PostViewModel {
    pub fn new<Tz: TimeZone>(
        post: &Post,
        info: Option<&PostInfo>,
        data: &Data,
        display: TeammateNameDisplay,
        tz: &Tz,
    ) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let author = data
            .user(&post.user_id)
            .map(|u| display_username(u, display))
            .unwrap_or_else(|| UNKNOWN_USER.to_string());
        let channel = data.channels.get(&post.channel_id);
        let team = channel.and_then(|c| data.teams.get(&c.team_id));
        let channel_name = info
            .map(|i| i.channel_name.clone())
            .or_else(|| channel.map(|c| c.display_name.clone()))
            .unwrap_or_default();
        let team_name = info
            .map(|i| i.team_name.clone())
            .or_else(|| team.map(|t| t.display_name.clone()))
            .unwrap_or_default();
        let members = info.map(|i| i.members.clone()).unwrap_or_default();
        let mut files = data.files(&post.id);
        if files.is_empty() {
            files = post.metadata.files.clone();
        }
        Self {
            id: post.id.clone(),
            user_id: post.user_id.clone(),
            author,
            channel_name,
            team_name,
            is_direct: !members.is_empty(),
            members,
            message: post.message.clone(),
            message_segments: style_message_text(&post.message),
            created: format_post_time(post.create_at, tz),
            edited: post.update_at > post.create_at,
            classes: post_custom_classes(
                post,
                data.current_user_id.as_deref(),
                EnumSet::<PostHighlight>::empty(),
            ),
            reactions: post.metadata.reactions.clone(),
            file_ids: post.file_ids.clone(),
            attachments: files
                .iter()
                .map(|f| AttachmentViewModel {
                    is_visible: data.is_inline_image_visible(&post.id, &f.id),
                    ..AttachmentViewModel::new(f)
                })
                .collect(),
        }
    }

    pub fn highlighted(
        mut self,
        post: &Post,
        current_user_id: Option<&str>,
        highlights: EnumSet<PostHighlight>,
    ) -> Self {
        self.classes = post_custom_classes(post, current_user_id, highlights);
        self
    }

    /// Where the post was written, e.g. `Core / Town Square`
    pub fn location(&self) -> String {
        match (self.team_name.is_empty(), self.is_direct) {
            (_, true) => self.members.clone(),
            (true, false) => self.channel_name.clone(),
            (false, false) => format!("{} / {}", self.team_name, self.channel_name),
        }
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct AttachmentViewModel {
    pub id: String,
    pub name: String,
    pub extension: String,
    pub size: String,
    pub is_image: bool,
    /// Image previews can be collapsed
    pub is_visible: bool,
}

impl AttachmentViewModel {
    pub fn new(file: &FileInfo) -> Self {
        Self {
            id: file.id.clone(),
            name: file.name.clone(),
            extension: file.extension.clone(),
            size: format!("{}B", format_number(file.size)),
            is_image: file.mime_type.starts_with("image/"),
            is_visible: true,
        }
    }

    /// Thumbnail path relative to the server url
    pub fn thumbnail_path(&self) -> String {
        format!("/api/v4/files/{}/thumbnail", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::storage::StoreAction;
    use chrono::Utc;

    fn post() -> Post {
        Post {
            id: "p".to_string(),
            user_id: "a".to_string(),
            channel_id: "c".to_string(),
            message: "hi @bob".to_string(),
            create_at: 1_757_313_780_000,
            file_ids: vec!["f".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn resolves_author_location_and_files() {
        let mut data = Data::default();
        data.receive(StoreAction::ReceivedProfilesList(vec![UserProfile {
            id: "a".to_string(),
            username: "alice".to_string(),
            ..Default::default()
        }]));
        data.receive(StoreAction::ReceivedFilesForPost {
            post_id: "p".to_string(),
            files: vec![FileInfo {
                id: "f".to_string(),
                name: "cat.png".to_string(),
                size: 2048,
                mime_type: "image/png".to_string(),
                ..Default::default()
            }],
        });
        let info = PostInfo {
            channel_name: "Town Square".to_string(),
            team_name: "Core".to_string(),
            members: String::new(),
        };
        let vm = PostViewModel::new(&post(), Some(&info), &data, TeammateNameDisplay::Username, &Utc);
        assert_eq!(vm.author, "alice");
        assert_eq!(vm.location(), "Core / Town Square");
        assert_eq!(vm.created, "Mon Sep 08 2025 上午6:43");
        assert_eq!(vm.message_segments.len(), 2);
        assert_eq!(vm.attachments.len(), 1);
        assert!(vm.attachments[0].is_image);
        assert!(vm.attachments[0].is_visible);
        assert_eq!(vm.attachments[0].thumbnail_path(), "/api/v4/files/f/thumbnail");
    }

    #[test]
    fn unknown_authors_and_direct_channels() {
        let info = PostInfo {
            channel_name: "a, b".to_string(),
            team_name: String::new(),
            members: "alice, bob".to_string(),
        };
        let vm = PostViewModel::new(
            &post(),
            Some(&info),
            &Data::default(),
            TeammateNameDisplay::Username,
            &Utc,
        );
        assert_eq!(vm.author, UNKNOWN_USER);
        assert!(vm.is_direct);
        assert_eq!(vm.location(), "alice, bob");
        assert!(vm.attachments.is_empty());
    }
}

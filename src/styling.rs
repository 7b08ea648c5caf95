//! Presentation rules for posts and channels: css classes, message
//! highlighting and responsive widths.

use enumset::{EnumSet, EnumSetType};

use crate::environment::model::{Channel, Post};
use crate::helper::ClassList;
use crate::loc;

#[derive(Debug, EnumSetType)]
pub enum PostHighlight {
    Unread,
    Mention,
    SearchHighlight,
}

pub fn is_current_user_message(post: &Post, current_user_id: Option<&str>) -> bool {
    match current_user_id {
        Some(id) if !id.is_empty() => post.user_id == id,
        _ => false,
    }
}

pub fn post_custom_classes(
    post: &Post,
    current_user_id: Option<&str>,
    highlights: EnumSet<PostHighlight>,
) -> String {
    ClassList::new("post")
        .with("current-user", is_current_user_message(post, current_user_id))
        .with("unread-message", highlights.contains(PostHighlight::Unread))
        .with("mention-highlight", highlights.contains(PostHighlight::Mention))
        .with(
            "search-highlight",
            highlights.contains(PostHighlight::SearchHighlight),
        )
        .to_string()
}

/// Search hits (case-insensitive) and `@username` mentions of a listed post
pub fn post_highlights(
    post: &Post,
    keyword: &str,
    current_username: Option<&str>,
) -> EnumSet<PostHighlight> {
    let mut highlights = EnumSet::empty();
    let keyword = keyword.trim().to_lowercase();
    if !keyword.is_empty() && post.message.to_lowercase().contains(&keyword) {
        highlights |= PostHighlight::SearchHighlight;
    }
    if current_username.map_or(false, |name| mentions_user(&post.message, name)) {
        highlights |= PostHighlight::Mention;
    }
    highlights
}

pub fn sidebar_channel_classes(is_unread: bool, mention_count: u32) -> String {
    ClassList::new("sidebar-item")
        .with("unread", is_unread)
        .with("has-mentions", mention_count > 0)
        .to_string()
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ChannelListEntry {
    UnreadHeader,
    ReadHeader,
    Channel(Channel),
}

impl ChannelListEntry {
    pub fn title(&self) -> &str {
        match self {
            ChannelListEntry::UnreadHeader => loc!("Unread"),
            ChannelListEntry::ReadHeader => loc!("Other Channels"),
            ChannelListEntry::Channel(channel) => &channel.display_name,
        }
    }
}

/// Unread channels first, each section behind a header when non-empty
pub fn organize_channels_with_unread_pinned(
    channels: &[Channel],
    unread: &[Channel],
) -> Vec<ChannelListEntry> {
    let read: Vec<&Channel> = channels
        .iter()
        .filter(|c| !unread.iter().any(|u| u.id == c.id))
        .collect();
    let mut entries = Vec::with_capacity(channels.len() + unread.len() + 2);
    if !unread.is_empty() {
        entries.push(ChannelListEntry::UnreadHeader);
        entries.extend(unread.iter().cloned().map(ChannelListEntry::Channel));
    }
    if !read.is_empty() {
        entries.push(ChannelListEntry::ReadHeader);
        entries.extend(read.into_iter().cloned().map(ChannelListEntry::Channel));
    }
    entries
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MessageSegment {
    Text(String),
    /// `@name`, without the `@`
    Mention(String),
    /// `#name`, without the `#`
    Hashtag(String),
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// Whether `message` contains `@username` as a whole token, ignoring case.
/// A trailing `.` ends the sentence, not the name.
pub fn mentions_user(message: &str, username: &str) -> bool {
    if username.is_empty() {
        return false;
    }
    let message = message.to_lowercase();
    let needle = format!("@{}", username.to_lowercase());
    message.match_indices(&needle).any(|(index, _)| {
        let before = message[..index].chars().next_back();
        if before.map_or(false, is_username_char) {
            return false;
        }
        let mut after = message[index + needle.len()..].chars();
        match after.next() {
            None => true,
            Some('.') => !after.next().map_or(false, is_username_char),
            Some(c) => !is_username_char(c),
        }
    })
}

/// Split a message into plain text and highlighted `@mentions` / `#hashtags`
pub fn style_message_text(text: &str) -> Vec<MessageSegment> {
    let mut segments = Vec::new();
    let mut plain = String::new();
    let mut chars = text.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        if c == '@' || c == '#' {
            let rest = &text[index + c.len_utf8()..];
            let word_len: usize = rest
                .chars()
                .take_while(|c| is_word_char(*c))
                .map(char::len_utf8)
                .sum();
            if word_len > 0 {
                if !plain.is_empty() {
                    segments.push(MessageSegment::Text(std::mem::take(&mut plain)));
                }
                let word = rest[..word_len].to_string();
                segments.push(if c == '@' {
                    MessageSegment::Mention(word)
                } else {
                    MessageSegment::Hashtag(word)
                });
                while chars.peek().map_or(false, |(i, _)| *i <= index + word_len) {
                    chars.next();
                }
                continue;
            }
        }
        plain.push(c);
    }
    if !plain.is_empty() {
        segments.push(MessageSegment::Text(plain));
    }
    segments
}

/// Maximum message bubble width for a window width in css pixels
pub fn responsive_message_width(window_width: f64) -> &'static str {
    if window_width <= 768.0 {
        "85%"
    } else if window_width <= 1024.0 {
        "75%"
    } else {
        "70%"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentions_match_whole_usernames() {
        assert!(mentions_user("cc @john.doe please", "john.doe"));
        assert!(mentions_user("thanks @Ann-Lee.", "ann-lee"));
        assert!(mentions_user("@admin", "admin"));
        assert!(!mentions_user("hi @administrator", "admin"));
        assert!(!mentions_user("hi @admin.team", "admin"));
        assert!(!mentions_user("mail me@admin", "admin"));
        assert!(!mentions_user("no one here", ""));
    }

    #[test]
    fn highlights_search_hits_and_mentions() {
        let post = Post {
            message: "Deploy is done @admin".to_string(),
            ..Default::default()
        };
        assert_eq!(
            post_highlights(&post, "DEPLOY", Some("admin")),
            PostHighlight::SearchHighlight | PostHighlight::Mention
        );
        assert_eq!(post_highlights(&post, " ", Some("adm")), EnumSet::empty());
        assert_eq!(
            post_highlights(&post, "", Some("admin")),
            EnumSet::only(PostHighlight::Mention)
        );
    }

    fn post(user_id: &str) -> Post {
        Post {
            id: "p".to_string(),
            user_id: user_id.to_string(),
            ..Default::default()
        }
    }

    fn channel(id: &str) -> Channel {
        Channel {
            id: id.to_string(),
            display_name: id.to_uppercase(),
            ..Default::default()
        }
    }

    #[test]
    fn post_classes() {
        assert_eq!(
            post_custom_classes(&post("me"), Some("me"), EnumSet::empty()),
            "post current-user"
        );
        assert_eq!(
            post_custom_classes(
                &post("other"),
                Some("me"),
                PostHighlight::Unread | PostHighlight::SearchHighlight
            ),
            "post unread-message search-highlight"
        );
        assert_eq!(
            post_custom_classes(&post(""), None, EnumSet::all()),
            "post unread-message mention-highlight search-highlight"
        );
        assert!(!is_current_user_message(&post(""), Some("")));
    }

    #[test]
    fn sidebar_classes() {
        assert_eq!(sidebar_channel_classes(false, 0), "sidebar-item");
        assert_eq!(
            sidebar_channel_classes(true, 2),
            "sidebar-item unread has-mentions"
        );
    }

    #[test]
    fn unread_channels_are_pinned() {
        let channels = vec![channel("a"), channel("b"), channel("c")];
        let entries = organize_channels_with_unread_pinned(&channels, &[channel("b")]);
        assert_eq!(
            entries,
            vec![
                ChannelListEntry::UnreadHeader,
                ChannelListEntry::Channel(channel("b")),
                ChannelListEntry::ReadHeader,
                ChannelListEntry::Channel(channel("a")),
                ChannelListEntry::Channel(channel("c")),
            ]
        );
        let entries = organize_channels_with_unread_pinned(&channels, &[]);
        assert_eq!(entries[0], ChannelListEntry::ReadHeader);
        assert_eq!(entries.len(), 4);
        assert!(organize_channels_with_unread_pinned(&[], &[]).is_empty());
    }

    #[test]
    fn mentions_and_hashtags_are_split_out() {
        assert_eq!(
            style_message_text("hi @alice_1, see #release!"),
            vec![
                MessageSegment::Text("hi ".to_string()),
                MessageSegment::Mention("alice_1".to_string()),
                MessageSegment::Text(", see ".to_string()),
                MessageSegment::Hashtag("release".to_string()),
                MessageSegment::Text("!".to_string()),
            ]
        );
        assert_eq!(
            style_message_text("mail me @ home # 1"),
            vec![MessageSegment::Text("mail me @ home # 1".to_string())]
        );
        assert!(style_message_text("").is_empty());
        assert_eq!(
            style_message_text("@a@b"),
            vec![
                MessageSegment::Mention("a".to_string()),
                MessageSegment::Mention("b".to_string()),
            ]
        );
    }

    #[test]
    fn widths_follow_breakpoints() {
        assert_eq!(responsive_message_width(768.0), "85%");
        assert_eq!(responsive_message_width(1000.0), "75%");
        assert_eq!(responsive_message_width(1920.0), "70%");
    }
}

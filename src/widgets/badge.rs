use crate::helper::ClassList;
use dioxus::prelude::*;

/// Mentions win over plain unread messages. `None` hides the badge.
pub fn display_count(unread_mentions: u32, unread_msgs: u32) -> Option<u32> {
    let count = if unread_mentions > 0 {
        unread_mentions
    } else {
        unread_msgs
    };
    (count > 0).then_some(count)
}

pub fn badge_classes(has_urgent: bool, extra: Option<&str>) -> String {
    ClassList::new("badge")
        .with("urgent", has_urgent)
        .with_optional(extra)
        .to_string()
}

#[inline_props]
pub fn ChannelMentionBadge<'a>(
    cx: Scope<'a>,
    unread_mentions: u32,
    unread_msgs: Option<u32>,
    has_urgent: Option<bool>,
    class: Option<&'a str>,
) -> Element<'a> {
    let Some(count) = display_count(*unread_mentions, unread_msgs.unwrap_or_default()) else {
        return render!({});
    };
    let class = badge_classes(has_urgent.unwrap_or_default(), *class);
    render! {
        span { class: "{class}",
            span { class: "unread-mentions", "{count}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentions_take_precedence() {
        assert_eq!(display_count(3, 10), Some(3));
        assert_eq!(display_count(0, 10), Some(10));
        assert_eq!(display_count(0, 0), None);
    }

    #[test]
    fn classes() {
        assert_eq!(badge_classes(false, None), "badge");
        assert_eq!(badge_classes(true, Some("sidebar")), "badge urgent sidebar");
        assert_eq!(badge_classes(false, Some("  ")), "badge");
    }
}

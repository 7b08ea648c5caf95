//! Bucketing reactions by emoji for the two ways they are displayed.

use itertools::Itertools;

use crate::environment::model::Reaction;
use crate::loc;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReactionGroup {
    pub emoji_name: String,
    /// Oldest reaction first
    pub reactions: Vec<Reaction>,
}

/// Groups for the details view: emoji names sorted lexicographically,
/// members by ascending creation time.
pub fn group_for_details(reactions: &[Reaction]) -> Vec<ReactionGroup> {
    reactions
        .iter()
        .into_group_map_by(|r| r.emoji_name.clone())
        .into_iter()
        .sorted_by(|a, b| a.0.cmp(&b.0))
        .map(|(emoji_name, members)| ReactionGroup {
            emoji_name,
            reactions: members
                .into_iter()
                .sorted_by_key(|r| r.create_at)
                .cloned()
                .collect(),
        })
        .collect()
}

/// The order emoji groups appear in on the inline reaction bar.
///
/// Names are kept in the order they were first seen. New names append at the
/// end and existing names never move, so a reaction arriving for one emoji
/// does not reshuffle the bar.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EmojiOrder(Vec<String>);

impl EmojiOrder {
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// The order extended by the unseen names in `reactions`, or `None` if
    /// every name is already known.
    pub fn updated(&self, reactions: &[Reaction]) -> Option<EmojiOrder> {
        let mut names: Option<Vec<String>> = None;
        for reaction in reactions {
            let known = names.as_ref().unwrap_or(&self.0);
            if !known.contains(&reaction.emoji_name) {
                names
                    .get_or_insert_with(|| self.0.clone())
                    .push(reaction.emoji_name.clone());
            }
        }
        names.map(EmojiOrder)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BarEntry {
    pub user_id: String,
    pub label: String,
    pub create_at: i64,
    pub is_current_user: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BarGroup {
    pub emoji_name: String,
    pub entries: Vec<BarEntry>,
}

impl BarGroup {
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn reacted_by_current_user(&self) -> bool {
        self.entries.iter().any(|e| e.is_current_user)
    }
}

/// Groups for the inline bar, in `order`. Within a group entries are
/// ordered by creation time, except the acting user's own entry which is
/// labelled "You" and always comes first. `name_of` resolves other users.
pub fn group_for_bar(
    reactions: &[Reaction],
    order: &EmojiOrder,
    current_user_id: Option<&str>,
    name_of: impl Fn(&str) -> String,
) -> Vec<BarGroup> {
    let mut by_name = reactions
        .iter()
        .into_group_map_by(|r| r.emoji_name.clone());

    // names missing from `order` would only come from a stale order
    let unordered: Vec<String> = reactions
        .iter()
        .map(|r| r.emoji_name.clone())
        .filter(|name| !order.names().contains(name))
        .unique()
        .collect();

    order
        .names()
        .iter()
        .chain(unordered.iter())
        .filter_map(|name| {
            let members = by_name.remove(name)?;
            let entries = members
                .into_iter()
                .sorted_by_key(|r| {
                    let is_current_user = Some(r.user_id.as_str()) == current_user_id;
                    (!is_current_user, r.create_at)
                })
                .map(|r| {
                    let is_current_user = Some(r.user_id.as_str()) == current_user_id;
                    BarEntry {
                        user_id: r.user_id.clone(),
                        label: if is_current_user {
                            loc!("You").to_string()
                        } else {
                            name_of(&r.user_id)
                        },
                        create_at: r.create_at,
                        is_current_user,
                    }
                })
                .collect();
            Some(BarGroup {
                emoji_name: name.clone(),
                entries,
            })
        })
        .collect()
}

//! The remote side of the post browser, kept apart from the reducer so it
//! can run against any [`Client`].

use std::collections::{HashMap, HashSet};

use futures_util::future::join_all;

use crate::environment::model::{
    AllPostsRequest, Channel, ChannelType, FileInfo, Post, PostInfo, Team, UserProfile,
};
use crate::environment::storage::ChannelActivity;
use crate::environment::Client;
use crate::helper::slug;
use crate::styling::mentions_user;

/// Everyone, in one page
const ALL_USERS_PER_PAGE: usize = 100_000;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LoadedPage {
    pub posts: Vec<Post>,
    pub total_pages: usize,
    pub post_info: HashMap<String, PostInfo>,
}

pub async fn load_users(model: &dyn Client) -> Result<Vec<UserProfile>, String> {
    model.profiles(0, ALL_USERS_PER_PAGE).await
}

pub async fn load_posts(model: &dyn Client, request: AllPostsRequest) -> Result<LoadedPage, String> {
    let response = model.admin_all_posts(request).await?;
    Ok(LoadedPage {
        posts: response.ordered_posts(),
        total_pages: response.total_pages,
        post_info: response.post_info,
    })
}

/// File infos of every post with attachments, fetched concurrently. Each
/// result stands on its own so one failure doesn't hide the others.
pub async fn load_files(
    model: &dyn Client,
    post_ids: Vec<String>,
) -> Vec<(String, Result<Vec<FileInfo>, String>)> {
    join_all(post_ids.into_iter().map(|post_id| async move {
        let result = model.file_infos_for_post(post_id.clone()).await;
        (post_id, result)
    }))
    .await
}

pub fn posts_with_files(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .filter(|p| p.has_files())
        .map(|p| p.id.clone())
        .collect()
}

/// The search response only names channels and teams. Build stand-in
/// entities so posts can be rendered with their channel and team.
/// One channel per distinct channel id, in post order.
pub fn synthesize_channels_and_teams(
    posts: &[Post],
    post_info: &HashMap<String, PostInfo>,
) -> (Vec<Channel>, Vec<Team>) {
    let mut seen = HashSet::new();
    let mut channels = Vec::new();
    let mut teams = Vec::new();
    for post in posts {
        let Some(info) = post_info.get(&post.id) else {
            continue;
        };
        if !seen.insert(post.channel_id.clone()) {
            continue;
        }
        let team_id = format!("team_{}", post.channel_id);
        channels.push(Channel {
            id: post.channel_id.clone(),
            team_id: team_id.clone(),
            display_name: info.channel_name.clone(),
            name: slug(&info.channel_name),
            kind: if info.members.is_empty() {
                ChannelType::Open
            } else {
                ChannelType::Direct
            },
            ..Default::default()
        });
        teams.push(Team {
            id: team_id,
            display_name: info.team_name.clone(),
            name: slug(&info.team_name),
            kind: "O".to_string(),
            ..Default::default()
        });
    }
    (channels, teams)
}

/// The posts and mentions of one result page per channel, in post order.
/// A post mentions `username` when it contains `@username`.
pub fn channel_activity(posts: &[Post], username: Option<&str>) -> Vec<ChannelActivity> {
    let mut activity: Vec<ChannelActivity> = Vec::new();
    for post in posts {
        let index = match activity.iter().position(|a| a.channel_id == post.channel_id) {
            Some(index) => index,
            None => {
                activity.push(ChannelActivity::new(post.channel_id.clone()));
                activity.len() - 1
            }
        };
        let entry = &mut activity[index];
        entry.posts.insert(post.id.clone());
        if username.map_or(false, |name| mentions_user(&post.message, name)) {
            entry.mentions.insert(post.id.clone());
        }
    }
    activity
}

pub mod admin;
pub mod allowlist;
pub mod posts;
pub mod reactions;
pub mod remove_posts;
pub mod team_invite;

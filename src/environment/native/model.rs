pub use crate::environment::entities::*;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// The remote calls the admin client makes. `Model` talks to a real server,
/// tests substitute an in-memory implementation.
#[async_trait]
pub trait Client: Send + Sync {
    /// The server root, without the api path
    fn url(&self) -> &str;

    async fn profiles(&self, page: usize, per_page: usize) -> Result<Vec<UserProfile>, String>;

    async fn admin_all_posts(&self, request: AllPostsRequest) -> Result<AllPostsResponse, String>;

    async fn file_infos_for_post(&self, post_id: String) -> Result<Vec<FileInfo>, String>;

    async fn admin_remove_posts_between(&self, request: RemovePostsRequest)
        -> Result<i64, String>;

    async fn allowlist(&self, user_id: String) -> Result<Vec<String>, String>;

    async fn add_to_allowlist(&self, item: AllowlistItem) -> Result<(), String>;

    async fn delete_from_allowlist(&self, item: AllowlistItem) -> Result<(), String>;

    async fn team_invite_id(&self, team_id: String) -> Result<String, String>;

    async fn add_reaction(&self, reaction: Reaction) -> Result<Reaction, String>;

    async fn remove_reaction(
        &self,
        user_id: String,
        post_id: String,
        emoji_name: String,
    ) -> Result<(), String>;

    async fn client_config(&self) -> Result<ClientConfig, String>;

    async fn client_license(&self) -> Result<License, String>;
}

#[derive(Clone)]
pub struct Model {
    pub url: String,
    pub has_token: bool,
    token: Option<String>,
    client: reqwest::Client,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model").field("url", &self.url).finish()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new("http://localhost:8065".to_string(), None)
    }
}

impl Model {
    pub fn new(url: String, token: Option<String>) -> Self {
        let has_token = token.is_some();
        Self {
            url: url.trim_end_matches('/').to_string(),
            has_token,
            token,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v4{path}", self.url)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.endpoint(path))
            .header("X-Requested-With", "XMLHttpRequest");
        match self.token {
            Some(ref token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        call: &'static str,
    ) -> Result<T, String> {
        let response = builder.send().await.string_error(call)?;
        let response = response.error_for_status().string_error(call)?;
        response.json::<T>().await.string_error(call)
    }

    async fn send_empty(&self, builder: RequestBuilder, call: &'static str) -> Result<(), String> {
        let response = builder.send().await.string_error(call)?;
        response.error_for_status().map(|_| ()).string_error(call)
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        call: &'static str,
    ) -> Result<T, String> {
        self.send_json(self.request(Method::POST, path).json(body), call)
            .await
    }
}

#[async_trait]
impl Client for Model {
    fn url(&self) -> &str {
        &self.url
    }

    async fn profiles(&self, page: usize, per_page: usize) -> Result<Vec<UserProfile>, String> {
        log::trace!("Profiles page {page}");
        let path = format!("/users?page={page}&per_page={per_page}");
        self.send_json(self.request(Method::GET, &path), "profiles")
            .await
    }

    async fn admin_all_posts(&self, request: AllPostsRequest) -> Result<AllPostsResponse, String> {
        log::trace!("All Posts {request:?}");
        self.post_json("/admin/posts/search", &request, "admin_all_posts")
            .await
    }

    async fn file_infos_for_post(&self, post_id: String) -> Result<Vec<FileInfo>, String> {
        log::trace!("File infos for {post_id}");
        let path = format!("/posts/{}/files/info", urlencoding::encode(&post_id));
        self.send_json(self.request(Method::GET, &path), "file_infos_for_post")
            .await
    }

    async fn admin_remove_posts_between(
        &self,
        request: RemovePostsRequest,
    ) -> Result<i64, String> {
        log::trace!("Remove posts {request:?}");
        self.post_json("/admin/posts/remove", &request, "admin_remove_posts_between")
            .await
    }

    async fn allowlist(&self, user_id: String) -> Result<Vec<String>, String> {
        let path = format!("/users/{}/whitelist", urlencoding::encode(&user_id));
        self.send_json(self.request(Method::GET, &path), "allowlist")
            .await
    }

    async fn add_to_allowlist(&self, item: AllowlistItem) -> Result<(), String> {
        log::trace!("Add {} to allowlist of {}", item.ip, item.user_id);
        let path = format!("/users/{}/whitelist", urlencoding::encode(&item.user_id));
        self.send_empty(
            self.request(Method::POST, &path).json(&item),
            "add_to_allowlist",
        )
        .await
    }

    async fn delete_from_allowlist(&self, item: AllowlistItem) -> Result<(), String> {
        log::trace!("Delete {} from allowlist of {}", item.ip, item.user_id);
        let path = format!("/users/{}/whitelist", urlencoding::encode(&item.user_id));
        self.send_empty(
            self.request(Method::DELETE, &path).json(&item),
            "delete_from_allowlist",
        )
        .await
    }

    async fn team_invite_id(&self, team_id: String) -> Result<String, String> {
        log::trace!("Invite id for {team_id}");
        let path = format!("/teams/{}/invite_id", urlencoding::encode(&team_id));
        self.send_json::<InviteIdResponse>(self.request(Method::POST, &path), "team_invite_id")
            .await
            .map(|e| e.invite_id)
    }

    async fn add_reaction(&self, reaction: Reaction) -> Result<Reaction, String> {
        self.post_json("/reactions", &reaction, "add_reaction").await
    }

    async fn remove_reaction(
        &self,
        user_id: String,
        post_id: String,
        emoji_name: String,
    ) -> Result<(), String> {
        let path = format!(
            "/users/{}/posts/{}/reactions/{}",
            urlencoding::encode(&user_id),
            urlencoding::encode(&post_id),
            urlencoding::encode(&emoji_name)
        );
        self.send_empty(self.request(Method::DELETE, &path), "remove_reaction")
            .await
    }

    async fn client_config(&self) -> Result<ClientConfig, String> {
        self.send_json(
            self.request(Method::GET, "/config/client?format=old"),
            "client_config",
        )
        .await
    }

    async fn client_license(&self) -> Result<License, String> {
        self.send_json(
            self.request(Method::GET, "/license/client?format=old"),
            "client_license",
        )
        .await
    }
}

pub trait ResultExt {
    type Output;
    fn string_error(self, call: &'static str) -> Result<Self::Output, String>;
}

impl<T, E: std::fmt::Debug> ResultExt for Result<T, E> {
    type Output = T;
    fn string_error(self, call: &'static str) -> Result<T, String> {
        self.map_err(|e| {
            let string_error = format!("API Error: {call} {e:?}");
            log::error!("{string_error}");
            string_error
        })
    }
}

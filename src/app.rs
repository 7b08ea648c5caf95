use chrono::Local;
use dioxus::prelude::*;
use dioxus_desktop::Config;

use crate::components::admin::{AdminApp, AdminState, ViewStore};
use crate::environment::model::{Model, UserProfile};
use crate::environment::platform::default_window;
use crate::environment::repository::Repository;
use crate::environment::storage::StoreAction;
use crate::environment::types::Server;
use crate::environment::Environment;
use crate::style::STYLE;
use crate::widgets::ErrorPage;

/// Seed a server when none was stored yet
const URL_VAR: &str = "MATTERMOST_URL";
const TOKEN_VAR: &str = "MATTERMOST_TOKEN";
const USER_ID_VAR: &str = "MATTERMOST_USER_ID";
const USERNAME_VAR: &str = "MATTERMOST_USERNAME";

pub fn run() {
    use env_logger::Env;
    use std::io::Write;
    env_logger::Builder::from_env(Env::default().default_filter_or("debug"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}:{} {} [{}] - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Stdout)
        .init();

    let style = STYLE;
    let config = Config::new()
        .with_custom_head(format!(
            r#"
        <title>Mattermost Desk</title>
        <style>{style}</style>
        "#
        ))
        .with_window(default_window());

    dioxus_desktop::launch_with_props(RootApp, RootAppProps {}, config);
}

/// The stored server to connect to, falling back to one from the environment
fn current_server(repository: &Repository) -> Result<Server, String> {
    if let Some(server) = repository.servers()?.into_iter().max_by_key(|s| s.last_login) {
        return Ok(server);
    }
    let var = |name: &str| {
        std::env::var(name).map_err(|_| {
            format!(
                "No server configured. Add one to {} or set {URL_VAR} and {TOKEN_VAR}.",
                repository.directory().join("servers.json").display()
            )
        })
    };
    let server = Server::new(
        var(URL_VAR)?,
        std::env::var(USER_ID_VAR).unwrap_or_default(),
        std::env::var(USERNAME_VAR).unwrap_or_default(),
        var(TOKEN_VAR)?,
    );
    repository.update_or_insert_server(server.clone())?;
    Ok(server)
}

fn environment() -> Result<(Environment, Server), String> {
    let repository = Repository::new()?;
    let server = current_server(&repository)?;
    let model = Model::new(server.url.clone(), Some(server.token.clone()));
    let environment = Environment::new(model, repository);
    if !server.user_id.is_empty() {
        environment.dispatch(StoreAction::ReceivedCurrentUser(UserProfile {
            id: server.user_id.clone(),
            username: server.username.clone(),
            ..Default::default()
        }));
    }
    Ok((environment, server))
}

pub struct RootAppProps {}

pub fn RootApp(cx: Scope<'_, RootAppProps>) -> Element<'_> {
    log::trace!("rerender root-app");
    let environment = use_state(cx, environment);
    match environment.get() {
        Ok((environment, server)) => render! {
            AdminRoot { environment: environment, server: server }
        },
        Err(e) => {
            log::error!("{e}");
            render! {
                ErrorPage { content: e }
            }
        }
    }
}

#[inline_props]
fn AdminRoot<'a>(cx: Scope<'a>, environment: &'a Environment, server: &'a Server) -> Element<'a> {
    let users_per_page = environment
        .repository
        .config()
        .map(|c| c.users_per_page)
        .unwrap_or(crate::components::posts::USERS_PER_PAGE);
    let store: ViewStore = navicula::root(cx, &[], environment, || {
        AdminState::new(Local::now().date_naive(), users_per_page, server.url.clone())
    });
    render! {
        AdminApp { store: store }
    }
}

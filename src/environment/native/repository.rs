use crate::environment::types::{Server, UiConfig};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{from_slice, to_string_pretty};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const SERVERS_PATH: &str = "servers.json";
const UICONFIG_PATH: &str = "uiconfig.json";

/// Settings persisted as JSON files in the platform config directory
#[derive(Clone)]
pub struct Repository {
    directory: PathBuf,
    servers: Arc<Mutex<Vec<Server>>>,
    ui_config: Arc<Mutex<UiConfig>>,
}

impl Repository {
    pub fn new() -> Result<Self, String> {
        Self::with_directory(data_directory()?)
    }

    pub fn with_directory(directory: impl AsRef<Path>) -> Result<Self, String> {
        let directory = directory.as_ref().to_path_buf();
        let servers: Vec<Server> = read(&directory, SERVERS_PATH)
            .ok()
            .flatten()
            .unwrap_or_default();
        let ui_config: UiConfig = read(&directory, UICONFIG_PATH)
            .ok()
            .flatten()
            .unwrap_or_default();

        // Try to write the servers. Otherwise fail early
        write(&directory, SERVERS_PATH, &servers)?;

        Ok(Self {
            directory,
            servers: Arc::new(Mutex::new(servers)),
            ui_config: Arc::new(Mutex::new(ui_config)),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn update_or_insert_server(&self, new_server: Server) -> Result<(), String> {
        let mut servers = self
            .servers
            .lock()
            .map_err(|e| format!("Servers Data Error: {e:?}"))?;
        match servers.iter_mut().find(|s| s.url == new_server.url) {
            Some(server) => *server = new_server,
            None => servers.push(new_server),
        }

        if let Err(e) = write(&self.directory, SERVERS_PATH, servers.deref()) {
            log::error!("Could not save servers: {e:?}");
        }

        Ok(())
    }

    pub fn servers(&self) -> Result<Vec<Server>, String> {
        Ok(self
            .servers
            .lock()
            .map_err(|e| format!("Servers Data Error: {e:?}"))?
            .clone())
    }

    pub fn config(&self) -> Result<UiConfig, String> {
        Ok(self
            .ui_config
            .lock()
            .map_err(|e| format!("UiConfig Data Error: {e:?}"))?
            .clone())
    }
}

fn read<T: DeserializeOwned>(directory: &Path, name: &str) -> Result<Option<T>, String> {
    let data_path = directory.join(name);
    if !data_path.exists() {
        return Ok(None);
    };
    let data = std::fs::read(&data_path)
        .map_err(|e| format!("Could not read {}: {e:?}", data_path.display()))?;
    let obj: T =
        from_slice(&data).map_err(|e| format!("Could not parse {}: {e:?}", data_path.display()))?;
    Ok(Some(obj))
}

fn write<T: Serialize>(directory: &Path, name: &str, value: &T) -> Result<(), String> {
    let data_path = directory.join(name);
    let data = to_string_pretty(&value).map_err(|e| format!("Could not parse value:{e:?}"))?;
    std::fs::write(&data_path, data)
        .map_err(|e| format!("Could not write to {}: {e:?}", data_path.display()))?;
    Ok(())
}

fn data_directory() -> Result<PathBuf, String> {
    use directories_next::ProjectDirs;
    let proj_dirs = ProjectDirs::from("com", "mattermost", "mattermost-desk")
        .ok_or_else(|| "Couldn't find a folder to save data".to_string())?;
    let dirs = proj_dirs.config_dir().to_path_buf();
    if !dirs.exists() {
        std::fs::create_dir_all(&dirs)
            .map_err(|e| format!("Could not create directory {}: {e:?}", dirs.display()))?;
    }
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::types::TeammateNameDisplay;

    #[test]
    fn servers_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let repository = Repository::with_directory(dir.path()).unwrap();
        let server = Server::new(
            "https://chat.example.com".to_string(),
            "u1".to_string(),
            "admin".to_string(),
            "token".to_string(),
        );
        repository.update_or_insert_server(server.clone()).unwrap();
        let mut updated = server.clone();
        updated.token = "other".to_string();
        repository.update_or_insert_server(updated).unwrap();

        let reloaded = Repository::with_directory(dir.path()).unwrap();
        let servers = reloaded.servers().unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].token, "other");
    }

    #[test]
    fn config_is_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let repository = Repository::with_directory(dir.path()).unwrap();
        assert_eq!(repository.config().unwrap(), UiConfig::default());
        std::fs::write(
            dir.path().join(UICONFIG_PATH),
            r#"{"teammate_name_display": "full_name", "collapsed_threads": true}"#,
        )
        .unwrap();
        let reloaded = Repository::with_directory(dir.path()).unwrap();
        let config = reloaded.config().unwrap();
        assert_eq!(config.teammate_name_display, TeammateNameDisplay::FullName);
        assert!(config.collapsed_threads);
        assert_eq!(config.users_per_page, 50);
    }

    #[test]
    fn unparseable_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(UICONFIG_PATH), "{ not json").unwrap();
        let repository = Repository::with_directory(dir.path()).unwrap();
        assert_eq!(repository.config().unwrap(), UiConfig::default());
    }
}

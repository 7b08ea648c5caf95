pub mod model;
pub use model::{Client, Model};

pub mod platform;
pub mod repository;
use navicula::publisher::RefPublisher;
use navicula::types::EnvironmentType;
pub use repository::Repository;

use std::sync::Arc;

use super::storage::{Data, StoreAction};
use super::types;

#[derive(Clone)]
pub struct Environment {
    pub model: Arc<dyn Client>,
    pub repository: Repository,
    pub storage: RefPublisher<Data>,
}

impl EnvironmentType for Environment {
    type AppEvent = types::AppEvent;
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment").finish()
    }
}

impl Environment {
    pub fn new(model: impl Client + 'static, repository: Repository) -> Self {
        Self {
            model: Arc::new(model),
            repository,
            storage: RefPublisher::default(),
        }
    }

    /// Hand a store action to the shared store
    pub fn dispatch(&self, action: StoreAction) {
        self.storage.with_mutation(|mut storage| storage.receive(action));
    }

    pub fn current_user_id(&self) -> Option<String> {
        self.storage.with(|storage| storage.current_user_id.clone())
    }
}

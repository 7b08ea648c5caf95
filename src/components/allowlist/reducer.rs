use navicula::Effect;

use crate::environment::model::{AllowlistItem, UserProfile};
use crate::environment::storage::StoreAction;
use crate::environment::Environment;

pub type ViewStore<'a> = navicula::ViewStore<'a, super::AllowlistReducer>;

#[derive(Clone, Debug)]
pub enum AllowlistAction {
    Initial,
    Load,
    Loaded(Result<Vec<String>, String>),
    InputChanged(String),
    Add,
    Delete(String),
    /// An add or delete finished
    Mutated(Result<(), String>),
    Close,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AllowlistDelegate {
    Closed,
}

/// The ip addresses a user may log in from
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct AllowlistState {
    pub user: UserProfile,
    pub ips: Vec<String>,
    pub input: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AllowlistState {
    pub fn new(user: UserProfile) -> Self {
        Self {
            user,
            ..Default::default()
        }
    }

    /// The item to add from the current input. `Ok(None)` for blank input,
    /// which is ignored.
    pub fn pending_item(&self) -> Result<Option<AllowlistItem>, String> {
        let item = AllowlistItem::new(self.user.id.clone(), &self.input);
        if item.ip.is_empty() {
            return Ok(None);
        }
        item.validate()?;
        Ok(Some(item))
    }

    /// The user whose list to fetch
    pub fn begin_load(&mut self) -> String {
        self.is_loading = true;
        self.user.id.clone()
    }

    /// The fetched list, which the shared store should learn about
    pub fn finish_load(&mut self, result: Result<Vec<String>, String>) -> Option<Vec<String>> {
        self.is_loading = false;
        match result {
            Ok(ips) => {
                self.ips = ips.clone();
                Some(ips)
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }

    /// The item to send for the current input. Invalid input ends up in
    /// `error` and blank input is ignored, both returning `None`.
    pub fn begin_add(&mut self) -> Option<AllowlistItem> {
        let item = match self.pending_item() {
            Ok(Some(item)) => item,
            Ok(None) => return None,
            Err(e) => {
                self.error = Some(e);
                return None;
            }
        };
        self.error = None;
        self.input.clear();
        self.is_loading = true;
        Some(item)
    }

    pub fn begin_delete(&mut self, ip: String) -> AllowlistItem {
        self.error = None;
        self.is_loading = true;
        AllowlistItem::new(self.user.id.clone(), ip)
    }

    /// Whether the list has to be fetched again. The local list is never
    /// patched, the server is the source of truth.
    pub fn finish_mutation(&mut self, result: Result<(), String>) -> bool {
        self.is_loading = false;
        match result {
            Ok(()) => true,
            Err(e) => {
                self.error = Some(e);
                false
            }
        }
    }
}

pub fn reduce<'a>(
    context: &'a impl navicula::types::MessageContext<AllowlistAction, AllowlistDelegate, ()>,
    action: AllowlistAction,
    state: &'a mut AllowlistState,
    environment: &'a Environment,
) -> Effect<'static, AllowlistAction> {
    log::trace!("{action:?}");
    match action {
        AllowlistAction::Initial => {
            state.ips = environment
                .storage
                .with(|data| data.allowlist(&state.user.id));
            return Effect::action(AllowlistAction::Load);
        }
        AllowlistAction::Load => {
            let user_id = state.begin_load();
            let model = environment.model.clone();
            return Effect::future(
                async move { model.allowlist(user_id).await },
                AllowlistAction::Loaded,
            );
        }
        AllowlistAction::Loaded(result) => {
            if let Some(ips) = state.finish_load(result) {
                environment.dispatch(StoreAction::ReceivedAllowlist {
                    user_id: state.user.id.clone(),
                    ips,
                });
            }
        }
        AllowlistAction::InputChanged(value) => state.input = value,
        AllowlistAction::Add => {
            let Some(item) = state.begin_add() else {
                return Effect::NONE;
            };
            let model = environment.model.clone();
            return Effect::future(
                async move { model.add_to_allowlist(item).await },
                AllowlistAction::Mutated,
            );
        }
        AllowlistAction::Delete(ip) => {
            let item = state.begin_delete(ip);
            let model = environment.model.clone();
            return Effect::future(
                async move { model.delete_from_allowlist(item).await },
                AllowlistAction::Mutated,
            );
        }
        AllowlistAction::Mutated(result) => {
            if state.finish_mutation(result) {
                return Effect::action(AllowlistAction::Load);
            }
        }
        AllowlistAction::Close => {
            state.error = None;
            context.send_parent(AllowlistDelegate::Closed);
        }
    }
    Effect::NONE
}

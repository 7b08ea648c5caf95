mod filters;
mod loader;
mod reducer;
mod user_picker;
mod view;

pub use filters::Filters;
pub use loader::{channel_activity, synthesize_channels_and_teams, LoadedPage};
pub use reducer::{PickerAction, PostsAction, PostsMessage, PostsState, ViewStore};
pub use user_picker::{PickerEntry, UserPicker};
pub use view::PostsView;

/// Rows per page of the user dropdown
pub const USERS_PER_PAGE: usize = 50;

pub struct PostsReducer;
use navicula::reducer::Reducer;

impl Reducer for PostsReducer {
    type Message = PostsMessage;

    type DelegateMessage = ();

    type Action = PostsAction;

    type State = PostsState;

    type Environment = crate::environment::Environment;

    fn reduce<'a, 'b>(
        context: &'a impl navicula::types::MessageContext<
            Self::Action,
            Self::DelegateMessage,
            Self::Message,
        >,
        action: Self::Action,
        state: &'a mut Self::State,
        environment: &'a Self::Environment,
    ) -> navicula::effect::Effect<'b, Self::Action> {
        reducer::reduce(context, action, state, environment)
    }

    fn initial_action() -> Option<Self::Action> {
        Some(PostsAction::Initial)
    }
}

mod reducer;
mod view;

pub use reducer::{RemovePostsAction, RemovePostsState, ViewStore};
pub use view::RemovePostsView;

pub struct RemovePostsReducer;
use navicula::reducer::Reducer;

impl Reducer for RemovePostsReducer {
    type Message = ();

    type DelegateMessage = ();

    type Action = RemovePostsAction;

    type State = RemovePostsState;

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
        None
    }
}

mod reducer;
mod view;

pub use reducer::{AllowlistAction, AllowlistDelegate, AllowlistState, ViewStore};
pub use view::AllowlistModal;

pub struct AllowlistReducer;
use navicula::reducer::Reducer;

impl Reducer for AllowlistReducer {
    type Message = ();

    type DelegateMessage = AllowlistDelegate;

    type Action = AllowlistAction;

    type State = AllowlistState;

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
        Some(AllowlistAction::Initial)
    }
}

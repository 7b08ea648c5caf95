mod reducer;
mod view;

pub use reducer::{AdminAction, AdminState, AdminTab, ViewStore};
pub use view::AdminApp;

pub struct AdminReducer;
use navicula::reducer::Reducer;

impl Reducer for AdminReducer {
    type Message = ();

    type DelegateMessage = ();

    type Action = AdminAction;

    type State = AdminState;

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
        Some(AdminAction::Initial)
    }
}

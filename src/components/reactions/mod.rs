mod grouping;
mod reducer;
mod view;

pub use grouping::{group_for_bar, group_for_details, BarGroup, EmojiOrder, ReactionGroup};
pub use reducer::{
    ReactionChange, ReactionDetail, ReactionListAction, ReactionListDelegate, ReactionListState,
    ViewStore,
};
pub use view::{ReactionDetails, ReactionList};

pub struct ReactionListReducer;
use navicula::reducer::Reducer;

impl Reducer for ReactionListReducer {
    type Message = ();

    type DelegateMessage = ReactionListDelegate;

    type Action = ReactionListAction;

    type State = ReactionListState;

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
        Some(ReactionListAction::Initial)
    }
}

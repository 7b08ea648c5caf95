mod labels;
pub use labels::*;

mod stacks;
pub use stacks::*;

mod spinner;
pub use spinner::*;

mod errors;
pub use errors::*;

mod buttons;
pub use buttons::*;

mod textcontent;
pub use textcontent::*;

mod splitview;
pub use splitview::SplitViewComponent;

mod segmented_control;
pub use segmented_control::*;

mod badge;
pub use badge::*;

mod paginator;
pub use paginator::*;

#![allow(non_snake_case)]

mod app;
mod components;
mod environment;
mod helper;
mod license;
mod pagination;
mod style;
mod styling;
mod view_model;
mod widgets;

pub use app::run;

/// Handy macro for future localization
#[macro_export]
macro_rules! loc {
    ($x:expr $(,)?) => {
        $x
    };
}

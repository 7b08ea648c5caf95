pub mod entities;
pub mod selectors;
pub mod storage;
pub mod types;

mod native;
pub use native::*;

#![allow(non_snake_case)]
//! The counter demo: a root view with two state cells and one
//! presentational child component.

pub mod message;
pub mod root;

pub use message::{MESSAGE_FONT_SIZE, MessageLabel, MessageProps};
pub use root::{COUNT_UP_LABEL, FACE, HEADING, RootState, RootView, TOGGLE_LABEL};

mod actions;
mod core;
mod document;
mod pointer;

pub use core::{InputState, MAX_WIDTH, MIN_WIDTH};

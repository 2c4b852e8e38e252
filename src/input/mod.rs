//! Input handling
//!
//! Translates terminal key events into viewer actions.

pub mod keybindings;

//! Terminal rendering
//!
//! `view` turns a snapshot into a `Frame`; `terminal` pushes frames to the
//! screen. Only the latter does any I/O.

pub mod frame;
pub mod terminal;
pub mod view;

pub use frame::{Cell, Frame, Tint};
pub use terminal::TerminalRenderer;
pub use view::{ViewOptions, Viewport, render};

//! Renderer-independent text output.
//!
//! Both the CLI and the terminal UI draw from the same [`Frame`] produced by
//! a [`Session`](crate::session::Session), so every front end shows the same
//! state sequence.
//!
//! [`Frame`]: crate::session::Frame

pub mod text;

pub use text::{render_board, render_frame, render_header, render_pegs, render_status};

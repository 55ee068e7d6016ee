//! TUI module for tracestep.
//!
//! Holds the testable application state for the `tracestep-tui` binary.
//! Terminal I/O stays in the binary; key handling and stepping live here.

pub mod replay_app;

pub use replay_app::ReplayApp;

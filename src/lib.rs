//! # tracestep
//!
//! Deterministic, replayable algorithm traces for Tower of Hanoi and N-Queens.
//!
//! A trace is built eagerly and completely before any replay happens:
//! - [`trace::build_hanoi_trace`] records the optimal move sequence;
//! - [`trace::build_nqueens_trace`] records every try, fail, backtrack and
//!   solution of a leftmost-first depth-first search.
//!
//! A [`replay::ReplayCursor`] then consumes the trace one event at a time,
//! keeping a rendering snapshot and a human-readable log in step.
//!
//! ## Example
//!
//! ```rust
//! use tracestep::prelude::*;
//!
//! let mut session = Session::new(ProblemKind::Hanoi, 3).expect("valid size");
//! session.jump_to_end(|_| {}).expect("legal trace");
//! assert_eq!(session.log().last(), Some("Step 7: Move disk 1 A → C"));
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Sometimes range loops are clearer
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod playback;
pub mod renderers;
pub mod replay;
pub mod session;
pub mod trace;
#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{TraceConfig, TraceConfigBuilder};
    pub use crate::error::{TraceError, TraceResult};
    pub use crate::playback::Autoplay;
    pub use crate::replay::{HanoiReplay, QueensReplay, Replay, ReplayCursor, TraceLog};
    pub use crate::session::{Frame, Session};
    pub use crate::trace::{
        build_hanoi_trace, build_nqueens_trace, HanoiMove, Peg, PegState, ProblemKind,
        QueenEvent, SearchKind, Trace,
    };
}

/// Re-export for public API
pub use error::{TraceError, TraceResult};

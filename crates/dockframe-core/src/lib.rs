#![forbid(unsafe_code)]

//! Core: pixel geometry and the logging facade.
//!
//! # Role in DockFrame
//! `dockframe-core` holds the host-independent primitives shared by the
//! layout engine and by host adapters: the [`geometry`] types measurements
//! and solved rectangles are expressed in, and the [`logging`] facade through
//! which the engine reports diagnostics.
//!
//! # Feature flags
//! - `tracing`: forward the logging macros to the `tracing` crate. Without it
//!   the macros compile to nothing.
//! - `tracing-json`: additionally expose [`logging::init_json_subscriber`].

pub mod geometry;
pub mod logging;

pub use geometry::{Rect, Size};

// With tracing disabled the macros are `#[macro_export]`ed at the crate root.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};

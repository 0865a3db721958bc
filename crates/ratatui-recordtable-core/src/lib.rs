//! `ratatui-recordtable-core` holds the small, event-loop-agnostic pieces the record table is
//! built from.
//!
//! Nothing in here knows about rows or columns. The table crate layers its row identity,
//! selection and pagination logic on top of these primitives.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you translate terminal events into [`input::InputEvent`] and render
//!   into a ratatui [`Buffer`](ratatui::buffer::Buffer) from your own loop.
//! - No async runtime, no timers: animated pieces (like a loading spinner) take a caller-owned
//!   tick.
//! - Width-aware: all text is clipped by display columns via `unicode-width`, never by bytes.
//!
//! Useful entry points:
//! - [`render::render_spans_clipped`]: draw a styled line into a fixed number of columns.
//! - [`render::align_spans`]: pad a styled line to a column width with left/center/right
//!   alignment.
//! - [`viewport::ViewportState`]: vertical scroll state for a fixed-height region.
//! - [`help::HelpBar`]: one-line key binding hints.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod help;
pub mod input;
pub mod keymap;
pub mod render;
pub mod viewport;

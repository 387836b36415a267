//! muxwin core — edit the windows of a tmux session as a text listing.
//!
//! The flow is one-way: capture a `WindowSnapshot`, render it as a listing,
//! parse the edited listing into `TargetEntry`s, plan the `EditStep`s, and
//! execute them through a `SessionControl` backend.

pub mod command;
pub mod data;
pub mod editor;
pub mod error;
pub mod help;
pub mod infrastructure;
pub mod reconcile;
pub mod sys;
pub mod types;

pub use error::{Error, Result};

//! Text formats read and written by muxwin.

pub mod listing;

//! memberchat library
//!
//! A terminal chat client for a member query service: conversation state,
//! background dispatch, message rendering and the TUI around them.

pub mod chat;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod render;
pub mod runner;
pub mod tui;

//! gitflow-action - gitflow branch promotion for GitHub
//!
//! Keeps long-lived branches (dev, release, master) flowing into each other
//! through pull requests, and merges those pull requests automatically when
//! they carry the gate label and the triggering event is allowed to merge.

pub mod auth;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod platform;
pub mod promote;
pub mod types;

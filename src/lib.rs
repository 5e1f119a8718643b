//! camkeep library - persist webcam control settings on Linux.
//!
//! This library exposes the core of the `camkeep` CLI for use in tests.
//!
//! # Modules
//!
//! - `parser`: guvcview profile and config readers
//! - `controls`: guvcview names to V4L2 control names
//! - `device`: video device discovery
//! - `script`: restore script generation
//! - `install`: autostart, udev and systemd registration
//! - `wizard`: the interactive setup flow
//! - `system`: external command and privilege abstraction
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod controls;
pub mod device;
pub mod error;
pub mod install;
pub mod logging;
pub mod output;
pub mod parser;
pub mod prompt;
pub mod script;
pub mod settings;
pub mod system;
pub mod wizard;

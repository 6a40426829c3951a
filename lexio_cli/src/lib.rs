//! Internal modules for the lexio terminal client.
//!
//! This library provides input parsing, configuration loading and text
//! rendering used by the lexio_cli binary.

pub mod commands;
pub mod config;
pub mod view;

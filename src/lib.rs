//! Library entry point for the hubscan CLI.

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod options;
pub mod runner;

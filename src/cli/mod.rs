//! CLI module for playlistr - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for catalog editing,
//! separation modes, playlist computation and the separation graph.

pub mod commands;
pub mod render;

pub use commands::Cli;

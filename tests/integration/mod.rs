//! Integration tests for verse snapshots

mod cli_commands;
mod config_integration;
mod object_store;
mod repository_lifecycle;
mod test_utils;
mod tree_structure;

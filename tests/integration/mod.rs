//! Integration tests for the Papersmith paper configuration wizard

mod cli_script;
mod config_integration;
mod template_application;
mod wizard_flow;

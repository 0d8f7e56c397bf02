//! Papersmith: Exam Paper Configuration Wizard
//!
//! A five-step wizard that turns an educator's choices (template, topics, sections, settings)
//! into one immutable paper configuration and hands it to an external generation service.

pub mod assembler;
pub mod catalogue;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod logging;
pub mod sections;
pub mod selection;
pub mod settings;
pub mod template;
pub mod types;
pub mod wizard;

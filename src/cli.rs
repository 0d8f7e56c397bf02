//! CLI domain: parse, route, output, presentation and the interactive front end.
//! No wizard logic lives here; everything goes through [`crate::wizard::Wizard`].

mod interactive;
mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_paper_config_json, format_paper_summary, format_templates_json, format_templates_text,
    format_topics_json, format_topics_text,
};
pub use route::{advance_to_preview, RunContext};

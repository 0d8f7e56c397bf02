//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("exam.board", "AQA")?
        .set_default("exam.qualification", "GCSE")?
        .set_default("exam.subject", "Mathematics")?
        .set_default("defaults.total_marks", 100)?
        .set_default("defaults.time_limit", 90)?
        .set_default("generator.connect_timeout_secs", 10)?
        .set_default("generator.request_timeout_secs", 120)
}

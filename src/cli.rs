//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to use cases.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, ConvertCommands};
pub use presentation::{format_convert_result, format_generate_result, format_recreate_report};
pub use route::RunContext;
